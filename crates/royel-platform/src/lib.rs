//! Royel Marketplace Platform
//!
//! Core platform providing:
//! - Signed identity tokens and the authentication/authorization guard chain
//! - Identity registration and admin promotion
//! - Listing lifecycle (upsert edits, admin approval, atomic voting)
//! - Reviews and payment records
//! - Payment intent creation through an external provider

pub mod domain;
pub mod repository;
pub mod service;
pub mod payment;
pub mod api;
pub mod config;
pub mod error;

pub use domain::*;
pub use config::PlatformConfig;
pub use error::PlatformError;
