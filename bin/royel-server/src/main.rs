//! Royel Marketplace Server
//!
//! HTTP server for the marketplace APIs: tokens, identities, listings,
//! reviews, payment intents and payment records.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PORT` | `5000` | HTTP API port |
//! | `ROYEL_MONGO_URL` | `mongodb://localhost:27017` | MongoDB connection URL |
//! | `DB_USER` / `DB_PASS` / `DB_HOST` | - | Atlas credentials, used when `ROYEL_MONGO_URL` is unset |
//! | `ROYEL_MONGO_DB` | `royelDB` | MongoDB database name |
//! | `ACCESS_TOKEN` | - | Token signing secret (required) |
//! | `ROYEL_TOKEN_TTL_SECS` | `3600` | Token lifetime |
//! | `PAYMENT_SECRET_KEY` | - | Payment provider secret key (required) |
//! | `PAYMENT_API_BASE` | `https://api.stripe.com` | Payment provider base URL |
//! | `PAYMENT_CURRENCY` | `usd` | Default intent currency |
//! | `LOG_FORMAT` | `text` | `text` or `json` |
//! | `RUST_LOG` | `info` | Log level |

use std::sync::Arc;
use anyhow::Result;
use mongodb::bson::doc;
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use royel_platform::api::{platform_router, PlatformApiDoc, PlatformServices};
use royel_platform::config::LogFormat;
use royel_platform::payment::{StripeConfig, StripeProvider};
use royel_platform::repository::{
    ensure_indexes, MongoIdentityRepository, MongoListingRepository, MongoPaymentRepository,
    MongoReviewRepository,
};
use royel_platform::service::{
    AuthConfig, AuthService, AuthorizationService, IdentityService, ListingService,
    PaymentService, ReviewService,
};
use royel_platform::PlatformConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Local .env is optional
    dotenvy::dotenv().ok();

    let config = PlatformConfig::from_env()?;
    init_logging(config.log_format);

    info!("Starting Royel Marketplace Server");

    // Connect to MongoDB
    info!("Connecting to MongoDB database {}", config.mongo_db);
    let mongo_client = mongodb::Client::with_uri_str(&config.mongo_url).await?;
    let db = mongo_client.database(&config.mongo_db);
    db.run_command(doc! { "ping": 1 }).await?;
    info!("Pinged MongoDB deployment, connection established");

    ensure_indexes(&db).await?;

    // Initialize repositories
    let identity_repo = Arc::new(MongoIdentityRepository::new(&db));
    let listing_repo = Arc::new(MongoListingRepository::new(&db));
    let review_repo = Arc::new(MongoReviewRepository::new(&db));
    let payment_repo = Arc::new(MongoPaymentRepository::new(&db));

    // Payment provider
    let provider = Arc::new(StripeProvider::new(StripeConfig::new(
        config.payment_secret_key.clone(),
        config.payment_api_base.clone(),
    ))?);

    // Services
    let auth_service = Arc::new(AuthService::new(
        AuthConfig::new(config.token_secret.clone()).with_expiry_secs(config.token_ttl_secs),
    ));
    let authz_service = Arc::new(AuthorizationService::new(
        auth_service.clone(),
        identity_repo.clone(),
    ));

    let services = PlatformServices {
        auth_service,
        authz_service,
        identity_service: Arc::new(IdentityService::new(identity_repo)),
        listing_service: Arc::new(ListingService::new(listing_repo)),
        review_service: Arc::new(ReviewService::new(review_repo)),
        payment_service: Arc::new(PaymentService::new(
            payment_repo,
            provider,
            config.payment_currency.clone(),
        )),
    };

    let app = platform_router(services)
        // OpenAPI / Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/q/openapi", PlatformApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));

    let addr = format!("0.0.0.0:{}", config.port);
    info!("API server listening on http://{}", addr);
    let listener = TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Royel Marketplace Server shutdown complete");
    Ok(())
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    match format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
