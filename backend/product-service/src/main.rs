/// Storefront Product Service - Main entry point
use actix_middleware::JwtAuthMiddleware;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use crypto_core::JwtManager;
use db_pool::connect_mongo;
use product_service::{handlers, Config, MongoProductRepository, ProductApp};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "product_service=info,actix_web=info,mongodb=warn".into());

    let json = std::env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false);
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Starting product-service v{}", env!("CARGO_PKG_VERSION"));

    let jwt = Arc::new(JwtManager::new(&config.jwt_secret).context("Invalid JWT secret")?);
    let db = connect_mongo(&config.mongo, "product-service")
        .await
        .context("Failed to connect to MongoDB")?;

    let app = web::Data::new(ProductApp::new(
        Arc::new(MongoProductRepository::new(&db)),
        Duration::from_secs(config.store_timeout_secs),
    ));

    let bind_address = config.bind_address();
    tracing::info!("HTTP server listening on {}", bind_address);

    // actix handles SIGINT/SIGTERM itself and drains workers
    HttpServer::new(move || {
        App::new()
            .app_data(app.clone())
            .wrap(JwtAuthMiddleware::new(jwt.clone()))
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await?;

    tracing::info!("product-service shut down");
    Ok(())
}
