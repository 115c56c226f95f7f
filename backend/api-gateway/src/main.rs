/// Storefront API Gateway - Main entry point
/// Single public HTTP edge: JWT check, then REST passthrough or gRPC translation
use actix_middleware::JwtAuthMiddleware;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use api_gateway::{configure, Config, Gateway, GATEWAY_EXEMPT_PATHS};
use crypto_core::JwtManager;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "api_gateway=info,actix_web=info".into());

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
    tracing::info!("Starting api-gateway v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        products = %config.upstreams.product_url,
        payments = %config.upstreams.payment_url,
        transactions = %config.upstreams.transaction_url,
        payment_grpc = %config.grpc.payment_grpc_url,
        auth_grpc = %config.grpc.auth_grpc_url,
        "Backends configured"
    );

    let jwt = Arc::new(JwtManager::new(&config.jwt.jwt_secret).context("Invalid JWT secret")?);
    let gateway = web::Data::new(
        Gateway::new(&config.upstreams, &config.grpc).context("Failed to build backend clients")?,
    );

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("HTTP server listening on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(gateway.clone())
            .wrap(JwtAuthMiddleware::with_exempt_paths(jwt.clone(), GATEWAY_EXEMPT_PATHS))
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("HTTP server error")?;

    tracing::info!("api-gateway shut down");
    Ok(())
}
