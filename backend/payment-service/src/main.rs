/// Storefront Payment Service - Main entry point
/// Serves the same payment CRUD over REST and gRPC, both behind JWT verification
use actix_middleware::JwtAuthMiddleware;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use crypto_core::JwtManager;
use db_pool::connect_mongo;
use payment_service::{config::Config, db::MongoPaymentRepository, grpc, handlers, PaymentApp};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "payment_service=info,actix_web=info,mongodb=warn".into());

    let json = std::env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false);
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Starting payment-service v{}", env!("CARGO_PKG_VERSION"));

    let jwt = Arc::new(JwtManager::new(&config.jwt.jwt_secret).context("Invalid JWT secret")?);

    let db = connect_mongo(&config.mongo, "payment-service")
        .await
        .context("Failed to connect to MongoDB")?;
    let app = PaymentApp::new(
        Arc::new(MongoPaymentRepository::new(&db)),
        Duration::from_secs(config.store_timeout_secs),
    );

    let http_bind_address = format!("{}:{}", config.server.host, config.server.http_port);
    let grpc_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.grpc_port)
        .parse()
        .context("Invalid gRPC bind address")?;

    let app_data = web::Data::new(app.clone());
    let http_jwt = jwt.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .wrap(JwtAuthMiddleware::new(http_jwt.clone()))
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(&http_bind_address)
    .with_context(|| format!("Failed to bind {}", http_bind_address))?
    .run();
    tracing::info!("HTTP server listening on {}", http_bind_address);

    let server_handle = server.handle();
    let (shutdown_tx, _) = broadcast::channel(1);
    let grpc_shutdown = shutdown_tx.subscribe();

    let mut tasks: JoinSet<io::Result<()>> = JoinSet::new();
    tasks.spawn(async move { server.await });
    tasks.spawn(async move {
        grpc::start_grpc_server(grpc_addr, app, jwt, grpc_shutdown)
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
    });

    let mut first_error: Option<io::Error> = None;
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    tokio::select! {
        result = tasks.join_next() => {
            match result {
                Some(Ok(Err(e))) => {
                    tracing::error!("Server task failed: {}", e);
                    first_error = Some(e);
                }
                Some(Err(e)) => {
                    tracing::error!("Server task panicked: {}", e);
                    first_error = Some(io::Error::new(io::ErrorKind::Other, e.to_string()));
                }
                _ => {}
            }
        }
        _ = &mut shutdown => {
            tracing::info!("Shutdown signal received");
        }
    }

    let _ = shutdown_tx.send(());
    server_handle.stop(true).await;
    tasks.shutdown().await;
    tracing::info!("payment-service shut down");

    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
