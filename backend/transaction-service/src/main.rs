/// Storefront Transaction Service - Main entry point
///
/// Runs the REST API and the pending-transaction expiry sweeper side by side.
use actix_middleware::JwtAuthMiddleware;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use crypto_core::JwtManager;
use db_pool::connect_mongo;
use std::io;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transaction_service::db::MongoTransactionRepository;
use transaction_service::jobs::run_expiry_sweeper;
use transaction_service::saga::PurchaseSaga;
use transaction_service::{handlers, Config, TransactionApp};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "transaction_service=info,actix_web=info,mongodb=warn".into());

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
    tracing::info!("Starting transaction-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        product_url = %config.upstreams.product_url,
        payment_url = %config.upstreams.payment_url,
        "Upstream services configured"
    );

    let jwt = Arc::new(JwtManager::new(&config.jwt.jwt_secret).context("Invalid JWT secret")?);
    let db = connect_mongo(&config.mongo, "transaction-service")
        .await
        .context("Failed to connect to MongoDB")?;
    let saga = PurchaseSaga::new(&config.upstreams).context("Failed to build HTTP client")?;

    let app = TransactionApp::new(
        Arc::new(MongoTransactionRepository::new(&db)),
        saga,
        config.store_timeout,
    );
    let sweeper_repo = app.repository();

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let app_data = web::Data::new(app);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_data.clone())
            .wrap(JwtAuthMiddleware::new(jwt.clone()))
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();
    tracing::info!("HTTP server listening on {}", bind_address);

    let server_handle = server.handle();
    let (shutdown_tx, _) = broadcast::channel(1);
    let sweeper_shutdown = shutdown_tx.subscribe();
    let sweep_interval = config.sweep_interval;
    let store_timeout = config.store_timeout;

    let mut tasks: JoinSet<io::Result<()>> = JoinSet::new();
    tasks.spawn(async move { server.await });
    tasks.spawn(async move {
        run_expiry_sweeper(sweeper_repo, sweep_interval, store_timeout, sweeper_shutdown).await;
        Ok(())
    });

    let mut first_error: Option<io::Error> = None;
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    tokio::select! {
        result = tasks.join_next() => {
            match result {
                Some(Ok(Err(e))) => {
                    tracing::error!("Task failed: {}", e);
                    first_error = Some(e);
                }
                Some(Err(e)) => {
                    tracing::error!("Task panicked: {}", e);
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
    tracing::info!("transaction-service shut down");

    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
