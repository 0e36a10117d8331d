use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use lifecycle_service::db::StatusRepository;
use lifecycle_service::registry::RedisStreamRegistry;
use lifecycle_service::services::{ArchiveReporter, LifecycleService, SignatureVerifier};
use lifecycle_service::{handlers, metrics, Config};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    let redis_client =
        redis::Client::open(config.redis.url.as_str()).context("Invalid REDIS_URL")?;
    let redis_manager = redis_client
        .get_connection_manager()
        .await
        .context("Failed to connect Redis")?;

    let verifier = SignatureVerifier::new(
        config.signature_rpc.endpoint.clone(),
        Duration::from_secs(config.signature_rpc.timeout_secs),
    )
    .context("Failed to build signature rpc client")?;

    let reporter = ArchiveReporter::new(
        config.archive_api.endpoint.clone(),
        config.archive_api.server_name.clone(),
        Duration::from_secs(config.archive_api.timeout_secs),
    )
    .context("Failed to build archive api client")?;

    let service = web::Data::new(LifecycleService::new(
        Arc::new(StatusRepository::new(db_pool)),
        Arc::new(RedisStreamRegistry::new(redis_manager)),
        verifier,
        reporter,
        config.cdn.base_url.clone(),
    ));

    let bind_addr = format!("{}:{}", config.app.host, config.app.port);
    info!(%bind_addr, "lifecycle-service starting");

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .service(
                web::scope("/api/v1/streams")
                    .route("/live", web::post().to(handlers::set_live_status))
                    .route("/transcode", web::post().to(handlers::set_transcode_status))
                    .route("/archive", web::post().to(handlers::save_archive))
                    .route("/verify", web::post().to(handlers::verify_signature))
                    .route("/{channel_id}/archive", web::get().to(handlers::check_archive)),
            )
            .route("/health", web::get().to(handlers::health))
            .route("/metrics", web::get().to(metrics::serve_metrics))
    })
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind on {bind_addr}"))?
    .run()
    .await
    .context("HTTP server error")?;

    Ok(())
}
