use actix_web::{web, App, HttpServer};
use parcel_backend::config::app::AppConfig;
use parcel_backend::config::db::DbKind;
use parcel_backend::infra::state::build_state;
use parcel_backend::middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
use parcel_backend::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker-compose env_file, or `set -a; . ./.env; set +a` locally).
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_db(DbKind::Postgres)
        .with_security(config.security.clone())
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    // Shares the pool with the served state; used to close it after shutdown.
    let shutdown_state = app_state.clone();
    let data = web::Data::new(app_state);

    info!(host = %config.host, port = config.port, "ParcelPro server listening");

    let served = HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    if let Err(e) = shutdown_state.close().await {
        error!(error = %e, "failed to close database pool");
    }
    info!("server stopped");

    served
}
