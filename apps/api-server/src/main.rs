//! # Quill API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer};
use tracing_actix_web::TracingLogger;

use quill_api::telemetry::{TelemetryConfig, init_telemetry};
use quill_api::{AppConfig, AppState, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!("Starting Quill API Server on {}:{}", config.host, config.port);

    let state = AppState::new(&config).await;

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .configure(handlers::configure_app(state.clone()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
