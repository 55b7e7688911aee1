//! SkillCompass HTTP server
//!
//! Actix-web 기반 질문 검색 REST API

pub mod error;
pub mod routes;
pub mod state;
pub mod types;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use skillcompass_common::{AppConfig, Result};
use std::sync::Arc;
use tracing::{error, info};
use tracing_actix_web::TracingLogger;

pub use state::AppState;

/// Start the HTTP server
///
/// The corpus index is built in the background; search routes answer 503
/// until it has been published.
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let state = Arc::new(AppState::new(config));

    let builder = Arc::clone(&state);
    tokio::spawn(async move {
        if let Err(e) = builder.build_index().await {
            error!("Question search is unavailable: {}", e);
        }
    });

    info!("Starting HTTP server on {}", bind_addr);

    let data = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .service(web::scope("/api").configure(routes::configure))
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
