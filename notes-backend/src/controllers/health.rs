use actix_web::{web, HttpResponse, Responder};
use notes_types::HealthStatus;

use crate::AppState;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health_check)));
    cfg.service(web::resource("/version").route(web::get().to(get_version)));
}

async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let uptime_secs = state.started_at.elapsed().as_secs();

    match state.store.count() {
        Ok(notes) => HttpResponse::Ok().json(HealthStatus {
            status: "ok".to_string(),
            version: VERSION.to_string(),
            notes,
            uptime_secs,
        }),
        Err(e) => {
            log::warn!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(HealthStatus {
                status: "unavailable".to_string(),
                version: VERSION.to_string(),
                notes: 0,
                uptime_secs,
            })
        }
    }
}

async fn get_version() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "version": VERSION
    }))
}
