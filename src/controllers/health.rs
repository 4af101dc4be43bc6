use actix_web::{HttpResponse, Responder, web};

use crate::AppState;
use crate::config::StoreBackend;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/health").route(web::get().to(health_check)));
    cfg.service(web::resource("/api/version").route(web::get().to(get_version)));
    cfg.service(web::resource("/api/health/config").route(web::get().to(get_config_status)));
}

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": VERSION
    }))
}

async fn get_version() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "version": VERSION
    }))
}

async fn get_config_status(state: web::Data<AppState>) -> impl Responder {
    let store_backend = match state.config.store_backend {
        StoreBackend::Sqlite => "sqlite",
        StoreBackend::JsonFile => "json",
    };

    HttpResponse::Ok().json(serde_json::json!({
        "store_backend": store_backend,
        "port": state.config.port
    }))
}
