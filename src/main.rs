use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware::Logger, web};
use dotenv::dotenv;
use std::sync::Arc;

mod config;
mod controllers;
mod models;
mod store;

use config::{Config, StoreBackend};
use store::{JsonFileStore, PointStore, SqliteStore};

pub struct AppState {
    pub store: Arc<dyn PointStore>,
    pub config: Config,
}

/// Build the configured point store backend.
fn build_store(config: &Config) -> Result<Arc<dyn PointStore>, store::StoreError> {
    match config.store_backend {
        StoreBackend::Sqlite => {
            log::info!("Initializing SQLite point store at {}", config.database_url);
            Ok(Arc::new(SqliteStore::new(&config.database_url)?))
        }
        StoreBackend::JsonFile => {
            log::info!("Initializing JSON file point store at {}", config.data_file);
            Ok(Arc::new(JsonFileStore::new(&config.data_file)))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("Pinmap backend v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    let port = config.port;

    let store = build_store(&config).expect("Failed to initialize point store");

    let public_dir = config::public_dir();
    if std::path::Path::new(&public_dir).exists() {
        log::info!("Serving map client from: {}", public_dir);
    } else {
        log::warn!("Public dir {} not found - static file serving disabled", public_dir);
    }

    log::info!("Starting server on port {}", port);

    let app_store = store.clone();
    let app_config = config.clone();

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let mut app = App::new()
            .app_data(web::Data::new(AppState {
                store: Arc::clone(&app_store),
                config: app_config.clone(),
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::locations::config);

        let public_dir = config::public_dir();
        if std::path::Path::new(&public_dir).exists() {
            app = app.service(Files::new("/", public_dir).index_file("index.html"));
        }

        app
    })
    .bind(("0.0.0.0", port))?
    .run();

    let server_handle = server.handle();

    // Ctrl+C handler for clean shutdown
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        log::info!("Received Ctrl+C, shutting down...");
        server_handle.stop(true).await;
        log::info!("Shutdown complete");
    });

    server.await
}
