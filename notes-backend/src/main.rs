use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

mod config;
mod controllers;
mod notes;

use config::{Config, CorsOrigins};
use notes::NoteStore;

pub struct AppState {
    pub store: Arc<NoteStore>,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

fn build_cors(origins: &CorsOrigins) -> Cors {
    let cors = match origins {
        CorsOrigins::Any => Cors::default().allow_any_origin(),
        CorsOrigins::List(list) => list
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin)),
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(3600)
}

/// Built client directory, if configured and it contains an index.html
fn client_dist(config: &Config) -> Option<PathBuf> {
    let dir = config.client_dist_dir.as_ref()?;
    if dir.join("index.html").exists() {
        Some(dir.clone())
    } else {
        log::warn!(
            "Client dist not found at {} - static file serving disabled",
            dir.display()
        );
        None
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Notes backend v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();

    let store = Arc::new(NoteStore::new(config.data_path.clone()));
    log::info!("Initializing note store at {}", store.data_path().display());
    if let Err(e) = store.initialize() {
        log::error!("Failed to initialize note store: {}", e);
        return Err(std::io::Error::other(e));
    }

    let frontend_dist = client_dist(&config);
    if let Some(dir) = &frontend_dist {
        log::info!("Serving client from: {}", dir.display());
    }

    let started_at = Instant::now();
    let bind = (config.bind_address.clone(), config.port);
    let cors_origins = config.cors_origins.clone();

    log::info!("Server is running on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let mut app = App::new()
            .app_data(web::Data::new(AppState {
                store: Arc::clone(&store),
                started_at,
            }))
            .app_data(controllers::json_config())
            .app_data(controllers::query_config())
            .wrap(Logger::default())
            .wrap(build_cors(&cors_origins))
            .configure(controllers::health::config_routes)
            .configure(controllers::notes::config);

        // Serve the client with an index.html fallback for client-side routes
        if let Some(dir) = &frontend_dist {
            let index = dir.join("index.html");
            app = app.service(
                Files::new("/", dir.clone())
                    .index_file("index.html")
                    .default_handler(web::to(move || {
                        let index = index.clone();
                        async move { NamedFile::open_async(index).await }
                    })),
            );
        }

        app.default_service(web::to(controllers::route_not_found))
    })
    .bind(bind)?
    .run()
    .await?;

    log::info!("Shutdown complete");
    Ok(())
}
