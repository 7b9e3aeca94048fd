#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the crash map application.
//!
//! Loads the crash data snapshot once at startup and serves the REST API
//! for querying it. Each request is an independent, side-effect-free
//! computation over the shared immutable [`DataStore`], so workers need
//! no coordination beyond the `Arc`.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use crash_map_store::DataStore;

/// Default location of the crash data export.
pub const DEFAULT_DATA_PATH: &str = "data/df_site.csv";

/// Shared application state.
pub struct AppState {
    /// The immutable crash data snapshot.
    pub store: Arc<DataStore>,
}

/// Starts the crash map API server.
///
/// Initializes logging, loads the crash data snapshot from
/// `CRASH_MAP_DATA` (falling back to [`DEFAULT_DATA_PATH`]), and starts
/// the Actix-Web HTTP server on `BIND_ADDR:PORT`. This is a regular
/// async function — the caller is responsible for providing the async
/// runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if the crash data cannot be loaded (missing file or missing
/// required columns); startup aborts in that case.
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let data_path =
        std::env::var("CRASH_MAP_DATA").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string());

    log::info!("Loading crash data...");
    let store = DataStore::load(&data_path).expect("Failed to load crash data");

    let state = web::Data::new(AppState {
        store: Arc::new(store),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/options", web::get().to(handlers::options))
                    .route("/dashboard", web::get().to(handlers::dashboard)),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
