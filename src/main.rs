use std::sync::Arc;

use actix_governor::Governor;
use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod models;
mod routes;
mod service;
mod store;
mod utils;

use config::{Config, StoreBackend};
use db::Database;
use service::{AttendanceService, EmployeeService};
use store::{HrStore, InMemoryStore, MySqlStore};

use crate::docs::ApiDoc;
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

fn build_store(backend: &StoreBackend) -> Arc<dyn HrStore> {
    match backend {
        StoreBackend::MySql {
            database_url,
            max_connections,
        } => Arc::new(MySqlStore::new(Database::new(
            database_url.clone(),
            *max_connections,
        ))),
        StoreBackend::Memory => {
            warn!("Using the in-memory store, data is lost on shutdown");
            Arc::new(InMemoryStore::new())
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let store = build_store(&config.store);
    store.open().await.context("failed to open the store")?;

    let employees = Data::new(EmployeeService::new(store.clone()));
    let attendance = Data::new(AttendanceService::new(store.clone()));

    // One limiter config shared by every worker so the budget is per process.
    let governor_conf = routes::build_limiter_config(config.rate_per_min)?;
    let api_prefix = config.api_prefix.clone();

    let served = HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(employees.clone())
            .app_data(attendance.clone())
            .configure(|cfg| routes::configure(cfg, &api_prefix))
    })
    .bind(&config.server_addr)
    .with_context(|| format!("failed to bind {}", config.server_addr))?
    .run()
    .await;

    store.close().await;
    info!("Server stopped");

    served?;
    Ok(())
}
