use actix_web::http::header;
use actix_web::middleware::{DefaultHeaders, Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use std::sync::Arc;
use std::time::Duration;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod routes;
mod store;
mod utils;

use config::{Config, StoreBackend};
use db::{init_db, init_schema};
use store::{EmployeeStore, InMemoryEmployeeStore, MySqlEmployeeStore};

use crate::docs::ApiDoc;
use anyhow::Context;
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn EmployeeStore>> {
    match config.store_backend {
        StoreBackend::MySql => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;
            let pool = init_db(database_url, config.db_max_connections).await?;
            init_schema(&pool).await?;
            Ok(Arc::new(MySqlEmployeeStore::new(pool)))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory employee store, data is lost on shutdown");
            let store = if config.seed_demo_data {
                InMemoryEmployeeStore::with_demo_data()
            } else {
                InMemoryEmployeeStore::new()
            };
            Ok(Arc::new(store))
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(backend = ?config.store_backend, "Server starting...");

    let store = Data::from(build_store(&config).await?);

    let server_addr = config.server_addr.clone();
    let api_prefix = config.api_prefix.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add((header::CONTENT_TYPE, "application/json")))
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(store.clone())
            .configure(|cfg| routes::configure(cfg, &api_prefix))
    })
    .client_request_timeout(Duration::from_secs(config.request_timeout_secs))
    .keep_alive(Duration::from_secs(config.keep_alive_secs))
    .client_disconnect_timeout(Duration::from_secs(config.disconnect_timeout_secs))
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run()
    .await?;

    Ok(())
}
