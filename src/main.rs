mod config;
mod controller;
mod image;
mod repository;
mod routes;
mod storage;
mod utils;


#[macro_use]
extern crate tracing;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use mimalloc::MiMalloc;
use poem::endpoint::BoxEndpoint;
use poem::listener::TcpListener;
use poem::middleware::{Cors, Tracing};
use poem::{EndpointExt, IntoResponse, Route, Server};
use poem_openapi::OpenApiService;
use tracing_subscriber::EnvFilter;

use crate::config::RuntimeConfig;
use crate::controller::ImageController;
use crate::routes::ImagesApi;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct ServerConfig {
    #[clap(long, default_value = "127.0.0.1", env = "HOST")]
    /// The binding host address of the server.
    host: String,

    #[clap(long, default_value = "8080", env = "PORT")]
    port: u16,

    #[clap(long, env = "CONFIG_FILE")]
    /// The file path to a given config file.
    ///
    /// This can be either a JSON formatted config or YAML.
    config_file: PathBuf,

    #[clap(long, default_value = "info", env = "LOG_LEVEL")]
    /// The log filter directive, e.g. `info` or `picstore=debug,poem=info`.
    log_level: String,
}

/// Builds the full route table with its middleware.
///
/// CORS wraps everything else so error responses carry its headers too.
pub fn build_app(api: ImagesApi) -> BoxEndpoint<'static> {
    let api_service = OpenApiService::new(
        api,
        "File Management",
        env!("CARGO_PKG_VERSION"),
    )
    .description("A file management server storing uploaded images.");

    Route::new()
        .nest("/api/v1", api_service)
        .with(Tracing)
        .catch_all_error(|err| async move { err.into_response() })
        .with(Cors::new())
        .map_to_response()
        .boxed()
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: ServerConfig = ServerConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log_level)?)
        .init();

    let cfg = RuntimeConfig::from_file(&args.config_file).await?;

    let storage = cfg.backend.connect().await?;
    let repository = cfg.database.connect().await?;
    let api = ImagesApi::new(storage, ImageController::new(repository))
        .with_upload_limit(cfg.max_upload_bytes());

    let app = build_app(api);

    let bind = format!("{}:{}", args.host, args.port);
    info!("Picstore is listening on http://{}", &bind);

    Server::new(TcpListener::bind(bind))
        .run(app)
        .await?;

    Ok(())
}
