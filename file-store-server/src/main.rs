use actix_web::{web, App, HttpServer};
use clap::Parser;
use file_store_server::params::Args;
use file_store_server::{configure, AppState, FileStoreApi};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = args
        .shared_blob_store()
        .await
        .map_err(|e| std::io::Error::other(format!("failed to open blob store: {}", e)))?;

    let state = web::Data::new(AppState::new(FileStoreApi::new(store, args.locale)));

    tracing::info!("listening on {}", args.http_addr);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure)
    })
        .bind(args.http_addr.clone())?
        .run()
        .await
}
