use crate::config::Config;
use crate::impls::{LocalExtractor, RemoteApi};
use actix_rt::signal::unix;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use futures_lite::FutureExt;
use media_processors::{
    CancellationToken, Downloader, MediaApi, MediaEngine, MetadataResolver, RemoteAcquirer,
    SearchBackend, SearchResolver,
};
use media_providers::{ApiClient, YtDlpClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

mod config;
mod http;
mod impls;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let mut terminate = unix::signal(unix::SignalKind::terminate())?;
    let mut interrupt = unix::signal(unix::SignalKind::interrupt())?;

    dotenv::dotenv().ok();
    env_logger::init();

    let config = Arc::from(Config::from_env());

    info!(version = VERSION, "Starting application...");

    let local_extractor = Arc::new(LocalExtractor::new(
        YtDlpClient::create(config.ytdlp_path.clone(), config.downloads_dir.clone())
            .with_cookies(config.cookie_files())
            .with_proxy(config.proxy.clone())
            .with_timeouts(
                Duration::from_secs(config.search_timeout),
                Duration::from_secs(config.download_timeout),
            ),
    ));

    let remote_api = config.api_credentials().map(|(api_url, api_key)| {
        let client = ApiClient::create(
            api_url,
            api_key,
            Duration::from_secs(config.http_timeout),
        )
        .expect("Unable to initialize remote API client");

        info!(base_url = client.base_url(), "Remote API is enabled");

        Arc::new(RemoteApi::new(client))
    });

    if remote_api.is_none() {
        warn!("API_URL or API_KEY is missing, only yt-dlp will be used");
    }

    let search_resolver = SearchResolver::new(
        remote_api
            .clone()
            .map(|api| api as Arc<dyn SearchBackend>),
        local_extractor.clone(),
    );
    let remote_acquirer = remote_api.map(|api| {
        RemoteAcquirer::new(
            api as Arc<dyn MediaApi>,
            config.poll_settings(),
            config.downloads_dir.clone(),
        )
    });
    let downloader = Downloader::new(
        config.downloads_dir.clone(),
        remote_acquirer,
        local_extractor,
    );

    let engine = Arc::new(MediaEngine::new(
        MetadataResolver::new(search_resolver),
        downloader,
    ));
    let shutdown_token = CancellationToken::new();

    let shutdown_timeout = config.shutdown_timeout;
    let bind_address = config.bind_address.clone();

    let server = HttpServer::new({
        let shutdown_token = shutdown_token.clone();

        move || {
            App::new()
                .app_data(Data::new(Arc::clone(&engine)))
                .app_data(Data::new(shutdown_token.clone()))
                .configure(http::configure)
        }
    })
    .shutdown_timeout(shutdown_timeout)
    .bind(bind_address)?
    .run();

    let server_handle = server.handle();

    actix_rt::spawn({
        async move {
            if let Err(error) = server.await {
                error!(?error, "Error on http server");
            }
        }
    });

    info!("Application started");

    interrupt.recv().or(terminate.recv()).await;

    info!("Received shutdown signal. Shutting down gracefully...");

    shutdown_token.cancel();
    server_handle.stop(true).await;

    Ok(())
}
