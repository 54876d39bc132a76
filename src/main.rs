use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use eyre::{Result, WrapErr};
use log::info;

mod cli;

use cli::Cli;
use ytsum::config::Config;
use ytsum::metadata::DataApiClient;
use ytsum::server::{self, AppState};
use ytsum::summarize::GeminiClient;
use ytsum::youtube::InnerTubeClient;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_default_env().init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref(), cli.port)?;

    // One client shared across providers for connection reuse
    let client = reqwest::Client::new();

    let state = AppState {
        captions: Arc::new(InnerTubeClient::new(client.clone())),
        metadata: Arc::new(DataApiClient::new(client.clone(), config.youtube_api_key.clone())),
        summarizer: Arc::new(GeminiClient::new(
            client,
            config.gemini_api_key.clone(),
            config.model.clone(),
        )),
        default_lang: config.default_lang.clone(),
    };

    let app = server::router(state);

    let addr = SocketAddr::new(cli.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("binding to {addr}"))?;
    info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await
        .wrap_err("running API server")?;

    Ok(())
}
