use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::Parser;
use pressroom_core::{
    ClientConfig, DashboardApi, HttpDashboardApi,
    config::{DEFAULT_API_BASE_URL, DEFAULT_MEDIA_BASE_URL},
};
use tracing_subscriber::EnvFilter;

use crate::app::App;

mod app;

#[derive(Parser)]
#[command(name = "pressroom")]
#[command(about = "Browse processed press conferences and daily digests, and ask the archive")]
struct Cli {
    /// Origin of the backend API
    #[arg(long, env = "PRESSROOM_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    /// Origin that serves digest audio and other media files
    #[arg(long, env = "PRESSROOM_MEDIA_BASE_URL", default_value = DEFAULT_MEDIA_BASE_URL)]
    media_base_url: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ClientConfig::new(&cli.api_base_url, &cli.media_base_url)?;
    let api: Arc<dyn DashboardApi> = Arc::new(HttpDashboardApi::new(config.clone())?);
    tracing::info!(api = config.api_base_url(), "starting dashboard");

    iced::application(
        move || App::new(api.clone(), config.clone()),
        App::update,
        App::view,
    )
    .title("Pressroom")
    .subscription(App::subscription)
    .run()
    .map_err(|err| anyhow!("dashboard window failed: {err}"))
}
