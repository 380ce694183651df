use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use hris_engine::api::{AppState, create_router};
use hris_engine::config::ConfigLoader;
use hris_engine::service::HrService;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hris-server", version, about = "Serve the HRIS JSON API")]
struct Cli {
    /// Configuration directory holding app.yaml, accounts.yaml and seed.yaml
    #[arg(long, env = "HRIS_CONFIG", default_value = "./config/hris")]
    config: PathBuf,
    /// Socket address to listen on; overrides server.bind from app.yaml
    #[arg(long, env = "BIND")]
    bind: Option<String>,
}

/// The directives from `RUST_LOG` when set and parseable, otherwise `info`.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        ))
        .init();

    let cli = Cli::parse();

    let config = ConfigLoader::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?
        .into_config();
    let bind = cli
        .bind
        .unwrap_or_else(|| config.app().server.bind.clone());

    let service = HrService::from_config(&config).context("initialising HR service")?;
    let app = create_router(AppState::new(service));

    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("binding {}", bind))?;
    info!(
        "{} ({}) listening on http://{}",
        config.app().application.name,
        config.app().application.company,
        listener.local_addr()?
    );
    axum::serve(listener, app).await?;
    Ok(())
}
