use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use booksnap_app::Orchestrator;
use booksnap_provider::Anthropic;
use booksnap_server::{router, AppState, RateLimiter};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Placeholder value shipped in .env examples; treated the same as an unset
/// key.
const UNCONFIGURED_KEY_PLACEHOLDER: &str = "your_new_api_key_here";

#[derive(Debug, Parser)]
#[command(name = "booksnap-server", about = "Book summary web service")]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3001)]
    port: u16,

    /// Provider API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Affiliate tag appended to purchase links
    #[arg(long, env = "AMAZON_AFFILIATE_TAG", default_value = "thinkingroc0e-20")]
    affiliate_tag: String,

    /// Directory holding the prebuilt client assets
    #[arg(long, env = "CLIENT_DIST", default_value = "client/dist")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "booksnap_server=info,booksnap_app=info,booksnap_provider=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let orchestrator = match cli.api_key.as_deref() {
        Some(key) if !key.is_empty() && key != UNCONFIGURED_KEY_PLACEHOLDER => {
            let provider = Anthropic::builder().api_key(key).build()?;
            Some(Arc::new(Orchestrator::new(Arc::new(provider))))
        }
        _ => {
            tracing::warn!(
                "ANTHROPIC_API_KEY is not configured; summarize requests will be rejected"
            );
            None
        }
    };

    let state = AppState {
        orchestrator,
        affiliate_tag: cli.affiliate_tag.clone(),
        rate_limiter: RateLimiter::default(),
    };
    let app = router(state, &cli.static_dir);

    let listener = tokio::net::TcpListener::bind((cli.host.as_str(), cli.port)).await?;
    tracing::info!(host = %cli.host, port = cli.port, "BookSnap server listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
