use std::path::PathBuf;

use anyhow::Context;
use calcapp_core::EngineKind;
use calcapp_server::{build_service, serve, ServerConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "calcapp-server",
    version,
    about = "Evaluate mathematical expressions over HTTP"
)]
struct Args {
    /// YAML config file; environment and flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    bind: Option<String>,

    /// Engine kind: command, http or fake
    #[arg(long)]
    engine: Option<EngineKind>,

    /// Program run by the command engine
    #[arg(long)]
    engine_command: Option<String>,

    /// Endpoint called by the http engine
    #[arg(long)]
    engine_url: Option<String>,

    /// Per-call engine deadline in seconds (0 disables)
    #[arg(long)]
    engine_timeout_secs: Option<u64>,

    /// Log format
    #[arg(long, env = "CALCAPP_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LogFormat {
    Text,
    Json,
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn resolve_config(args: &Args) -> anyhow::Result<ServerConfig> {
    let base = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    let mut config = base.merge_env();

    if let Some(bind) = &args.bind {
        config.bind = bind.clone();
    }
    if let Some(kind) = args.engine {
        config.engine.kind = kind;
    }
    if let Some(command) = &args.engine_command {
        config.engine.command = command.clone();
    }
    if let Some(url) = &args.engine_url {
        config.engine.url = Some(url.clone());
    }
    if let Some(secs) = args.engine_timeout_secs {
        config.engine.timeout_secs = secs;
    }
    Ok(config)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_format);

    let config = resolve_config(&args)?;
    let service = build_service(&config)?;
    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    serve(listener, service, shutdown_signal()).await?;
    Ok(())
}
