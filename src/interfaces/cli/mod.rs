/// CLI Interface Module
///
/// The primary entry point when the engine runs as a standalone service:
/// parses flags into an `EngineConfig`, wires up logging, spawns the engine
/// with a stdout event sink, and accepts client connections over TCP.
use crate::application::Engine;
use crate::infrastructure::network::{accept_loop, FramedEventSink};
use crate::shared::config::EngineConfig;
use crate::shared::symbol_pool::SymbolPool;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;

/// Matching engine command-line configuration (§10.4).
#[derive(Parser, Debug, Clone)]
#[command(name = "matching-engine")]
#[command(version = "0.1.0")]
#[command(about = "Multi-threaded limit-order matching engine", long_about = None)]
pub struct CliConfig {
    /// Address the TCP command listener binds to.
    #[arg(short = 'a', long, default_value = "127.0.0.1:7878")]
    pub listen_addr: SocketAddr,

    /// Bound on every mpsc queue in the pipeline (§5).
    #[arg(short = 'q', long, default_value_t = 10_000)]
    pub channel_capacity: usize,

    /// `tracing` filter directive, e.g. "info", "debug", "matching_engine=trace".
    #[arg(short = 'l', long, default_value = "info")]
    pub log_level: String,

    /// Parse and log the configuration, then exit without starting the server.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

impl From<CliConfig> for EngineConfig {
    fn from(cli: CliConfig) -> Self {
        EngineConfig {
            channel_capacity: cli.channel_capacity,
            listen_addr: cli.listen_addr,
            log_level: cli.log_level,
        }
    }
}

/// Runs the CLI application: the process's `main` delegates straight here.
pub async fn run() {
    let cli = CliConfig::parse();
    init_logging(&cli.log_level);

    tracing::info!(?cli, "matching engine starting");

    if cli.dry_run {
        tracing::info!("dry run requested, exiting without starting the server");
        return;
    }

    let config: EngineConfig = cli.clone().into();
    let listener = match tokio::net::TcpListener::bind(config.listen_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, addr = %config.listen_addr, "failed to bind listener");
            std::process::exit(1);
        }
    };

    let symbol_pool = Arc::new(SymbolPool::new());
    let event_sink = FramedEventSink::new(tokio::io::stdout());
    let engine = Engine::spawn(config, event_sink);

    tracing::info!(addr = %cli.listen_addr, "listening for client connections");
    accept_loop(listener, engine.router_handle(), symbol_pool).await;
}

fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cli_config_matches_engine_defaults() {
        let cli = CliConfig::parse_from(["matching-engine"]);
        assert_eq!(cli.channel_capacity, 10_000);
        assert_eq!(cli.listen_addr.to_string(), "127.0.0.1:7878");
        assert_eq!(cli.log_level, "info");
        assert!(!cli.dry_run);
    }

    #[test]
    fn custom_flags_are_parsed() {
        let cli = CliConfig::parse_from([
            "matching-engine",
            "--listen-addr",
            "0.0.0.0:9000",
            "--channel-capacity",
            "256",
            "--log-level",
            "debug",
            "--dry-run",
        ]);
        assert_eq!(cli.listen_addr.to_string(), "0.0.0.0:9000");
        assert_eq!(cli.channel_capacity, 256);
        assert_eq!(cli.log_level, "debug");
        assert!(cli.dry_run);
    }

    #[test]
    fn converts_into_engine_config() {
        let cli = CliConfig::parse_from(["matching-engine", "--channel-capacity", "42"]);
        let config: EngineConfig = cli.into();
        assert_eq!(config.channel_capacity, 42);
    }
}
