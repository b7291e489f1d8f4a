/// Minimal standalone server: spawns an `Engine` with a stdout event sink and
/// accepts client connections on a fixed address, without the CLI's flag
/// parsing or logging setup. Run `demo_client` against it to see the pipeline
/// in action end to end.
use limit_matching_engine::application::Engine;
use limit_matching_engine::infrastructure::network::{accept_loop, FramedEventSink};
use limit_matching_engine::shared::config::EngineConfig;
use limit_matching_engine::shared::symbol_pool::SymbolPool;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = EngineConfig::default();
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .expect("failed to bind listener");

    println!("listening on {}", config.listen_addr);

    let symbol_pool = Arc::new(SymbolPool::new());
    let event_sink = FramedEventSink::new(tokio::io::stdout());
    let engine = Engine::spawn(config, event_sink);

    accept_loop(listener, engine.router_handle(), symbol_pool).await;
}
