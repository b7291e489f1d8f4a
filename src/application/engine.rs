/// Top-level wiring: spawns the Router and the Event Emitter and exposes the
/// two handles a transport needs -- a place to submit Jobs and a place new
/// Client Readers attach to.
use crate::application::event_emitter::EventEmitter;
use crate::application::job::Job;
use crate::application::router::Router;
use crate::application::transport::EventSink;
use crate::domain::Event;
use crate::shared::config::EngineConfig;
use tokio::sync::mpsc;

pub struct Engine {
    pub router_tx: mpsc::Sender<Job>,
}

impl Engine {
    /// Spawns the Router and an Event Emitter over `sink`, returning a handle
    /// that accepting code (the CLI's connection loop) hands to each new
    /// `ClientReader`.
    pub fn spawn<S>(config: EngineConfig, sink: S) -> Self
    where
        S: EventSink + 'static,
    {
        let (event_tx, event_rx) = mpsc::channel::<Event>(config.channel_capacity);
        let emitter = EventEmitter::new(sink);
        tokio::spawn(emitter.run(event_rx));

        let router_tx = Router::spawn(config, event_tx);
        Self { router_tx }
    }

    pub fn router_handle(&self) -> mpsc::Sender<Job> {
        self.router_tx.clone()
    }
}
