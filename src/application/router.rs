/// Router (§4.2): the single process-wide task that owns the order id ->
/// instrument directory and lazily spawns an Instrument Coordinator on first
/// sight of a new instrument symbol.
use crate::application::coordinator::Coordinator;
use crate::application::job::Job;
use crate::domain::model::{Command, Event, Instrument, OrderId};
use crate::shared::config::EngineConfig;
use crate::shared::get_fast_timestamp;
use std::collections::HashMap;
use tokio::sync::mpsc;

pub struct Router {
    config: EngineConfig,
    event_tx: mpsc::Sender<Event>,
    directory: HashMap<OrderId, Instrument>,
    coordinators: HashMap<Instrument, mpsc::Sender<Job>>,
}

impl Router {
    pub fn new(config: EngineConfig, event_tx: mpsc::Sender<Event>) -> Self {
        Self {
            config,
            event_tx,
            directory: HashMap::new(),
            coordinators: HashMap::new(),
        }
    }

    /// Spawns the router task, returning the Job sender Client Readers submit onto.
    pub fn spawn(config: EngineConfig, event_tx: mpsc::Sender<Event>) -> mpsc::Sender<Job> {
        let capacity = config.channel_capacity;
        let router = Router::new(config, event_tx);
        let (tx, rx) = mpsc::channel(capacity);
        tokio::spawn(router.run(rx));
        tx
    }

    pub async fn run(mut self, mut inbox: mpsc::Receiver<Job>) {
        tracing::debug!("router started");
        while let Some(job) = inbox.recv().await {
            self.handle(job).await;
        }
        tracing::debug!("router inbox closed, exiting");
    }

    async fn handle(&mut self, job: Job) {
        match &job.command {
            Command::Buy(order) | Command::Sell(order) => {
                let instrument = order.instrument.clone();
                let order_id = order.order_id;
                self.directory.insert(order_id, instrument.clone());
                let tx = self.coordinator_for(instrument);
                if tx.send(job).await.is_err() {
                    crate::shared::EngineError::abort_on_invariant_violation(
                        "coordinator inbox closed while the router was still dispatching",
                    );
                }
            }
            Command::Cancel { order_id } => {
                let order_id = *order_id;
                let existing = self.directory.get(&order_id).cloned();
                match existing {
                    Some(instrument) => {
                        let tx = self
                            .coordinators
                            .get(&instrument)
                            .cloned()
                            .unwrap_or_else(|| {
                                crate::shared::EngineError::abort_on_invariant_violation(
                                    "directory points at an instrument with no coordinator",
                                )
                            });
                        if tx.send(job).await.is_err() {
                            crate::shared::EngineError::abort_on_invariant_violation(
                                "coordinator inbox closed while the router was routing a cancel",
                            );
                        }
                    }
                    None => {
                        let timestamp = get_fast_timestamp();
                        let _ = self
                            .event_tx
                            .send(Event::Deleted {
                                order_id,
                                accepted: false,
                                timestamp,
                            })
                            .await;
                        job.acknowledge();
                    }
                }
            }
        }
    }

    fn coordinator_for(&mut self, instrument: Instrument) -> mpsc::Sender<Job> {
        self.coordinators
            .entry(instrument.clone())
            .or_insert_with(|| {
                tracing::info!(instrument = %instrument, "spawning instrument coordinator");
                Coordinator::spawn(instrument, &self.config, self.event_tx.clone())
            })
            .clone()
    }
}
