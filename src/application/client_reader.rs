/// Client Reader (§4.1): one per connected client. Reads one command at a
/// time, submits it to the Router as a Job, and waits for the completion
/// handle before reading the next one -- the source of per-client ordering.
use crate::application::job::Job;
use crate::application::transport::CommandSource;
use tokio::sync::{mpsc, oneshot};

pub struct ClientReader<S: CommandSource> {
    source: S,
    router_tx: mpsc::Sender<Job>,
}

impl<S: CommandSource> ClientReader<S> {
    pub fn new(source: S, router_tx: mpsc::Sender<Job>) -> Self {
        Self { source, router_tx }
    }

    pub async fn run(mut self) {
        loop {
            match self.source.read_command().await {
                Ok(Some(command)) => {
                    let (ack_tx, ack_rx) = oneshot::channel();
                    let job = Job::new(command, ack_tx);
                    if self.router_tx.send(job).await.is_err() {
                        tracing::warn!("router inbox closed, dropping client connection");
                        return;
                    }
                    // Block until this job completes before reading the next
                    // command -- in-flight jobs already submitted still run to
                    // completion even if we never learn the outcome (§5).
                    let _ = ack_rx.await;
                }
                Ok(None) => {
                    tracing::debug!("client stream reached EOF, closing connection");
                    return;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "client read error, closing connection");
                    return;
                }
            }
        }
    }
}
