/// A `Command` in flight through the pipeline, plus the completion handle the
/// submitting Client Reader awaits before reading its next command (§3 "Job").
use crate::domain::Command;
use tokio::sync::oneshot;

#[derive(Debug)]
pub struct Job {
    pub command: Command,
    pub ack: oneshot::Sender<()>,
}

impl Job {
    pub fn new(command: Command, ack: oneshot::Sender<()>) -> Self {
        Self { command, ack }
    }

    /// Signals completion. The receiving end may already be gone if the client
    /// disconnected; that is not this job's problem (§5 cancellation & shutdown).
    pub fn acknowledge(self) {
        let _ = self.ack.send(());
    }
}
