/// Event Emitter (§4.5): the single process-wide sink for Added/Executed/
/// Deleted events, serialized so concurrent workers across instruments never
/// interleave partial records on the wire.
use crate::application::transport::EventSink;
use tokio::sync::mpsc;

pub struct EventEmitter<S: EventSink> {
    sink: S,
}

impl<S: EventSink> EventEmitter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub async fn run(mut self, mut inbox: mpsc::Receiver<crate::domain::Event>) {
        tracing::debug!("event emitter started");
        while let Some(event) = inbox.recv().await {
            if let Err(err) = self.sink.write_event(event).await {
                tracing::error!(error = %err, "event sink write failed, event dropped");
            }
        }
        tracing::debug!("event emitter inbox closed, exiting");
    }
}
