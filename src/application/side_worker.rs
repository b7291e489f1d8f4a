/// Side Worker (§4.4): the per-side, per-instrument task that owns one price-time
/// priority queue and runs the matching algorithm against it.
use crate::application::side_job::SideJob;
use crate::domain::model::{Event, InFlightOrder, RestingOrder, Side};
use crate::domain::{match_incoming, RestingOrderQueue};
use crate::shared::get_fast_timestamp;
use tokio::sync::{mpsc, Semaphore};
use std::sync::Arc;

pub struct SideWorker {
    /// Which incoming side this worker matches (Buy for the buy-side worker).
    side: Side,
    instrument: crate::domain::Instrument,
    queue: RestingOrderQueue,
    /// Inbox of the opposite worker, used to forward unmatched residuals (§4.4(a)).
    opposite_tx: mpsc::Sender<SideJob>,
    /// This worker's own side-ready token, replenished after each Match job (§9).
    ready: Arc<Semaphore>,
    event_tx: mpsc::Sender<Event>,
}

impl SideWorker {
    pub fn new(
        side: Side,
        instrument: crate::domain::Instrument,
        opposite_tx: mpsc::Sender<SideJob>,
        ready: Arc<Semaphore>,
        event_tx: mpsc::Sender<Event>,
    ) -> Self {
        Self {
            side,
            instrument,
            queue: RestingOrderQueue::new(),
            opposite_tx,
            ready,
            event_tx,
        }
    }

    pub async fn run(mut self, mut inbox: mpsc::Receiver<SideJob>) {
        tracing::debug!(instrument = %self.instrument, side = ?self.side, "side worker started");
        while let Some(job) = inbox.recv().await {
            match job {
                SideJob::Match { order, ack } => self.handle_match(order, ack).await,
                SideJob::Rest { order, ack } => self.handle_rest(order, ack).await,
                SideJob::Cancel { order_id, ack } => self.handle_cancel(order_id, ack).await,
            }
        }
        tracing::debug!(instrument = %self.instrument, side = ?self.side, "side worker inbox closed, exiting");
    }

    async fn handle_match(&mut self, order: InFlightOrder, ack: tokio::sync::oneshot::Sender<()>) {
        let outcome = match_incoming(&mut self.queue, order, get_fast_timestamp);

        for event in outcome.executions {
            self.emit(event).await;
        }

        match outcome.residual {
            Some(residual) => {
                // The opposite worker rests this order and acknowledges the job.
                if self
                    .opposite_tx
                    .send(SideJob::Rest { order: residual, ack })
                    .await
                    .is_err()
                {
                    crate::shared::EngineError::abort_on_invariant_violation(
                        "opposite side worker inbox closed while forwarding a residual",
                    );
                }
            }
            None => {
                let _ = ack.send(());
            }
        }

        // Replenish so the coordinator can dispatch the next same-side order,
        // regardless of whether this order fully filled or was forwarded (§4.4(a)).
        self.ready.add_permits(1);
    }

    async fn handle_rest(&mut self, order: InFlightOrder, ack: tokio::sync::oneshot::Sender<()>) {
        let timestamp = get_fast_timestamp();
        let resting = RestingOrder {
            order_id: order.order_id,
            instrument: order.instrument.clone(),
            side: order.side,
            price: order.price,
            remaining: order.remaining,
            arrival_timestamp: timestamp,
            execution_counter: 1,
        };

        self.emit(Event::Added {
            order_id: resting.order_id,
            side: resting.side,
            instrument: resting.instrument.clone(),
            price: resting.price,
            count: resting.remaining,
            timestamp,
        })
        .await;

        self.queue.push(resting);
        let _ = ack.send(());
    }

    async fn handle_cancel(
        &mut self,
        order_id: crate::domain::OrderId,
        ack: tokio::sync::oneshot::Sender<()>,
    ) {
        let accepted = self.queue.cancel(order_id);
        let timestamp = get_fast_timestamp();
        self.emit(Event::Deleted {
            order_id,
            accepted,
            timestamp,
        })
        .await;
        let _ = ack.send(());
    }

    async fn emit(&self, event: Event) {
        if self.event_tx.send(event).await.is_err() {
            crate::shared::EngineError::abort_on_invariant_violation(
                "event emitter inbox closed while a side worker was still emitting",
            );
        }
    }
}
