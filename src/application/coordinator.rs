/// Instrument Coordinator (§4.3): one per instrument, spawned lazily by the
/// Router. Serializes commands for its instrument and runs the handoff barrier
/// that lets the two side workers run in parallel except at a potential cross.
use crate::application::job::Job;
use crate::application::side_job::SideJob;
use crate::application::side_worker::SideWorker;
use crate::domain::model::{Command, Event, InFlightOrder, Instrument, NewOrder, OrderId, Side};
use crate::shared::config::EngineConfig;
use crate::shared::get_fast_timestamp;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, Semaphore};

pub struct Coordinator {
    instrument: Instrument,
    event_tx: mpsc::Sender<Event>,
    buy_tx: mpsc::Sender<SideJob>,
    sell_tx: mpsc::Sender<SideJob>,
    buy_ready: Arc<Semaphore>,
    sell_ready: Arc<Semaphore>,
    /// order id -> originating side, consulted to route a Cancel (§4.3).
    sides: HashMap<OrderId, Side>,
    current_buy_price: Option<u32>,
    current_sell_price: Option<u32>,
}

impl Coordinator {
    /// Spawns the coordinator task and its two side workers, returning the
    /// Job sender the Router dispatches this instrument's jobs onto.
    pub fn spawn(
        instrument: Instrument,
        config: &EngineConfig,
        event_tx: mpsc::Sender<Event>,
    ) -> mpsc::Sender<Job> {
        let (buy_tx, buy_rx) = mpsc::channel(config.channel_capacity);
        let (sell_tx, sell_rx) = mpsc::channel(config.channel_capacity);
        let buy_ready = Arc::new(Semaphore::new(1));
        let sell_ready = Arc::new(Semaphore::new(1));

        let buy_worker = SideWorker::new(
            Side::Buy,
            instrument.clone(),
            sell_tx.clone(),
            buy_ready.clone(),
            event_tx.clone(),
        );
        let sell_worker = SideWorker::new(
            Side::Sell,
            instrument.clone(),
            buy_tx.clone(),
            sell_ready.clone(),
            event_tx.clone(),
        );
        tokio::spawn(buy_worker.run(buy_rx));
        tokio::spawn(sell_worker.run(sell_rx));

        let coordinator = Coordinator {
            instrument: instrument.clone(),
            event_tx,
            buy_tx,
            sell_tx,
            buy_ready,
            sell_ready,
            sides: HashMap::new(),
            current_buy_price: None,
            current_sell_price: None,
        };

        let (inbox_tx, inbox_rx) = mpsc::channel(config.channel_capacity);
        tokio::spawn(coordinator.run(inbox_rx));
        inbox_tx
    }

    async fn run(mut self, mut inbox: mpsc::Receiver<Job>) {
        tracing::debug!(instrument = %self.instrument, "coordinator started");
        while let Some(job) = inbox.recv().await {
            let Job { command, ack } = job;
            match command {
                Command::Buy(order) => self.handle_new_order(Side::Buy, order, ack).await,
                Command::Sell(order) => self.handle_new_order(Side::Sell, order, ack).await,
                Command::Cancel { order_id } => self.handle_cancel(order_id, ack).await,
            }
        }
        tracing::debug!(instrument = %self.instrument, "coordinator inbox closed, exiting");
    }

    async fn handle_new_order(&mut self, side: Side, order: NewOrder, ack: oneshot::Sender<()>) {
        let (same_ready, same_tx, opposite_ready) = match side {
            Side::Buy => (
                self.buy_ready.clone(),
                self.buy_tx.clone(),
                self.sell_ready.clone(),
            ),
            Side::Sell => (
                self.sell_ready.clone(),
                self.sell_tx.clone(),
                self.buy_ready.clone(),
            ),
        };

        // Step 1: take the same-side token, serializing same-side dispatch (§4.3.1).
        same_ready
            .acquire()
            .await
            .expect("side-ready semaphore is never closed")
            .forget();

        // Step 2: record the originating side for later Cancel routing.
        self.sides.insert(order.order_id, side);

        // Step 3: would this order cross the in-flight opposite order?
        let crosses = match side {
            Side::Buy => self
                .current_sell_price
                .is_some_and(|sell_price| sell_price <= order.price),
            Side::Sell => self
                .current_buy_price
                .is_some_and(|buy_price| buy_price >= order.price),
        };

        let price = order.price;
        let in_flight = InFlightOrder {
            order_id: order.order_id,
            instrument: order.instrument,
            side,
            price: order.price,
            remaining: order.count,
        };

        if crosses {
            // Wait for the in-flight opposite order to finish its side-worker
            // processing before this order's worker reads the book (§4.3).
            opposite_ready
                .acquire()
                .await
                .expect("side-ready semaphore is never closed")
                .forget();
            self.dispatch(&same_tx, in_flight, ack).await;
            self.set_current_price(side, price);
            opposite_ready.add_permits(1);
        } else {
            self.dispatch(&same_tx, in_flight, ack).await;
            self.set_current_price(side, price);
        }
    }

    async fn dispatch(
        &self,
        same_tx: &mpsc::Sender<SideJob>,
        order: InFlightOrder,
        ack: oneshot::Sender<()>,
    ) {
        if same_tx.send(SideJob::Match { order, ack }).await.is_err() {
            crate::shared::EngineError::abort_on_invariant_violation(
                "side worker inbox closed while the coordinator was still dispatching",
            );
        }
    }

    fn set_current_price(&mut self, side: Side, price: u32) {
        match side {
            Side::Buy => self.current_buy_price = Some(price),
            Side::Sell => self.current_sell_price = Some(price),
        }
    }

    async fn handle_cancel(&mut self, order_id: OrderId, ack: oneshot::Sender<()>) {
        match self.sides.get(&order_id).copied() {
            Some(original_side) => {
                let target_tx = match original_side.resting_side() {
                    Side::Buy => &self.buy_tx,
                    Side::Sell => &self.sell_tx,
                };
                if target_tx.send(SideJob::Cancel { order_id, ack }).await.is_err() {
                    crate::shared::EngineError::abort_on_invariant_violation(
                        "side worker inbox closed while the coordinator was routing a cancel",
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
                let _ = ack.send(());
            }
        }
    }
}
