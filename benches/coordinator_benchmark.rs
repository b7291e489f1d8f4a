use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use limit_matching_engine::application::{Engine, EventSink, Job};
use limit_matching_engine::domain::{Command, Event, NewOrder};
use limit_matching_engine::shared::config::EngineConfig;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;

/// Discards every event; the handoff barrier's cost, not the emitter's, is
/// what this benchmark measures.
struct NullSink;

impl EventSink for NullSink {
    type Error = std::convert::Infallible;

    async fn write_event(&mut self, _event: Event) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn buy(order_id: u32, price: u32) -> Command {
    Command::Buy(NewOrder {
        order_id,
        instrument: Arc::from("GOOG"),
        price,
        count: 10,
    })
}

fn sell(order_id: u32, price: u32) -> Command {
    Command::Sell(NewOrder {
        order_id,
        instrument: Arc::from("GOOG"),
        price,
        count: 10,
    })
}

/// Submits `commands` one at a time, awaiting each job's ack before sending
/// the next, mirroring a single Client Reader's discipline.
async fn drive(router_tx: &tokio::sync::mpsc::Sender<Job>, commands: Vec<Command>) {
    for command in commands {
        let (ack_tx, ack_rx) = oneshot::channel();
        router_tx.send(Job::new(command, ack_tx)).await.unwrap();
        ack_rx.await.unwrap();
    }
}

fn contended_single_instrument_benchmark(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("coordinator handoff barrier");
    group.bench_function("500 alternating buy/sell on one instrument", |b| {
        b.to_async(&rt).iter_batched(
            || {
                let config = EngineConfig::default();
                let engine = Engine::spawn(config, NullSink);
                let commands: Vec<Command> = (0..500u32)
                    .map(|i| {
                        if i % 2 == 0 {
                            buy(i, 100 + (i % 10))
                        } else {
                            sell(i, 95 + (i % 10))
                        }
                    })
                    .collect();
                (engine.router_handle(), commands)
            },
            |(router_tx, commands)| async move {
                drive(&router_tx, commands).await;
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, contended_single_instrument_benchmark);
criterion_main!(benches);
