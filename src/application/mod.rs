/// Application Layer - the concurrency pipeline
///
/// This layer orchestrates `domain`'s pure matching logic into the five
/// execution contexts of §2/§4: Client Reader, Router, Instrument Coordinator,
/// Side Worker, Event Emitter. It depends on `domain` and on `tokio` for
/// scheduling and channels, but never on a concrete transport -- `transport`
/// defines the ports that `infrastructure::network` implements.
///
/// ## Modules
/// - `job` / `side_job`: the two job envelopes carried on the pipeline's queues
/// - `transport`: `CommandSource` / `EventSink` ports
/// - `router`, `coordinator`, `side_worker`: the three serialized execution contexts
/// - `client_reader`, `event_emitter`: the transport-facing edges
/// - `engine`: wiring that spawns the above and exposes a submission handle

pub mod client_reader;
pub mod coordinator;
pub mod engine;
pub mod event_emitter;
pub mod job;
pub mod router;
pub mod side_job;
pub mod side_worker;
pub mod transport;

pub use client_reader::ClientReader;
pub use engine::Engine;
pub use event_emitter::EventEmitter;
pub use job::Job;
pub use side_job::SideJob;
pub use transport::{CommandSource, EventSink};
