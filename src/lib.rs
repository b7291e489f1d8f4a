// jemalloc measurably outperforms the system allocator under the allocation
// pattern a resting-order churn workload produces.
#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

// Hexagonal layering, dependencies flow one way:
// interfaces -> application -> domain <- infrastructure

/// Domain Layer - pure matching logic, zero I/O dependencies.
pub mod domain;

/// Application Layer - the concurrency pipeline (Router, Coordinator, Side Worker, ...).
pub mod application;

/// Infrastructure Layer - the concrete TCP + bincode transport.
pub mod infrastructure;

/// Shared - wire protocol, symbol interning, timestamps, errors, config.
pub mod shared;

/// Interfaces - the CLI entry point.
pub mod interfaces;

pub use application::Engine;
pub use domain::{Command, Event, NewOrder, OrderId, RestingOrder, Side};
pub use shared::config::EngineConfig;
pub use shared::error::EngineError;
