/// Domain Layer - Core Business Logic
///
/// This is the heart of the matching engine, containing pure business logic
/// with zero external dependencies. The domain layer is framework-agnostic
/// and can be tested in isolation.
///
/// ## Modules
/// - `model`: Command/Event/RestingOrder vocabulary shared by every layer
/// - `priority_queue`: the per-side price-time priority queue with lazy removal
/// - `matching`: the pure matching algorithm a side worker runs against it
/// - `validation`: business-rule validation for raw Buy/Sell requests
///
/// ## Principles
/// 1. **Pure Business Logic**: No I/O, no frameworks, no infrastructure
/// 2. **Framework Independent**: Can be used with any I/O or framework
/// 3. **Testable**: Easy to unit test without mocks

pub mod matching;
pub mod model;
pub mod priority_queue;
pub mod validation;

pub use matching::{match_incoming, MatchOutcome};
pub use model::{Command, Event, InFlightOrder, Instrument, NewOrder, OrderId, RestingOrder, Side};
pub use priority_queue::RestingOrderQueue;
