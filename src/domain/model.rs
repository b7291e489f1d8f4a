/// Core domain types for the matching engine
///
/// These types have zero dependency on tokio, serde, or any transport --
/// they are the vocabulary the domain and application layers share.
use std::sync::Arc;

/// Order id, supplied by the client and assumed unique across the process lifetime.
pub type OrderId = u32;

/// Opaque instrument symbol, interned via `crate::shared::symbol_pool` at the edge.
pub type Instrument = Arc<str>;

/// Which book side an order was submitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side that rests an order of `self` once it fails to fully match on arrival.
    ///
    /// A Buy that cannot fully match rests on the sell-side worker's queue (see
    /// the clarifying note in the coordinator docs); a Sell rests on the buy-side worker.
    pub fn resting_side(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// A parsed client command. The framing/parsing that produces this is an external
/// collaborator (§6); nothing in `domain` or `application` constructs one from bytes.
#[derive(Debug, Clone)]
pub enum Command {
    Buy(NewOrder),
    Sell(NewOrder),
    Cancel { order_id: OrderId },
}

impl Command {
    pub fn order_id(&self) -> OrderId {
        match self {
            Command::Buy(o) | Command::Sell(o) => o.order_id,
            Command::Cancel { order_id } => *order_id,
        }
    }
}

/// A new Buy or Sell request. `price` and `count` are validated non-zero upstream
/// (see `domain::validation`) before a `Command::Buy`/`Command::Sell` is ever constructed.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_id: OrderId,
    pub instrument: Instrument,
    pub price: u32,
    pub count: u32,
}

/// An order in flight through the side worker's matching loop. Carries the residual
/// count as matching proceeds; once matching stops it is either fully filled or
/// forwarded to the opposite worker to become a `RestingOrder`.
#[derive(Debug, Clone)]
pub struct InFlightOrder {
    pub order_id: OrderId,
    pub instrument: Instrument,
    pub side: Side,
    pub price: u32,
    pub remaining: u32,
}

/// The residual of an order that did not fully match on arrival, now sitting in a
/// side worker's priority queue awaiting a counter-side match.
#[derive(Debug, Clone)]
pub struct RestingOrder {
    pub order_id: OrderId,
    pub instrument: Instrument,
    pub side: Side,
    pub price: u32,
    pub remaining: u32,
    pub arrival_timestamp: u64,
    /// Starts at 1, incremented after each Executed event naming this order.
    pub execution_counter: u32,
}

impl RestingOrder {
    pub fn is_live(&self) -> bool {
        self.remaining > 0
    }
}

/// Result events the engine emits, one (or more, for Executed) per acknowledged Job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Added {
        order_id: OrderId,
        side: Side,
        instrument: Instrument,
        price: u32,
        count: u32,
        timestamp: u64,
    },
    Executed {
        resting_order_id: OrderId,
        incoming_order_id: OrderId,
        execution_count: u32,
        price: u32,
        count: u32,
        timestamp: u64,
    },
    Deleted {
        order_id: OrderId,
        accepted: bool,
        timestamp: u64,
    },
}
