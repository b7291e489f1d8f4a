/// Wire protocol - the serde/bincode shapes that cross the network (§6)
///
/// These are deliberately a separate type family from `crate::domain::model`:
/// the wire frame is a flat, versionable shape keyed to the spec's semantic
/// layout, while the domain types carry interned `Arc<str>` instruments and are
/// never serialized directly.
use serde::{Deserialize, Serialize};

/// A command frame as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CommandFrame {
    Buy(NewOrderFrame),
    Sell(NewOrderFrame),
    Cancel { order_id: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderFrame {
    pub order_id: u32,
    pub instrument: String,
    pub price: u32,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideFrame {
    Buy,
    Sell,
}

/// An event frame as it appears on the wire, mirroring §6's Event frame layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventFrame {
    Added {
        order_id: u32,
        side: SideFrame,
        instrument: String,
        price: u32,
        count: u32,
        timestamp: u64,
    },
    Executed {
        resting_order_id: u32,
        incoming_order_id: u32,
        execution_count: u32,
        price: u32,
        count: u32,
        timestamp: u64,
    },
    Deleted {
        order_id: u32,
        accepted: bool,
        timestamp: u64,
    },
}

impl From<crate::domain::Side> for SideFrame {
    fn from(side: crate::domain::Side) -> Self {
        match side {
            crate::domain::Side::Buy => SideFrame::Buy,
            crate::domain::Side::Sell => SideFrame::Sell,
        }
    }
}

impl From<crate::domain::Event> for EventFrame {
    fn from(event: crate::domain::Event) -> Self {
        use crate::domain::Event;
        match event {
            Event::Added {
                order_id,
                side,
                instrument,
                price,
                count,
                timestamp,
            } => EventFrame::Added {
                order_id,
                side: side.into(),
                instrument: instrument.to_string(),
                price,
                count,
                timestamp,
            },
            Event::Executed {
                resting_order_id,
                incoming_order_id,
                execution_count,
                price,
                count,
                timestamp,
            } => EventFrame::Executed {
                resting_order_id,
                incoming_order_id,
                execution_count,
                price,
                count,
                timestamp,
            },
            Event::Deleted {
                order_id,
                accepted,
                timestamp,
            } => EventFrame::Deleted {
                order_id,
                accepted,
                timestamp,
            },
        }
    }
}
