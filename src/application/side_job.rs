/// Jobs accepted on a Side Worker's inbox (§4.4).
use crate::domain::{InFlightOrder, OrderId};
use tokio::sync::oneshot;

#[derive(Debug)]
pub enum SideJob {
    /// Same-side arrival: match against this worker's resting queue, forwarding
    /// any residual to the opposite worker to rest.
    Match {
        order: InFlightOrder,
        ack: oneshot::Sender<()>,
    },
    /// Opposite-side residual forwarded here to rest.
    Rest {
        order: InFlightOrder,
        ack: oneshot::Sender<()>,
    },
    Cancel {
        order_id: OrderId,
        ack: oneshot::Sender<()>,
    },
}
