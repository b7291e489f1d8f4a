/// Pure matching algorithm run by a side worker against its priority queue.
///
/// No I/O, no channels, no tokio: this is the part of the engine that is unit
/// tested directly, independent of the concurrency harness around it (§4.4).
use crate::domain::model::{Event, InFlightOrder, RestingOrder, Side};
use crate::domain::priority_queue::RestingOrderQueue;
use smallvec::SmallVec;

/// Outcome of running an incoming order against a side worker's resting queue.
pub struct MatchOutcome {
    /// Executed events, in the exact order the matches occurred.
    pub executions: SmallVec<[Event; 4]>,
    /// `Some(residual)` if quantity remains after matching and must be forwarded
    /// to the opposite worker to rest; `None` if the incoming order fully filled.
    pub residual: Option<InFlightOrder>,
}

/// Does the live queue top accept a match against `incoming_price`, from the
/// perspective of the side worker that owns `queue` (i.e. `queue` rests orders
/// of `incoming_side.resting_side()`)?
fn top_is_acceptable(resting: &RestingOrder, incoming_side: Side, incoming_price: u32) -> bool {
    match incoming_side {
        // Buy-side worker: queue holds resting sells, lower price is better.
        Side::Buy => resting.price <= incoming_price,
        // Sell-side worker: queue holds resting buys, higher price is better.
        Side::Sell => resting.price >= incoming_price,
    }
}

/// Matches `incoming` against the live top of `queue` repeatedly until either the
/// incoming order is fully filled or the queue top is no longer acceptable.
/// `now` is sampled once per Executed event, per §3's "sampled at event emission time".
pub fn match_incoming(
    queue: &mut RestingOrderQueue,
    mut incoming: InFlightOrder,
    mut now: impl FnMut() -> u64,
) -> MatchOutcome {
    let mut executions = SmallVec::new();

    while incoming.remaining > 0 {
        let Some(handle) = queue.top() else {
            break;
        };
        let acceptable = {
            let resting = handle.lock();
            top_is_acceptable(&resting, incoming.side, incoming.price)
        };
        if !acceptable {
            break;
        }

        let timestamp = now();
        let (resting_order_id, resting_price, execution_count, executed) = {
            let mut resting = handle.lock();
            let executed = resting.remaining.min(incoming.remaining);
            resting.remaining -= executed;
            let execution_count = resting.execution_counter;
            resting.execution_counter += 1;
            (resting.order_id, resting.price, execution_count, executed)
        };

        incoming.remaining -= executed;

        executions.push(Event::Executed {
            resting_order_id,
            incoming_order_id: incoming.order_id,
            execution_count,
            price: resting_price,
            count: executed,
            timestamp,
        });
    }

    let residual = if incoming.remaining > 0 {
        Some(incoming)
    } else {
        None
    };

    MatchOutcome {
        executions,
        residual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn incoming(side: Side, price: u32, count: u32) -> InFlightOrder {
        InFlightOrder {
            order_id: 99,
            instrument: Arc::from("GOOG"),
            side,
            price,
            remaining: count,
        }
    }

    fn resting_sell(order_id: u32, price: u32, remaining: u32, ts: u64) -> RestingOrder {
        RestingOrder {
            order_id,
            instrument: Arc::from("GOOG"),
            side: Side::Sell,
            price,
            remaining,
            arrival_timestamp: ts,
            execution_counter: 1,
        }
    }

    #[test]
    fn full_match_against_single_resting_order() {
        let mut queue = RestingOrderQueue::new();
        queue.push(resting_sell(1, 90, 3, 1));

        // Mirrors S1: a Buy at 100 for 3 fully matches a resting sell at 90.
        let outcome = match_incoming(&mut queue, incoming(Side::Buy, 100, 3), || 1000);
        assert_eq!(outcome.executions.len(), 1);
        assert!(outcome.residual.is_none());
        match &outcome.executions[0] {
            Event::Executed { resting_order_id, count, execution_count, .. } => {
                assert_eq!(*resting_order_id, 1);
                assert_eq!(*count, 3);
                assert_eq!(*execution_count, 1);
            }
            _ => panic!("expected Executed"),
        }
    }

    #[test]
    fn partial_match_then_residual() {
        let mut queue = RestingOrderQueue::new();
        queue.push(resting_sell(1, 100, 5, 1));

        let outcome = match_incoming(&mut queue, incoming(Side::Buy, 100, 10), || 1000);
        assert_eq!(outcome.executions.len(), 1);
        let residual = outcome.residual.expect("5 units left over");
        assert_eq!(residual.remaining, 5);
    }

    #[test]
    fn no_match_when_top_not_acceptable() {
        let mut queue = RestingOrderQueue::new();
        queue.push(resting_sell(1, 110, 5, 1));

        let outcome = match_incoming(&mut queue, incoming(Side::Buy, 100, 10), || 1000);
        assert!(outcome.executions.is_empty());
        assert_eq!(outcome.residual.unwrap().remaining, 10);
    }

    #[test]
    fn repeated_matches_against_same_resting_order_bump_execution_counter() {
        let mut queue = RestingOrderQueue::new();
        queue.push(resting_sell(1, 100, 5, 1));

        let outcome1 = match_incoming(&mut queue, incoming(Side::Buy, 100, 3), || 1000);
        match &outcome1.executions[0] {
            Event::Executed { execution_count, count, .. } => {
                assert_eq!(*execution_count, 1);
                assert_eq!(*count, 3);
            }
            _ => panic!("expected Executed"),
        }

        let outcome2 = match_incoming(&mut queue, incoming(Side::Buy, 100, 2), || 2000);
        match &outcome2.executions[0] {
            Event::Executed { execution_count, count, .. } => {
                assert_eq!(*execution_count, 2);
                assert_eq!(*count, 2);
            }
            _ => panic!("expected Executed"),
        }
    }

    #[test]
    fn exhausted_top_is_skipped_without_an_event() {
        let mut queue = RestingOrderQueue::new();
        queue.push(resting_sell(1, 90, 0, 1)); // already cancelled/exhausted
        queue.push(resting_sell(2, 95, 5, 2));

        let outcome = match_incoming(&mut queue, incoming(Side::Buy, 100, 5), || 1000);
        assert_eq!(outcome.executions.len(), 1);
        match &outcome.executions[0] {
            Event::Executed { resting_order_id, .. } => assert_eq!(*resting_order_id, 2),
            _ => panic!("expected Executed"),
        }
    }
}
