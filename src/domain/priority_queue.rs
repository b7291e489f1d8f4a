/// Price-time priority queue for resting orders on one side worker.
///
/// A buy-side worker's queue holds resting *sell* orders ordered with the lowest
/// price first; a sell-side worker's queue holds resting *buy* orders ordered with
/// the highest price first. Ties break on earliest arrival timestamp (§3).
///
/// Cancellation is lazy (§9): cancelling zeroes `remaining` and drops the order
/// id -> handle mapping, but the heap entry itself is only popped the next time
/// it happens to surface at the top. This avoids an O(n) heap repair per cancel.
use crate::domain::model::{OrderId, RestingOrder, Side};
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

pub type RestingOrderHandle = Arc<Mutex<RestingOrder>>;

/// Heap ordering key, computed once at push time since price/side/arrival never
/// change for a resting order (only `remaining` and `execution_counter` do).
#[derive(Clone, Copy, PartialEq, Eq)]
struct SortKey(i64, i64);

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.0, self.1).cmp(&(other.0, other.1))
    }
}

fn sort_key(side: Side, price: u32, arrival_timestamp: u64) -> SortKey {
    let price_rank = match side {
        // Resting sells: lower price is better -> negate so lower sorts higher
        // in this max-heap.
        Side::Sell => -(price as i64),
        // Resting buys: higher price is better.
        Side::Buy => price as i64,
    };
    // Earlier arrival must win ties, so negate: a smaller timestamp -> larger rank.
    let time_rank = -(arrival_timestamp as i64);
    SortKey(price_rank, time_rank)
}

struct HeapEntry {
    handle: RestingOrderHandle,
    key: SortKey,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}
impl Eq for HeapEntry {}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

#[derive(Default)]
pub struct RestingOrderQueue {
    heap: BinaryHeap<HeapEntry>,
    index: HashMap<OrderId, RestingOrderHandle>,
}

impl RestingOrderQueue {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            index: HashMap::new(),
        }
    }

    /// Rests `order`, making it visible to both the priority queue and the
    /// order id -> handle map consulted on Cancel (§3 "Order Directory").
    pub fn push(&mut self, order: RestingOrder) {
        let key = sort_key(order.side, order.price, order.arrival_timestamp);
        let order_id = order.order_id;
        let handle = Arc::new(Mutex::new(order));
        self.index.insert(order_id, handle.clone());
        self.heap.push(HeapEntry { handle, key });
    }

    /// Drops heap-top entries with `remaining == 0`. Call before every top
    /// inspection (§9's lazy-removal requirement).
    pub fn drain_dead_tops(&mut self) {
        while let Some(top) = self.heap.peek() {
            if top.handle.lock().remaining == 0 {
                self.heap.pop();
            } else {
                break;
            }
        }
    }

    /// Returns a clone of the live top's handle, if any. Clears dead tops first.
    pub fn top(&mut self) -> Option<RestingOrderHandle> {
        self.drain_dead_tops();
        self.heap.peek().map(|e| e.handle.clone())
    }

    /// Cancels a resting order by id. Returns `true` if it was live and is now
    /// logically removed; `false` if it was absent, already cancelled, or
    /// already fully filled (§4.4(c)).
    pub fn cancel(&mut self, order_id: OrderId) -> bool {
        match self.index.remove(&order_id) {
            Some(handle) => {
                let mut guard = handle.lock();
                if guard.remaining > 0 {
                    guard.remaining = 0;
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
