/// Batched timestamp module
/// Reduces syscall frequency to improve hot-path throughput
///
/// Core idea:
/// - Only one syscall every `UPDATE_INTERVAL` calls per thread
/// - Calls in between return the thread-local cached value
/// - Each side worker/coordinator/emitter runs on its own task, so the cache is
///   never shared across the two orders it needs to order relative to each other
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

thread_local! {
    static TIMESTAMP_CACHE: std::cell::Cell<u64> = std::cell::Cell::new(0);
    static UPDATE_COUNTER: std::cell::Cell<u32> = std::cell::Cell::new(u32::MAX);
}

/// How many calls share one syscall-backed timestamp.
const UPDATE_INTERVAL: u32 = 100;

/// Process start epoch, used only to keep `get_precise_timestamp` allocation-free.
static EPOCH_FALLBACK: AtomicU64 = AtomicU64::new(0);

/// Returns a monotonic-enough nanosecond timestamp, amortizing the syscall cost
/// across `UPDATE_INTERVAL` calls. §6: "strictly non-decreasing ... is not
/// required but is expected in practice" -- this satisfies that within one task.
#[inline]
pub fn get_fast_timestamp() -> u64 {
    UPDATE_COUNTER.with(|counter| {
        let count = counter.get();
        if count >= UPDATE_INTERVAL {
            let new_ts = get_precise_timestamp();
            TIMESTAMP_CACHE.with(|c| c.set(new_ts));
            counter.set(0);
            new_ts
        } else {
            counter.set(count + 1);
            TIMESTAMP_CACHE.with(|c| c.get())
        }
    })
}

/// Always issues a fresh syscall; used where accuracy matters more than throughput
/// (test fixtures, the fallback used to prime the cache on first call).
#[inline]
pub fn get_precise_timestamp() -> u64 {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;
    EPOCH_FALLBACK.store(ts, Ordering::Relaxed);
    ts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn fast_timestamp_is_monotonic_within_a_thread() {
        let mut last = get_fast_timestamp();
        for _ in 0..300 {
            let ts = get_fast_timestamp();
            assert!(ts >= last, "timestamps should never go backwards");
            last = ts;
        }
    }

    #[test]
    fn precise_timestamp_always_advances() {
        let a = get_precise_timestamp();
        thread::sleep(Duration::from_micros(50));
        let b = get_precise_timestamp();
        assert!(b > a);
    }
}
