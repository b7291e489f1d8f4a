/// Symbol string pool - efficient management of instrument symbols
///
/// Goals:
/// 1. Avoid re-allocating an `Arc<str>` per order for the same instrument symbol
/// 2. Read-write lock for high-concurrency access (readers never block readers)
/// 3. A symbol is allocated once; every later lookup just clones an Arc (atomic incr)
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Global pool used to intern instrument symbol strings.
pub struct SymbolPool {
    symbols: RwLock<HashMap<String, Arc<str>>>,
}

impl SymbolPool {
    pub fn new() -> Self {
        Self {
            symbols: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            symbols: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Interns `symbol`, returning a shared `Arc<str>`.
    ///
    /// Fast path (symbol already known): read lock + Arc clone. Slow path
    /// (first sight of this symbol): read lock miss, then write lock + alloc.
    #[inline]
    pub fn intern(&self, symbol: &str) -> Arc<str> {
        {
            let read_guard = self.symbols.read();
            if let Some(arc) = read_guard.get(symbol) {
                return arc.clone();
            }
        }

        let mut write_guard = self.symbols.write();
        // Another writer may have inserted this symbol while we waited for the lock.
        write_guard
            .entry(symbol.to_string())
            .or_insert_with(|| Arc::from(symbol))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.symbols.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.read().is_empty()
    }
}

impl Default for SymbolPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_returns_same_arc() {
        let pool = SymbolPool::new();
        let a = pool.intern("GOOG");
        let b = pool.intern("GOOG");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn intern_different_symbols_are_distinct() {
        let pool = SymbolPool::new();
        let goog = pool.intern("GOOG");
        let aapl = pool.intern("AAPL");
        assert!(!Arc::ptr_eq(&goog, &aapl));
    }

    #[test]
    fn concurrent_interning_of_the_same_symbol_converges_to_one_arc() {
        use std::thread;

        let pool = Arc::new(SymbolPool::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = pool.clone();
                thread::spawn(move || {
                    for _ in 0..500 {
                        let _ = pool.intern("GOOG");
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(pool.len(), 1);
    }
}
