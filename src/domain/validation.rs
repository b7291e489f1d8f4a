/// Command Validator - Business Rule Validation
///
/// Validates a raw Buy/Sell/Cancel payload before it becomes a `Command` the
/// rest of the engine will act on. Price and count must be non-zero (§3); an
/// empty instrument symbol is always rejected regardless of config.
use crate::domain::model::{Command, NewOrder};
use crate::shared::symbol_pool::SymbolPool;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("price must be greater than zero")]
    ZeroPrice,
    #[error("count must be greater than zero")]
    ZeroCount,
    #[error("instrument symbol must not be empty")]
    EmptySymbol,
}

/// Raw fields for a Buy/Sell request, prior to symbol interning and validation.
#[derive(Debug, Clone)]
pub struct RawNewOrder {
    pub order_id: u32,
    pub instrument: String,
    pub price: u32,
    pub count: u32,
}

/// Validates and interns a raw Buy/Sell request into a `NewOrder`.
///
/// Interning the symbol here (rather than per-match) means every `NewOrder` for
/// the same instrument across the process shares one `Arc<str>` allocation.
pub fn validate_new_order(
    raw: RawNewOrder,
    symbol_pool: &SymbolPool,
) -> Result<NewOrder, ValidationError> {
    if raw.price == 0 {
        return Err(ValidationError::ZeroPrice);
    }
    if raw.count == 0 {
        return Err(ValidationError::ZeroCount);
    }
    if raw.instrument.is_empty() {
        return Err(ValidationError::EmptySymbol);
    }

    Ok(NewOrder {
        order_id: raw.order_id,
        instrument: symbol_pool.intern(&raw.instrument),
        price: raw.price,
        count: raw.count,
    })
}

/// Convenience wrapper producing a fully-formed `Command::Buy`/`Command::Sell`.
pub fn validate_command(
    is_buy: bool,
    raw: RawNewOrder,
    symbol_pool: &SymbolPool,
) -> Result<Command, ValidationError> {
    let order = validate_new_order(raw, symbol_pool)?;
    Ok(if is_buy {
        Command::Buy(order)
    } else {
        Command::Sell(order)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn raw() -> RawNewOrder {
        RawNewOrder {
            order_id: 1,
            instrument: "GOOG".to_string(),
            price: 100,
            count: 5,
        }
    }

    #[test]
    fn valid_order_passes() {
        let pool = SymbolPool::new();
        let order = validate_new_order(raw(), &pool).unwrap();
        assert_eq!(order.price, 100);
        assert_eq!(order.count, 5);
        assert_eq!(order.instrument.as_ref(), "GOOG");
    }

    #[test]
    fn zero_price_rejected() {
        let pool = SymbolPool::new();
        let mut r = raw();
        r.price = 0;
        assert_eq!(validate_new_order(r, &pool).unwrap_err(), ValidationError::ZeroPrice);
    }

    #[test]
    fn zero_count_rejected() {
        let pool = SymbolPool::new();
        let mut r = raw();
        r.count = 0;
        assert_eq!(validate_new_order(r, &pool).unwrap_err(), ValidationError::ZeroCount);
    }

    #[test]
    fn empty_symbol_rejected() {
        let pool = SymbolPool::new();
        let mut r = raw();
        r.instrument = String::new();
        assert_eq!(validate_new_order(r, &pool).unwrap_err(), ValidationError::EmptySymbol);
    }

    #[test]
    fn repeated_interning_shares_the_same_arc() {
        let pool = SymbolPool::new();
        let a = validate_new_order(raw(), &pool).unwrap();
        let b = validate_new_order(raw(), &pool).unwrap();
        assert!(Arc::ptr_eq(&a.instrument, &b.instrument));
    }
}
