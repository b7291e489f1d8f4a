/// Typed error hierarchy (§7, §10.2)
///
/// Non-fatal errors (`UnknownOrder`, `ChannelClosed`) are handled inline by
/// callers and turned into a rejected event; they never propagate as `Err` out
/// of a task's run loop. `InvariantViolation` is the one fatal kind: the
/// reference behavior is to log it and abort the process (§7).
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("order {order_id} is unknown to this coordinator")]
    UnknownOrder { order_id: crate::domain::OrderId },

    #[error("channel to {target} is closed")]
    ChannelClosed { target: &'static str },

    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

impl EngineError {
    /// Logs the violation and aborts the process, per §7's "reference behavior
    /// is to abort the process" for internal invariant violations. These must
    /// be unreachable under the invariants of §3; reaching this is a bug.
    pub fn abort_on_invariant_violation(detail: impl Into<String>) -> ! {
        let detail = detail.into();
        tracing::error!(%detail, "internal invariant violated, aborting");
        std::process::abort();
    }
}
