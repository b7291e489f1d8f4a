/// Transport ports (§6, §10.3): the seam between the engine and the wire.
///
/// `domain` and the rest of `application` never depend on these; only
/// `client_reader` and `event_emitter` are parameterized over them. The
/// concrete TCP + bincode implementation lives in `infrastructure::network`.
use crate::domain::{Command, Event};
use std::future::Future;

pub trait CommandSource: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// `Ok(None)` signals a clean EOF; any parse/IO failure is `Err`.
    fn read_command(&mut self) -> impl Future<Output = Result<Option<Command>, Self::Error>> + Send;
}

pub trait EventSink: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    fn write_event(&mut self, event: Event) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
