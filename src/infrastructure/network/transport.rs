/// Concrete default transport (§10.3): length-delimited bincode frames over
/// `tokio::net::TcpStream`, implementing the `CommandSource` / `EventSink`
/// ports `application::transport` defines. Swapping transports means
/// implementing those two traits against a different stream; nothing in
/// `domain` or `application` names `tokio::net` or `FrameCodec`.
use crate::application::transport::{CommandSource, EventSink};
use crate::domain::validation::{validate_command, RawNewOrder, ValidationError};
use crate::domain::{Command, Event};
use crate::infrastructure::network::codec::{FrameCodec, FrameCodecError};
use crate::shared::protocol::{CommandFrame, EventFrame};
use crate::shared::symbol_pool::SymbolPool;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{tcp::OwnedReadHalf, TcpListener, TcpStream};
use tokio_util::codec::{FramedRead, FramedWrite};

#[derive(Debug, thiserror::Error)]
pub enum TcpCommandError {
    #[error(transparent)]
    Codec(#[from] FrameCodecError),
    #[error("rejected malformed command: {0}")]
    Validation(#[from] ValidationError),
}

/// Reads `CommandFrame`s off any readable stream and turns them into
/// validated, symbol-interned `domain::Command`s.
pub struct FramedCommandSource<T> {
    framed: FramedRead<T, FrameCodec>,
    symbol_pool: Arc<SymbolPool>,
}

impl<T> FramedCommandSource<T>
where
    T: AsyncRead + Unpin + Send,
{
    pub fn new(stream: T, symbol_pool: Arc<SymbolPool>) -> Self {
        Self {
            framed: FramedRead::new(stream, FrameCodec),
            symbol_pool,
        }
    }

    fn command_from_frame(&self, frame: CommandFrame) -> Result<Command, ValidationError> {
        match frame {
            CommandFrame::Buy(order) => validate_command(
                true,
                RawNewOrder {
                    order_id: order.order_id,
                    instrument: order.instrument,
                    price: order.price,
                    count: order.count,
                },
                &self.symbol_pool,
            ),
            CommandFrame::Sell(order) => validate_command(
                false,
                RawNewOrder {
                    order_id: order.order_id,
                    instrument: order.instrument,
                    price: order.price,
                    count: order.count,
                },
                &self.symbol_pool,
            ),
            CommandFrame::Cancel { order_id } => Ok(Command::Cancel { order_id }),
        }
    }
}

impl<T> CommandSource for FramedCommandSource<T>
where
    T: AsyncRead + Unpin + Send,
{
    type Error = TcpCommandError;

    async fn read_command(&mut self) -> Result<Option<Command>, Self::Error> {
        loop {
            let Some(frame) = self.framed.next().await else {
                return Ok(None);
            };
            let frame = frame?;
            match self.command_from_frame(frame) {
                Ok(command) => return Ok(Some(command)),
                Err(err) => {
                    // Malformed commands never reach the engine (§7); log and
                    // keep reading rather than tearing down the connection.
                    tracing::warn!(error = %err, "dropping malformed command");
                }
            }
        }
    }
}

/// Writes `EventFrame`s to any writable sink; the CLI wires this to stdout by
/// default, but it works equally over a TCP stream.
pub struct FramedEventSink<T> {
    framed: FramedWrite<T, FrameCodec>,
}

impl<T> FramedEventSink<T>
where
    T: AsyncWrite + Unpin + Send,
{
    pub fn new(stream: T) -> Self {
        Self {
            framed: FramedWrite::new(stream, FrameCodec),
        }
    }
}

impl<T> EventSink for FramedEventSink<T>
where
    T: AsyncWrite + Unpin + Send,
{
    type Error = FrameCodecError;

    async fn write_event(&mut self, event: Event) -> Result<(), Self::Error> {
        let frame: EventFrame = event.into();
        self.framed.send(frame).await
    }
}

/// Accepts connections on `listener` forever, spawning one `ClientReader` per
/// connection against `router_tx` (§4.1). Only the read half of each socket is
/// used as a `CommandSource`; events are not echoed back down the same
/// connection, since the Event Emitter (§4.5) is a single process-wide sink
/// wired separately by the CLI (typically to stdout).
pub async fn accept_loop(
    listener: TcpListener,
    router_tx: tokio::sync::mpsc::Sender<crate::application::Job>,
    symbol_pool: Arc<SymbolPool>,
) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                tracing::info!(%addr, "accepted client connection");
                let (read_half, _write_half) = stream.into_split();
                let source = FramedCommandSource::new(read_half, symbol_pool.clone());
                let reader = crate::application::ClientReader::new(source, router_tx.clone());
                tokio::spawn(reader.run());
            }
            Err(err) => {
                tracing::warn!(error = %err, "accept failed");
            }
        }
    }
}

pub type TcpCommandSource = FramedCommandSource<OwnedReadHalf>;
pub type TcpEventSink = FramedEventSink<TcpStream>;
