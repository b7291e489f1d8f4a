/// Network infrastructure: the one concrete transport the crate ships (§10.3).
pub mod codec;
pub mod transport;

pub use codec::{FrameCodec, FrameCodecError};
pub use transport::{
    accept_loop, FramedCommandSource, FramedEventSink, TcpCommandError, TcpCommandSource,
    TcpEventSink,
};
