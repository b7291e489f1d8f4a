/// Infrastructure Layer - Technical Implementations
///
/// This layer contains the one concrete, technical implementation of the
/// `application::transport` ports: a TCP + length-delimited-bincode network
/// stack. The infrastructure layer depends on `application` and `shared`, but
/// neither of those depends back on it (dependency inversion).
///
/// ## Modules
/// - `network`: the default `CommandSource` / `EventSink` transport

pub mod network;

pub use network::{FrameCodec, FramedCommandSource, FramedEventSink};
