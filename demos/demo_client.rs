/// Minimal TCP client: connects to a running engine, submits a handful of
/// Buy/Sell/Cancel commands framed with `FrameCodec`, and prints the engine's
/// event stream from the same process's stdout is not visible here -- this
/// only demonstrates the command side of the wire protocol.
use futures::SinkExt;
use limit_matching_engine::infrastructure::FrameCodec;
use limit_matching_engine::shared::protocol::{CommandFrame, NewOrderFrame};
use tokio::net::TcpStream;
use tokio_util::codec::FramedWrite;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:7878".to_string());

    let stream = TcpStream::connect(&addr).await?;
    let mut framed = FramedWrite::new(stream, FrameCodec);

    println!("connected to {addr}, submitting a resting buy then a crossing sell");

    framed
        .send(CommandFrame::Buy(NewOrderFrame {
            order_id: 1,
            instrument: "GOOG".to_string(),
            price: 100,
            count: 5,
        }))
        .await?;

    framed
        .send(CommandFrame::Sell(NewOrderFrame {
            order_id: 2,
            instrument: "GOOG".to_string(),
            price: 90,
            count: 3,
        }))
        .await?;

    framed.send(CommandFrame::Cancel { order_id: 1 }).await?;

    println!("commands submitted, watch the server's event stream for the result");
    Ok(())
}
