/// Length-delimited bincode framing over `CommandFrame`/`EventFrame` (§10.3):
/// a 4-byte big-endian length prefix followed by the bincode payload, built on
/// `tokio_util::codec::{Encoder, Decoder}` so it composes with `Framed`.
use crate::shared::protocol::{CommandFrame, EventFrame};
use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// Generous upper bound on a single frame; a real frame is a handful of fields.
const MAX_FRAME_LEN: usize = 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum FrameCodecError {
    #[error("frame of {len} bytes exceeds the {max} byte limit")]
    FrameTooLarge { len: usize, max: usize },
    #[error("bincode encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("bincode decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Decodes `CommandFrame`s off a client stream; encodes `EventFrame`s back.
#[derive(Debug, Default)]
pub struct FrameCodec;

impl Decoder for FrameCodec {
    type Item = CommandFrame;
    type Error = FrameCodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < 4 {
            return Ok(None);
        }
        let len = u32::from_be_bytes(src[..4].try_into().unwrap()) as usize;
        if len > MAX_FRAME_LEN {
            return Err(FrameCodecError::FrameTooLarge {
                len,
                max: MAX_FRAME_LEN,
            });
        }
        if src.len() < 4 + len {
            src.reserve(4 + len - src.len());
            return Ok(None);
        }

        src.advance(4);
        let payload = src.split_to(len);
        let (frame, _) =
            bincode::serde::decode_from_slice(&payload, bincode::config::standard())?;
        Ok(Some(frame))
    }
}

impl Encoder<EventFrame> for FrameCodec {
    type Error = FrameCodecError;

    fn encode(&mut self, item: EventFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let payload = bincode::serde::encode_to_vec(&item, bincode::config::standard())?;
        if payload.len() > MAX_FRAME_LEN {
            return Err(FrameCodecError::FrameTooLarge {
                len: payload.len(),
                max: MAX_FRAME_LEN,
            });
        }
        dst.reserve(4 + payload.len());
        dst.put_u32(payload.len() as u32);
        dst.put_slice(&payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::protocol::NewOrderFrame;

    #[test]
    fn round_trips_a_command_frame() {
        let mut codec = FrameCodec;
        let mut buf = BytesMut::new();

        let frame = CommandFrame::Buy(NewOrderFrame {
            order_id: 1,
            instrument: "GOOG".to_string(),
            price: 100,
            count: 5,
        });
        let encoded = bincode::serde::encode_to_vec(&frame, bincode::config::standard()).unwrap();
        buf.put_u32(encoded.len() as u32);
        buf.put_slice(&encoded);

        let decoded = codec.decode(&mut buf).unwrap().expect("one full frame");
        match decoded {
            CommandFrame::Buy(order) => assert_eq!(order.order_id, 1),
            _ => panic!("expected Buy"),
        }
        assert!(buf.is_empty());
    }

    #[test]
    fn waits_for_a_full_frame() {
        let mut codec = FrameCodec;
        let mut buf = BytesMut::new();
        buf.put_u32(100);
        buf.put_slice(&[0u8; 10]);

        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn rejects_an_oversized_frame() {
        let mut codec = FrameCodec;
        let mut buf = BytesMut::new();
        buf.put_u32((MAX_FRAME_LEN + 1) as u32);

        assert!(matches!(
            codec.decode(&mut buf),
            Err(FrameCodecError::FrameTooLarge { .. })
        ));
    }
}
