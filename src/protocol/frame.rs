use bytes::{Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder, LengthDelimitedCodec};

use crate::error::ProtocolError;
use crate::protocol::codec;
use crate::protocol::message::Message;

pub const MAX_FRAME_LEN: usize = 10 * 1024 * 1024;
const LENGTH_FIELD_LEN: usize = 8;

/// `[u64 little-endian length][UTF-8 JSON]` frames.
///
/// Decoding yields `Ok(Err(_))` for a well-framed message whose body does not
/// parse, so the stream stays usable. A bad frame header is an outer `Err`
/// and ends the stream.
#[derive(Debug)]
pub struct MessageCodec {
    frames: LengthDelimitedCodec,
    max_frame_len: usize,
    /// The inner codec has consumed a header and waits for its body.
    in_body: bool,
}

impl MessageCodec {
    pub fn new() -> MessageCodec {
        MessageCodec::with_max_frame_len(MAX_FRAME_LEN)
    }

    pub fn with_max_frame_len(max_frame_len: usize) -> MessageCodec {
        let frames = LengthDelimitedCodec::builder()
            .length_field_length(LENGTH_FIELD_LEN)
            .little_endian()
            .max_frame_length(max_frame_len)
            .new_codec();
        MessageCodec {
            frames,
            max_frame_len,
            in_body: false,
        }
    }
}

impl Default for MessageCodec {
    fn default() -> Self {
        MessageCodec::new()
    }
}

impl Decoder for MessageCodec {
    type Item = Result<Message, ProtocolError>;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let at_header = !self.in_body && src.len() >= LENGTH_FIELD_LEN;
        if at_header {
            let mut header = [0u8; LENGTH_FIELD_LEN];
            header.copy_from_slice(&src[..LENGTH_FIELD_LEN]);
            let len = u64::from_le_bytes(header);
            if len > self.max_frame_len as u64 {
                return Err(ProtocolError::FrameTooLarge {
                    len: usize::try_from(len).unwrap_or(usize::MAX),
                    max: self.max_frame_len,
                });
            }
        }
        match self.frames.decode(src)? {
            Some(frame) => {
                self.in_body = false;
                Ok(Some(codec::decode(&frame)))
            }
            None => {
                if at_header {
                    self.in_body = true;
                }
                Ok(None)
            }
        }
    }
}

impl Encoder<Message> for MessageCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: Message, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let json = codec::encode(&item)?;
        if json.len() > self.max_frame_len {
            return Err(ProtocolError::FrameTooLarge {
                len: json.len(),
                max: self.max_frame_len,
            });
        }
        self.frames.encode(Bytes::from(json), dst)?;
        Ok(())
    }
}
