//! Frame codec for wire messages.
//!
//! bincode over the payload envelopes, with a size cap checked on both
//! directions.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::errors::ProtocolError;

/// Encode a message into a frame of at most `max_frame_size` bytes.
pub fn encode<T: Serialize>(message: &T, max_frame_size: usize) -> Result<Vec<u8>, ProtocolError> {
    let frame = bincode::serialize(message).map_err(|e| ProtocolError::Encode(e.to_string()))?;
    if frame.len() > max_frame_size {
        return Err(ProtocolError::FrameTooLarge {
            size: frame.len(),
            max: max_frame_size,
        });
    }
    Ok(frame)
}

/// Decode a frame. Oversized frames are rejected before any parsing.
pub fn decode<T: DeserializeOwned>(frame: &[u8], max_frame_size: usize) -> Result<T, ProtocolError> {
    if frame.len() > max_frame_size {
        return Err(ProtocolError::FrameTooLarge {
            size: frame.len(),
            max: max_frame_size,
        });
    }
    bincode::deserialize(frame).map_err(|e| ProtocolError::Decode(e.to_string()))
}
