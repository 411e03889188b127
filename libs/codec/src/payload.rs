//! # Protocol Payload - Frame Encoding and Decoding
//!
//! A frame is the header, the type tag, and the body, concatenated without
//! any length prefix. The total length is implied by the tag:
//!
//! ```text
//! offset  0..19  header
//! offset 19..20  type tag
//! offset 20..N   body (width from the type registry)
//! ```
//!
//! Encoding and decoding are pure transforms. [`PayloadDecoder`] adds the
//! configured reporting (version checks, frame tracing) around decoding and
//! is what [`ProtocolPayload::decode`] uses with the default configuration.

use crate::config::CodecConfig;
use crate::data::PayloadBody;
use crate::error::{ProtocolError, ProtocolResult};
use crate::header::ProtocolHeader;
use crate::payload_type::{PayloadType, PayloadTypeRegistry};
use crate::protocol_constants::{BODY_OFFSET, HEADER_SIZE, MIN_FRAME_SIZE, TYPE_TAG_OFFSET};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Complete message: header, type tag and body
///
/// The type tag is derived from the body variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProtocolPayload {
    pub header: ProtocolHeader,
    pub body: PayloadBody,
}

impl ProtocolPayload {
    pub fn new(header: ProtocolHeader, body: impl Into<PayloadBody>) -> Self {
        Self {
            header,
            body: body.into(),
        }
    }

    /// Type tag written after the header
    pub fn payload_type(&self) -> PayloadType {
        self.body.payload_type()
    }

    /// Total frame length in bytes
    pub fn encoded_len(&self) -> usize {
        BODY_OFFSET + self.payload_type().body_width()
    }

    /// Serialize the complete frame
    pub fn encode(&self) -> ProtocolResult<Vec<u8>> {
        let mut buffer = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut buffer)?;
        Ok(buffer)
    }

    /// Append the complete frame to `buffer`
    ///
    /// On error `buffer` is left as it was.
    pub fn encode_into(&self, buffer: &mut Vec<u8>) -> ProtocolResult<()> {
        let start = buffer.len();
        let result = self.header.encode_into(buffer).and_then(|()| {
            buffer.push(self.payload_type() as u8);
            self.body.encode_into(buffer)
        });

        if result.is_err() {
            buffer.truncate(start);
        }
        result
    }

    /// Decode a frame with the default configuration
    pub fn decode(bytes: &[u8]) -> ProtocolResult<Self> {
        PayloadDecoder::default().decode(bytes)
    }
}

/// Frame decoder applying a [`CodecConfig`]
#[derive(Debug, Clone, Default)]
pub struct PayloadDecoder {
    config: CodecConfig,
}

impl PayloadDecoder {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Decode one frame
    ///
    /// Consumes exactly `20 + width` bytes where `width` comes from the type
    /// registry; anything after that is ignored.
    pub fn decode(&self, bytes: &[u8]) -> ProtocolResult<ProtocolPayload> {
        if self.config.trace_frames {
            trace!("Decoding frame ({} bytes): {}", bytes.len(), hex::encode(bytes));
        }

        let payload = decode_frame(bytes)?;
        payload.header.check_version(self.config.expected_version);

        let consumed = payload.encoded_len();
        if bytes.len() > consumed {
            debug!(
                "Ignoring {} trailing bytes after {} frame",
                bytes.len() - consumed,
                payload.payload_type()
            );
        }

        debug!(
            "Decoded {} payload from {:#018x} to {:#018x} (swarm {})",
            payload.payload_type(),
            payload.header.source,
            payload.header.destination,
            payload.header.swarm_id
        );

        Ok(payload)
    }
}

fn decode_frame(bytes: &[u8]) -> ProtocolResult<ProtocolPayload> {
    if bytes.len() < MIN_FRAME_SIZE {
        return Err(ProtocolError::truncated(
            MIN_FRAME_SIZE,
            bytes.len(),
            "ProtocolPayload header and type tag",
        ));
    }

    let header = ProtocolHeader::decode(&bytes[..HEADER_SIZE])?;
    let entry = PayloadTypeRegistry::lookup(bytes[TYPE_TAG_OFFSET])?;

    let end = BODY_OFFSET + entry.body_width;
    if bytes.len() < end {
        return Err(ProtocolError::truncated(
            end,
            bytes.len(),
            format!("{} body", entry.payload_type),
        ));
    }

    let body = (entry.decode)(&bytes[BODY_OFFSET..end])?;
    Ok(ProtocolPayload { header, body })
}
