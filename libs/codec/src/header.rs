//! Protocol Header Implementation
//!
//! The header is identical for every message regardless of the body that
//! follows and carries the routing information.
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────┬─────┬──────┬──────────────┐
//! │ destination  │ source       │ swarm_id │ ver │ type │ body         │
//! │ 8B BE        │ 8B BE        │ 2B BE    │ 1B  │ 1B   │ per type     │
//! └──────────────┴──────────────┴──────────┴─────┴──────┴──────────────┘
//! ```

use crate::error::{ProtocolError, ProtocolResult};
use crate::field::{encode_fields, FieldReader, FieldSpec, ProtocolField};
use crate::protocol_constants::{HEADER_SIZE, PROTOCOL_VERSION};
use serde::{Deserialize, Serialize};
use tracing::warn;
use zerocopy::byteorder::{BigEndian, U16, U64};
use zerocopy::{AsBytes, FromBytes, FromZeroes, Ref, Unaligned};

const DESTINATION: FieldSpec = FieldSpec::unsigned("dst", 8);
const SOURCE: FieldSpec = FieldSpec::unsigned("src", 8);
const SWARM_ID: FieldSpec = FieldSpec::unsigned("swarm id", 2);
const VERSION: FieldSpec = FieldSpec::unsigned("ver.", 1);

/// Routing header (19 bytes on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProtocolHeader {
    pub destination: u64,
    pub source: u64,
    pub swarm_id: u16,
    pub version: u8,
}

impl ProtocolHeader {
    /// Header size in bytes
    pub const SIZE: usize = HEADER_SIZE;

    /// Create a header stamped with the current protocol version
    pub fn new(destination: u64, source: u64, swarm_id: u16) -> Self {
        Self {
            destination,
            source,
            swarm_id,
            version: PROTOCOL_VERSION,
        }
    }

    /// Ordered field descriptors, in wire order
    pub fn fields(&self) -> Vec<ProtocolField> {
        vec![
            DESTINATION.with_value(self.destination),
            SOURCE.with_value(self.source),
            SWARM_ID.with_value(self.swarm_id),
            VERSION.with_value(self.version),
        ]
    }

    /// Serialize to exactly [`Self::SIZE`] bytes
    pub fn encode(&self) -> ProtocolResult<Vec<u8>> {
        let mut buffer = Vec::with_capacity(Self::SIZE);
        self.encode_into(&mut buffer)?;
        Ok(buffer)
    }

    /// Append the encoded header to `buffer`
    pub fn encode_into(&self, buffer: &mut Vec<u8>) -> ProtocolResult<()> {
        encode_fields(&self.fields(), buffer)
    }

    /// Decode the first [`Self::SIZE`] bytes of `bytes`
    ///
    /// Any version is accepted; callers report mismatches through
    /// [`Self::is_current_version`] or [`Self::check_version`].
    pub fn decode(bytes: &[u8]) -> ProtocolResult<Self> {
        let mut reader = FieldReader::new(bytes, Self::SIZE, "ProtocolHeader decoding")?;
        Ok(Self {
            destination: reader.read_u64(&DESTINATION)?,
            source: reader.read_u64(&SOURCE)?,
            swarm_id: reader.read_u16(&SWARM_ID)?,
            version: reader.read_u8(&VERSION)?,
        })
    }

    /// Whether the header carries [`PROTOCOL_VERSION`]
    pub fn is_current_version(&self) -> bool {
        self.version == PROTOCOL_VERSION
    }

    /// Compare against `expected`, logging a warning on mismatch
    pub fn check_version(&self, expected: u8) -> bool {
        if self.version == expected {
            return true;
        }
        warn!(
            "Protocol version mismatch: expected {}, got {} (src {:#018x}, dst {:#018x})",
            expected, self.version, self.source, self.destination
        );
        false
    }
}

impl From<&WireHeader> for ProtocolHeader {
    fn from(wire: &WireHeader) -> Self {
        Self {
            destination: wire.destination.get(),
            source: wire.source.get(),
            swarm_id: wire.swarm_id.get(),
            version: wire.version,
        }
    }
}

/// Zero-copy view of the header bytes of a raw frame
///
/// Lets a transport route on `destination` without decoding the body.
/// Field layout matches [`ProtocolHeader::fields`] byte for byte.
#[repr(C)]
#[derive(Debug, Clone, Copy, AsBytes, FromBytes, FromZeroes, Unaligned)]
pub struct WireHeader {
    pub destination: U64<BigEndian>,
    pub source: U64<BigEndian>,
    pub swarm_id: U16<BigEndian>,
    pub version: u8,
}
// Total: EXACTLY 19 bytes, alignment 1

/// Borrow the header of `frame` without copying
pub fn peek_header(frame: &[u8]) -> ProtocolResult<&WireHeader> {
    if frame.len() < HEADER_SIZE {
        return Err(ProtocolError::truncated(
            HEADER_SIZE,
            frame.len(),
            "WireHeader view",
        ));
    }

    Ref::<_, WireHeader>::new_unaligned(&frame[..HEADER_SIZE])
        .map(|view| view.into_ref())
        .ok_or_else(|| ProtocolError::truncated(HEADER_SIZE, frame.len(), "WireHeader view"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_size() {
        assert_eq!(std::mem::size_of::<WireHeader>(), ProtocolHeader::SIZE);
        assert_eq!(ProtocolHeader::SIZE, 19);

        let header = ProtocolHeader::new(1, 2, 3);
        let width: usize = header.fields().iter().map(|f| f.length).sum();
        assert_eq!(width, ProtocolHeader::SIZE);
    }

    #[test]
    fn test_header_creation() {
        let header = ProtocolHeader::new(0xAA, 0xBB, 7);
        assert_eq!(header.version, PROTOCOL_VERSION);
        assert!(header.is_current_version());
    }

    #[test]
    fn test_header_layout() {
        let header = ProtocolHeader::new(1, 2, 3);
        let bytes = header.encode().unwrap();
        assert_eq!(
            bytes,
            vec![0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 2, 0, 3, 1]
        );
        assert_eq!(ProtocolHeader::decode(&bytes).unwrap(), header);
    }

    #[test]
    fn test_header_boundary_destinations() {
        for destination in [0u64, u64::MAX] {
            let header = ProtocolHeader::new(destination, u64::MAX, u16::MAX);
            let bytes = header.encode().unwrap();
            assert_eq!(ProtocolHeader::decode(&bytes).unwrap(), header);
        }
    }

    #[test]
    fn test_header_truncated() {
        let result = ProtocolHeader::decode(&[0u8; 18]);
        assert!(matches!(
            result,
            Err(ProtocolError::TruncatedBuffer { need: 19, got: 18, .. })
        ));
    }

    #[test]
    fn test_version_mismatch_still_decodes() {
        let mut header = ProtocolHeader::new(1, 2, 3);
        header.version = 9;
        let decoded = ProtocolHeader::decode(&header.encode().unwrap()).unwrap();
        assert_eq!(decoded.version, 9);
        assert!(!decoded.is_current_version());
        assert!(!decoded.check_version(PROTOCOL_VERSION));
        assert!(decoded.check_version(9));
    }

    #[test]
    fn test_wire_view_matches_decode() {
        let header = ProtocolHeader::new(0x0102030405060708, 0x1112131415161718, 0xABCD);
        let mut frame = header.encode().unwrap();
        frame.extend_from_slice(&[1, 0xFF, 0x00, 0x80]);

        let view = peek_header(&frame).unwrap();
        assert_eq!(view.destination.get(), 0x0102030405060708);
        assert_eq!(ProtocolHeader::from(view), header);
        assert_eq!(view.as_bytes(), &frame[..ProtocolHeader::SIZE]);

        assert!(peek_header(&frame[..10]).is_err());
    }
}
