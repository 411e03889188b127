//! # DotBot Protocol Codec
//!
//! ## Purpose
//!
//! Wire-format rules for messages exchanged between the fleet controller and
//! DotBot robots:
//! - Field descriptors (width, byte order, signedness) for every value
//! - The fixed 19-byte routing header
//! - The closed set of payload bodies and their layouts
//! - The type registry mapping a tag byte to body width and decoder
//! - Frame encoding and decoding
//!
//! ## Architecture Role
//!
//! ```text
//! Application → [codec] → radio transport
//!     ↑            ↓            ↓
//! Typed        Encode/Decode  Byte buffers
//! Payloads     Registry       Send/Receive
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Transport logic (radio, serial, sockets)
//! - Retransmission, integrity checks or encryption
//! - Version negotiation beyond carrying the version byte
//!
//! ## Example
//!
//! ```rust
//! use codec::{CommandRgbLed, ProtocolHeader, ProtocolPayload};
//!
//! let payload = ProtocolPayload::new(ProtocolHeader::new(1, 2, 3), CommandRgbLed::new(255, 0, 128));
//! let bytes = payload.encode()?;
//! assert_eq!(bytes.len(), 23);
//! assert_eq!(ProtocolPayload::decode(&bytes)?, payload);
//! # Ok::<(), codec::ProtocolError>(())
//! ```

// Core modules
pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod field;
pub mod header;
pub mod payload;
pub mod payload_type;
pub mod protocol_constants;

// Re-export key types for convenience
pub use config::{CodecConfig, ConfigError};
pub use data::{
    CommandMoveRaw, CommandRgbLed, Lh2RawData, Lh2RawLocation, PayloadBody, ProtocolData,
};
pub use error::{ProtocolError, ProtocolResult};
pub use field::{Endianness, FieldSpec, ProtocolField};
pub use header::{peek_header, ProtocolHeader, WireHeader};
pub use payload::{PayloadDecoder, ProtocolPayload};
pub use payload_type::{PayloadType, PayloadTypeRegistry, RegistryEntry};
pub use protocol_constants::*;
