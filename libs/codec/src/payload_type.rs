//! # Payload Type Registry - Tag to Body Dispatch
//!
//! ## Purpose
//!
//! Maps the one-byte type tag that follows the header to the body width and
//! the decoder for that body. The registry is the only place that knows how
//! many body bytes a tag implies; the payload decoder never computes body
//! offsets on its own.
//!
//! ## Architecture Role
//!
//! ```text
//! Raw frame → [tag byte] → PayloadTypeRegistry::lookup → (width, decoder)
//!                                                             ↓
//!                                          bytes[20 .. 20 + width] → PayloadBody
//! ```

use crate::data::{
    CommandMoveRaw, CommandRgbLed, Lh2RawData, Lh2RawLocation, PayloadBody, ProtocolData,
};
use crate::error::{ProtocolError, ProtocolResult};
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payload type tags
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayloadType {
    /// Raw motor command
    CmdMoveRaw = 0,
    /// RGB LED color command
    CmdRgbLed = 1,
    /// Four raw lighthouse captures
    Lh2RawData = 2,
    /// Single lighthouse capture
    Lh2Location = 3,
}

impl PayloadType {
    /// Wire name used by diagnostic tooling
    pub fn name(&self) -> &'static str {
        match self {
            PayloadType::CmdMoveRaw => "CMD_MOVE_RAW",
            PayloadType::CmdRgbLed => "CMD_RGB_LED",
            PayloadType::Lh2RawData => "LH2_RAW_DATA",
            PayloadType::Lh2Location => "LH2_LOCATION",
        }
    }

    /// Parse a tag byte
    pub fn from_tag(tag: u8) -> ProtocolResult<Self> {
        Self::try_from(tag).map_err(|_| ProtocolError::unsupported_payload_type(tag))
    }

    /// Registry entry for this type
    pub fn entry(&self) -> &'static RegistryEntry {
        // Every variant has exactly one entry, checked by tests below
        &REGISTRY[*self as usize]
    }

    /// Fixed body width for this type
    pub fn body_width(&self) -> usize {
        self.entry().body_width
    }
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoder signature shared by every registry entry
pub type BodyDecoder = fn(&[u8]) -> ProtocolResult<PayloadBody>;

/// Width and decoder for one payload type
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    pub payload_type: PayloadType,
    pub body_width: usize,
    pub decode: BodyDecoder,
}

fn decode_body<T>(bytes: &[u8]) -> ProtocolResult<PayloadBody>
where
    T: ProtocolData + Into<PayloadBody>,
{
    T::decode(bytes).map(Into::into)
}

/// Indexed by tag value
static REGISTRY: [RegistryEntry; 4] = [
    RegistryEntry {
        payload_type: PayloadType::CmdMoveRaw,
        body_width: CommandMoveRaw::WIDTH,
        decode: decode_body::<CommandMoveRaw>,
    },
    RegistryEntry {
        payload_type: PayloadType::CmdRgbLed,
        body_width: CommandRgbLed::WIDTH,
        decode: decode_body::<CommandRgbLed>,
    },
    RegistryEntry {
        payload_type: PayloadType::Lh2RawData,
        body_width: Lh2RawData::WIDTH,
        decode: decode_body::<Lh2RawData>,
    },
    RegistryEntry {
        payload_type: PayloadType::Lh2Location,
        body_width: Lh2RawLocation::WIDTH,
        decode: decode_body::<Lh2RawLocation>,
    },
];

/// Static tag registry
pub struct PayloadTypeRegistry;

impl PayloadTypeRegistry {
    /// Resolve a tag byte to its entry
    pub fn lookup(tag: u8) -> ProtocolResult<&'static RegistryEntry> {
        PayloadType::from_tag(tag).map(|payload_type| payload_type.entry())
    }

    /// All registered entries, in tag order
    pub fn entries() -> &'static [RegistryEntry] {
        &REGISTRY
    }

    /// All payload types
    pub fn all_types() -> Vec<PayloadType> {
        REGISTRY.iter().map(|entry| entry.payload_type).collect()
    }
}
