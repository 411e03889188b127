//! # Payload Bodies - Closed Set of Body Shapes
//!
//! Each body type declares its fixed wire width, lists its fields in wire
//! order, and decodes itself from exactly that many bytes. [`PayloadBody`]
//! is the tagged union over all of them; its variant determines the type
//! tag written on the wire, so a body can never travel under the wrong tag.
//!
//! | Tag | Body               | Width |
//! |-----|--------------------|-------|
//! | 0   | [`CommandMoveRaw`] | 4     |
//! | 1   | [`CommandRgbLed`]  | 3     |
//! | 2   | [`Lh2RawData`]     | 40    |
//! | 3   | [`Lh2RawLocation`] | 10    |

pub mod command;
pub mod lh2;

pub use command::{CommandMoveRaw, CommandRgbLed};
pub use lh2::{Lh2RawData, Lh2RawLocation};

use crate::error::ProtocolResult;
use crate::field::{encode_fields, ProtocolField};
use crate::payload_type::PayloadType;
use serde::{Deserialize, Serialize};

/// Fixed-width body that knows its own field layout
pub trait ProtocolData: Sized {
    /// Wire width in bytes, equal to the sum of `fields()` lengths
    const WIDTH: usize;

    /// Field descriptors built from the current values, in wire order
    fn fields(&self) -> Vec<ProtocolField>;

    /// Decode from the first `WIDTH` bytes of `bytes`
    fn decode(bytes: &[u8]) -> ProtocolResult<Self>;

    fn encode_into(&self, buffer: &mut Vec<u8>) -> ProtocolResult<()> {
        encode_fields(&self.fields(), buffer)
    }

    fn encode(&self) -> ProtocolResult<Vec<u8>> {
        let mut buffer = Vec::with_capacity(Self::WIDTH);
        self.encode_into(&mut buffer)?;
        Ok(buffer)
    }
}

/// Body of a payload, one variant per payload type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "values")]
pub enum PayloadBody {
    #[serde(rename = "CMD_MOVE_RAW")]
    MoveRaw(CommandMoveRaw),
    #[serde(rename = "CMD_RGB_LED")]
    RgbLed(CommandRgbLed),
    #[serde(rename = "LH2_RAW_DATA")]
    Lh2RawData(Lh2RawData),
    #[serde(rename = "LH2_LOCATION")]
    Lh2Location(Lh2RawLocation),
}

impl PayloadBody {
    /// Type tag this body is sent under
    pub fn payload_type(&self) -> PayloadType {
        match self {
            PayloadBody::MoveRaw(_) => PayloadType::CmdMoveRaw,
            PayloadBody::RgbLed(_) => PayloadType::CmdRgbLed,
            PayloadBody::Lh2RawData(_) => PayloadType::Lh2RawData,
            PayloadBody::Lh2Location(_) => PayloadType::Lh2Location,
        }
    }

    pub fn fields(&self) -> Vec<ProtocolField> {
        match self {
            PayloadBody::MoveRaw(body) => body.fields(),
            PayloadBody::RgbLed(body) => body.fields(),
            PayloadBody::Lh2RawData(body) => body.fields(),
            PayloadBody::Lh2Location(body) => body.fields(),
        }
    }

    /// Declared wire width of this body
    pub fn width(&self) -> usize {
        match self {
            PayloadBody::MoveRaw(_) => CommandMoveRaw::WIDTH,
            PayloadBody::RgbLed(_) => CommandRgbLed::WIDTH,
            PayloadBody::Lh2RawData(_) => Lh2RawData::WIDTH,
            PayloadBody::Lh2Location(_) => Lh2RawLocation::WIDTH,
        }
    }

    pub fn encode_into(&self, buffer: &mut Vec<u8>) -> ProtocolResult<()> {
        encode_fields(&self.fields(), buffer)
    }
}

impl From<CommandMoveRaw> for PayloadBody {
    fn from(body: CommandMoveRaw) -> Self {
        PayloadBody::MoveRaw(body)
    }
}

impl From<CommandRgbLed> for PayloadBody {
    fn from(body: CommandRgbLed) -> Self {
        PayloadBody::RgbLed(body)
    }
}

impl From<Lh2RawData> for PayloadBody {
    fn from(body: Lh2RawData) -> Self {
        PayloadBody::Lh2RawData(body)
    }
}

impl From<Lh2RawLocation> for PayloadBody {
    fn from(body: Lh2RawLocation) -> Self {
        PayloadBody::Lh2Location(body)
    }
}
