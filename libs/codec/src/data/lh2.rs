//! Lighthouse (LH2) localization bodies reported by the robots

use super::ProtocolData;
use crate::error::{ProtocolError, ProtocolResult};
use crate::field::{FieldReader, FieldSpec, ProtocolField};
use crate::protocol_constants::LH2_LOCATION_COUNT;
use serde::{Deserialize, Serialize};

const BITS: FieldSpec = FieldSpec::unsigned("bits", 8);
const POLYNOMIAL_INDEX: FieldSpec = FieldSpec::unsigned("poly", 1);
const OFFSET: FieldSpec = FieldSpec::signed("off.", 1);

/// One raw lighthouse sweep capture (10 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Lh2RawLocation {
    pub bits: u64,
    pub polynomial_index: u8,
    pub offset: i8,
}

impl Lh2RawLocation {
    pub fn new(bits: u64, polynomial_index: u8, offset: i8) -> Self {
        Self {
            bits,
            polynomial_index,
            offset,
        }
    }
}

impl ProtocolData for Lh2RawLocation {
    const WIDTH: usize = 10;

    fn fields(&self) -> Vec<ProtocolField> {
        vec![
            BITS.with_value(self.bits),
            POLYNOMIAL_INDEX.with_value(self.polynomial_index),
            OFFSET.with_value(self.offset),
        ]
    }

    fn decode(bytes: &[u8]) -> ProtocolResult<Self> {
        let mut reader = FieldReader::new(bytes, Self::WIDTH, "Lh2RawLocation record")?;
        Ok(Self {
            bits: reader.read_u64(&BITS)?,
            polynomial_index: reader.read_u8(&POLYNOMIAL_INDEX)?,
            offset: reader.read_i8(&OFFSET)?,
        })
    }
}

/// Four raw lighthouse captures, one per sweep (40 bytes)
///
/// The record count is fixed by the array type, so a body with more or
/// fewer records cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Lh2RawData {
    pub locations: [Lh2RawLocation; LH2_LOCATION_COUNT],
}

impl Lh2RawData {
    pub fn new(locations: [Lh2RawLocation; LH2_LOCATION_COUNT]) -> Self {
        Self { locations }
    }
}

impl ProtocolData for Lh2RawData {
    const WIDTH: usize = LH2_LOCATION_COUNT * Lh2RawLocation::WIDTH;

    fn fields(&self) -> Vec<ProtocolField> {
        self.locations
            .iter()
            .flat_map(|location| location.fields())
            .collect()
    }

    fn decode(bytes: &[u8]) -> ProtocolResult<Self> {
        if bytes.len() < Self::WIDTH {
            return Err(ProtocolError::truncated(
                Self::WIDTH,
                bytes.len(),
                "Lh2RawData body",
            ));
        }

        let mut locations = [Lh2RawLocation::default(); LH2_LOCATION_COUNT];
        for (location, chunk) in locations
            .iter_mut()
            .zip(bytes[..Self::WIDTH].chunks_exact(Lh2RawLocation::WIDTH))
        {
            *location = Lh2RawLocation::decode(chunk)?;
        }
        Ok(Self { locations })
    }
}
