//! # Field Descriptors - Primitive Wire Encoding
//!
//! Every value on the wire is an integer of 1 to 8 bytes with an explicit
//! byte order and signedness. [`FieldSpec`] is the static half of that
//! description (label, width, order, sign) and is declared once per field as
//! a constant. [`ProtocolField`] pairs a spec with a concrete value and is
//! what header and body types hand out through their `fields()` methods.
//!
//! Encoding checks that the value is representable in the declared width:
//! an out-of-range value is a [`ProtocolError::FieldOverflow`], never a
//! silently truncated byte pattern.

use crate::error::{ProtocolError, ProtocolResult};
use crate::protocol_constants::MAX_FIELD_LENGTH;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte order of a field on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    #[default]
    Big,
    Little,
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endianness::Big => write!(f, "big"),
            Endianness::Little => write!(f, "little"),
        }
    }
}

/// Static wire layout of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Debug label used by diagnostic tooling
    pub name: &'static str,
    /// Width in bytes
    pub length: usize,
    pub endian: Endianness,
    pub signed: bool,
}

impl FieldSpec {
    /// Big-endian unsigned field
    pub const fn unsigned(name: &'static str, length: usize) -> Self {
        Self {
            name,
            length,
            endian: Endianness::Big,
            signed: false,
        }
    }

    /// Big-endian two's-complement field
    pub const fn signed(name: &'static str, length: usize) -> Self {
        Self {
            name,
            length,
            endian: Endianness::Big,
            signed: true,
        }
    }

    /// Bind a value to this layout
    pub fn with_value(&self, value: impl Into<i128>) -> ProtocolField {
        ProtocolField {
            value: value.into(),
            name: self.name,
            length: self.length,
            endian: self.endian,
            signed: self.signed,
        }
    }

    /// Inclusive range of values representable by this layout
    pub fn value_range(&self) -> Option<(i128, i128)> {
        if self.length == 0 || self.length > MAX_FIELD_LENGTH {
            return None;
        }
        let bits = 8 * self.length as u32;
        if self.signed {
            let half = 1i128 << (bits - 1);
            Some((-half, half - 1))
        } else {
            Some((0, (1i128 << bits) - 1))
        }
    }

    /// Decode exactly `length` bytes from the front of `bytes`
    ///
    /// Layouts outside 1..=8 bytes are rejected with `FieldOverflow`, the
    /// same as on encode.
    pub fn decode(&self, bytes: &[u8]) -> ProtocolResult<i128> {
        if self.value_range().is_none() {
            return Err(ProtocolError::field_overflow(
                self.name,
                0,
                self.length,
                self.signed,
            ));
        }
        if bytes.len() < self.length {
            return Err(ProtocolError::truncated(
                self.length,
                bytes.len(),
                format!("field '{}'", self.name),
            ));
        }

        let mut raw = [0u8; MAX_FIELD_LENGTH];
        let width = self.length;
        let source = &bytes[..width];
        let slot = &mut raw[MAX_FIELD_LENGTH - width..];
        match self.endian {
            Endianness::Big => slot.copy_from_slice(source),
            Endianness::Little => {
                for (dst, src) in slot.iter_mut().zip(source.iter().rev()) {
                    *dst = *src;
                }
            }
        }

        let unsigned = u64::from_be_bytes(raw) as i128;
        if self.signed && raw[MAX_FIELD_LENGTH - width] & 0x80 != 0 {
            Ok(unsigned - (1i128 << (8 * width as u32)))
        } else {
            Ok(unsigned)
        }
    }
}

/// A field value together with its wire layout
///
/// This is the unit consumed by renderers: `(name, value, length, endian,
/// signed)` is enough to draw a hex dump without knowing the message layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProtocolField {
    pub value: i128,
    pub name: &'static str,
    pub length: usize,
    pub endian: Endianness,
    pub signed: bool,
}

impl ProtocolField {
    /// Layout of this field without its value
    pub fn spec(&self) -> FieldSpec {
        FieldSpec {
            name: self.name,
            length: self.length,
            endian: self.endian,
            signed: self.signed,
        }
    }

    /// Serialize the value into exactly `length` bytes
    pub fn encode(&self) -> ProtocolResult<Vec<u8>> {
        let mut buffer = Vec::with_capacity(self.length);
        self.encode_into(&mut buffer)?;
        Ok(buffer)
    }

    /// Append the encoded value to `buffer`
    ///
    /// On overflow nothing is written.
    pub fn encode_into(&self, buffer: &mut Vec<u8>) -> ProtocolResult<()> {
        let in_range = self
            .spec()
            .value_range()
            .is_some_and(|(min, max)| (min..=max).contains(&self.value));
        if !in_range {
            return Err(ProtocolError::field_overflow(
                self.name,
                self.value,
                self.length,
                self.signed,
            ));
        }

        // Two's complement low bytes of the i128 are the wire bytes for both
        // signed and unsigned values once the range check has passed.
        let wide = self.value.to_be_bytes();
        let low = &wide[wide.len() - self.length..];
        match self.endian {
            Endianness::Big => buffer.extend_from_slice(low),
            Endianness::Little => buffer.extend(low.iter().rev()),
        }
        Ok(())
    }

    /// Hex string of the encoded bytes, `None` when the value overflows
    pub fn hex(&self) -> Option<String> {
        self.encode().ok().map(hex::encode)
    }
}

/// Encode a sequence of fields back to back
pub fn encode_fields(fields: &[ProtocolField], buffer: &mut Vec<u8>) -> ProtocolResult<()> {
    let start = buffer.len();
    for field in fields {
        if let Err(e) = field.encode_into(buffer) {
            buffer.truncate(start);
            return Err(e);
        }
    }
    Ok(())
}

/// Total wire width of a field sequence
pub fn fields_width(fields: &[ProtocolField]) -> usize {
    fields.iter().map(|field| field.length).sum()
}

/// Sequential reader over a body or header slice
///
/// Reads advance by each spec's width, so decoders consume bytes in the
/// same order and widths their `fields()` lists them.
#[derive(Debug)]
pub(crate) struct FieldReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> FieldReader<'a> {
    /// Start reading, failing early if `bytes` is shorter than `width`
    pub(crate) fn new(bytes: &'a [u8], width: usize, context: &str) -> ProtocolResult<Self> {
        if bytes.len() < width {
            return Err(ProtocolError::truncated(width, bytes.len(), context));
        }
        Ok(Self {
            bytes: &bytes[..width],
            offset: 0,
        })
    }

    pub(crate) fn read(&mut self, spec: &FieldSpec) -> ProtocolResult<i128> {
        let value = spec.decode(&self.bytes[self.offset..])?;
        self.offset += spec.length;
        Ok(value)
    }

    pub(crate) fn read_u64(&mut self, spec: &FieldSpec) -> ProtocolResult<u64> {
        debug_assert_eq!(spec.length, 8, "field '{}' is not a u64", spec.name);
        Ok(self.read(spec)? as u64)
    }

    pub(crate) fn read_u16(&mut self, spec: &FieldSpec) -> ProtocolResult<u16> {
        debug_assert_eq!(spec.length, 2, "field '{}' is not a u16", spec.name);
        Ok(self.read(spec)? as u16)
    }

    pub(crate) fn read_u8(&mut self, spec: &FieldSpec) -> ProtocolResult<u8> {
        debug_assert_eq!(spec.length, 1, "field '{}' is not a u8", spec.name);
        Ok(self.read(spec)? as u8)
    }

    pub(crate) fn read_i8(&mut self, spec: &FieldSpec) -> ProtocolResult<i8> {
        debug_assert_eq!(spec.length, 1, "field '{}' is not an i8", spec.name);
        Ok(self.read(spec)? as i8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_big_endian() {
        let field = FieldSpec::unsigned("swarm id", 2).with_value(0x0102u16);
        assert_eq!(field.encode().unwrap(), vec![0x01, 0x02]);
        assert_eq!(field.spec().decode(&[0x01, 0x02]).unwrap(), 0x0102);
    }

    #[test]
    fn test_little_endian() {
        let spec = FieldSpec {
            name: "le",
            length: 4,
            endian: Endianness::Little,
            signed: false,
        };
        let field = spec.with_value(0x0A0B0C0Du32);
        assert_eq!(field.encode().unwrap(), vec![0x0D, 0x0C, 0x0B, 0x0A]);
        assert_eq!(spec.decode(&[0x0D, 0x0C, 0x0B, 0x0A]).unwrap(), 0x0A0B0C0D);
    }

    #[test]
    fn test_signed_negative() {
        let spec = FieldSpec::signed("off.", 1);
        assert_eq!(spec.with_value(-1i8).encode().unwrap(), vec![0xFF]);
        assert_eq!(spec.decode(&[0xFF]).unwrap(), -1);
        assert_eq!(spec.decode(&[0x80]).unwrap(), -128);
        assert_eq!(spec.decode(&[0x7F]).unwrap(), 127);

        let wide = FieldSpec::signed("wide", 2);
        assert_eq!(wide.with_value(-2i16).encode().unwrap(), vec![0xFF, 0xFE]);
        assert_eq!(wide.decode(&[0xFF, 0xFE]).unwrap(), -2);
    }

    #[test]
    fn test_unsigned_full_width() {
        let spec = FieldSpec::unsigned("dst", 8);
        let field = spec.with_value(u64::MAX);
        assert_eq!(field.encode().unwrap(), vec![0xFF; 8]);
        assert_eq!(spec.decode(&[0xFF; 8]).unwrap(), u64::MAX as i128);
    }

    #[test]
    fn test_signed_bounds_overflow() {
        let spec = FieldSpec::signed("lx", 1);
        assert!(spec.with_value(-128).encode().is_ok());
        assert!(spec.with_value(127).encode().is_ok());

        assert!(matches!(
            spec.with_value(128).encode(),
            Err(ProtocolError::FieldOverflow { .. })
        ));
        assert!(matches!(
            spec.with_value(-129).encode(),
            Err(ProtocolError::FieldOverflow { .. })
        ));
    }

    #[test]
    fn test_unsigned_overflow() {
        let spec = FieldSpec::unsigned("red", 1);
        assert!(matches!(
            spec.with_value(256).encode(),
            Err(ProtocolError::FieldOverflow { .. })
        ));
        assert!(matches!(
            spec.with_value(-1).encode(),
            Err(ProtocolError::FieldOverflow { .. })
        ));

        let dst = FieldSpec::unsigned("dst", 8);
        assert!(dst.with_value(1i128 << 64).encode().is_err());
    }

    #[test]
    fn test_unsupported_length() {
        let zero = FieldSpec::unsigned("empty", 0).with_value(0);
        assert!(matches!(zero.encode(), Err(ProtocolError::FieldOverflow { .. })));

        let huge = FieldSpec::unsigned("huge", 9).with_value(0);
        assert!(matches!(huge.encode(), Err(ProtocolError::FieldOverflow { .. })));
    }

    #[test]
    fn test_decode_rejects_unsupported_length() {
        let huge = FieldSpec::unsigned("huge", 9);
        let bytes = [0x01, 0, 0, 0, 0, 0, 0, 0, 0x02];
        assert!(matches!(
            huge.decode(&bytes),
            Err(ProtocolError::FieldOverflow { length: 9, .. })
        ));
        // Encode and decode agree on which layouts exist
        assert!(huge.with_value(2).encode().is_err());

        let empty = FieldSpec::signed("empty", 0);
        assert!(matches!(
            empty.decode(&[]),
            Err(ProtocolError::FieldOverflow { length: 0, .. })
        ));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "is not a u8")]
    fn test_reader_type_width_mismatch() {
        let bytes = [0u8; 2];
        let mut reader = FieldReader::new(&bytes, 2, "mismatch").unwrap();
        let _ = reader.read_u8(&FieldSpec::unsigned("swarm id", 2));
    }

    #[test]
    fn test_decode_short_input() {
        let spec = FieldSpec::unsigned("bits", 8);
        let result = spec.decode(&[0x00; 3]);
        assert!(matches!(
            result,
            Err(ProtocolError::TruncatedBuffer { need: 8, got: 3, .. })
        ));
    }

    #[test]
    fn test_encode_fields_rolls_back_on_overflow() {
        let fields = [
            FieldSpec::unsigned("red", 1).with_value(1),
            FieldSpec::unsigned("green", 1).with_value(300),
        ];
        let mut buffer = vec![0xAA];
        assert!(encode_fields(&fields, &mut buffer).is_err());
        assert_eq!(buffer, vec![0xAA]);
    }

    #[test]
    fn test_hex_rendering() {
        let field = FieldSpec::unsigned("dst", 8).with_value(1u64);
        assert_eq!(field.hex().unwrap(), "0000000000000001");
        assert!(FieldSpec::unsigned("red", 1).with_value(999).hex().is_none());
    }

    #[test]
    fn test_reader_consumes_in_order() {
        let bytes = [0x00, 0x03, 0x01, 0xFF];
        let mut reader = FieldReader::new(&bytes, 4, "test").unwrap();
        assert_eq!(reader.read_u16(&FieldSpec::unsigned("a", 2)).unwrap(), 3);
        assert_eq!(reader.read_u8(&FieldSpec::unsigned("b", 1)).unwrap(), 1);
        assert_eq!(reader.read_i8(&FieldSpec::signed("c", 1)).unwrap(), -1);

        assert!(FieldReader::new(&bytes, 5, "test").is_err());
    }
}
