//! Protocol-level errors for DotBot payload processing
//!
//! Every failure the codec can report is one of three kinds: a buffer too
//! short for the structure being decoded, a type tag outside the closed
//! payload enumeration, or a field value that does not fit its declared
//! wire width. Each variant carries enough context to log a malformed frame
//! without re-parsing it.

use thiserror::Error;

/// Codec errors with diagnostic context
///
/// Decoding never yields a partially populated payload: any of these errors
/// means no value was produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Buffer is too small to contain the expected structure
    #[error("Truncated buffer: need {need} bytes, got {got} (context: {context})")]
    TruncatedBuffer {
        need: usize,
        got: usize,
        context: String,
    },

    /// Type tag is not one of the known payload types
    #[error("Unsupported payload type {payload_type:#04x}: valid types are 0-3 (CMD_MOVE_RAW, CMD_RGB_LED, LH2_RAW_DATA, LH2_LOCATION)")]
    UnsupportedPayloadType { payload_type: u8 },

    /// Field value is not representable in its declared width
    #[error("Field overflow: '{name}' value {value} does not fit in {length} {signedness} byte(s)")]
    FieldOverflow {
        name: String,
        value: i128,
        length: usize,
        signedness: &'static str,
    },
}

impl ProtocolError {
    /// Create TruncatedBuffer error with diagnostic context
    pub fn truncated(need: usize, got: usize, context: impl Into<String>) -> Self {
        Self::TruncatedBuffer {
            need,
            got,
            context: context.into(),
        }
    }

    /// Create UnsupportedPayloadType error for an unknown tag byte
    pub fn unsupported_payload_type(payload_type: u8) -> Self {
        Self::UnsupportedPayloadType { payload_type }
    }

    /// Create FieldOverflow error for a value outside the field's range
    pub fn field_overflow(name: impl Into<String>, value: i128, length: usize, signed: bool) -> Self {
        Self::FieldOverflow {
            name: name.into(),
            value,
            length,
            signedness: if signed { "signed" } else { "unsigned" },
        }
    }

    /// True when more bytes from the transport could make the frame decodable
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::TruncatedBuffer { .. })
    }
}

/// Result type for protocol operations
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_formatting() {
        let error = ProtocolError::truncated(19, 4, "ProtocolHeader decoding");

        let display = format!("{}", error);
        assert!(display.contains("need 19 bytes"));
        assert!(display.contains("got 4"));
        assert!(display.contains("context: ProtocolHeader decoding"));
        assert!(error.is_truncation());
    }

    #[test]
    fn test_unsupported_type_formatting() {
        let error = ProtocolError::unsupported_payload_type(0xFF);

        let display = format!("{}", error);
        assert!(display.contains("0xff"));
        assert!(!error.is_truncation());
    }

    #[test]
    fn test_field_overflow_formatting() {
        let error = ProtocolError::field_overflow("lx", 128, 1, true);

        let display = format!("{}", error);
        assert!(display.contains("'lx'"));
        assert!(display.contains("128"));
        assert!(display.contains("1 signed byte(s)"));

        let debug = format!("{:?}", error);
        assert!(debug.contains("FieldOverflow"));
    }
}
