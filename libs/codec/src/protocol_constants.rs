//! Protocol-level constants for the DotBot wire format
//!
//! These values are part of the wire contract between the controller and
//! the robots. They MUST stay identical on both ends.

/// Current protocol version
///
/// Carried in every header. A frame with a different version still decodes;
/// the mismatch is only reported.
pub const PROTOCOL_VERSION: u8 = 1;

/// Fixed header size in bytes (destination + source + swarm id + version)
pub const HEADER_SIZE: usize = 19;

/// Size of the payload type tag following the header
pub const TYPE_TAG_SIZE: usize = 1;

/// Offset of the type tag in a frame
pub const TYPE_TAG_OFFSET: usize = HEADER_SIZE;

/// Offset of the first body byte in a frame
pub const BODY_OFFSET: usize = HEADER_SIZE + TYPE_TAG_SIZE;

/// Smallest buffer that can hold a header and a type tag
pub const MIN_FRAME_SIZE: usize = BODY_OFFSET;

/// Widest primitive field the codec encodes
pub const MAX_FIELD_LENGTH: usize = 8;

/// Number of lighthouse records in an LH2 raw data body
pub const LH2_LOCATION_COUNT: usize = 4;
