//! Protocol constants
//!
//! Frame sizes, reserved opcode values, and the numeric conventions the
//! response decoders share.

// ============================================================================
// Addressing
// ============================================================================

/// Device-type byte that prefixes the pump ID on every frame.
pub const PUMP_DEVICE_TYPE: u8 = 0xA7;
/// Length of the address prefix: device type plus 3-byte pump ID.
pub const ADDRESS_PREFIX_LENGTH: usize = 4;
/// Length of the pump ID within the prefix.
pub const PUMP_ID_LENGTH: usize = 3;

// ============================================================================
// Frames
// ============================================================================

/// Pre-codec length of a command frame with no parameters.
pub const SHORT_COMMAND_FRAME: usize = 6;
/// Pre-codec length of a command frame carrying parameters, padding
/// included. Excludes the CRC-8 appended by the packet codec.
pub const MAX_COMMAND_FRAME: usize = 70;
/// Longest parameter block a command frame can carry.
pub const MAX_PARAMS: usize = 64;
/// Shortest response frame the classifier will accept.
pub const MIN_RESPONSE_FRAME: usize = 6;
/// Offset of the payload within a decoded response frame.
pub const RESPONSE_PAYLOAD_OFFSET: usize = 5;

// ============================================================================
// History pages
// ============================================================================

/// Assembled history page size, trailing CRC-16 included.
pub const HISTORY_PAGE_SIZE: usize = 1024;
/// Fragments per history page.
pub const NUM_FRAGMENTS: u8 = 16;
/// On-air fragment length: one sequence byte plus 64 payload bytes.
pub const FRAGMENT_LENGTH: usize = 65;
/// Bit set in the sequence byte of the final fragment.
pub const DONE_BIT: u8 = 0x80;

// ============================================================================
// Insulin quantities
// ============================================================================

/// Milli-units per basal stroke on newer pumps.
pub const FINE_STROKE_MILLI_UNITS: i32 = 25;
/// Milli-units per basal stroke on older pumps.
pub const COARSE_STROKE_MILLI_UNITS: i32 = 100;
/// Largest absolute temporary basal rate, in milli-units per hour.
pub const MAX_BASAL_RATE: i32 = 34000;

/// Lowest pump family that uses the newer response formats.
pub const NEWER_FAMILY: u8 = 23;
