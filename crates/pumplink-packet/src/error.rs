//! Error types for pumplink-packet.

use thiserror::Error;

/// Errors that can occur while decoding an on-air packet.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PacketError {
    /// A 6-bit group did not map to any nibble.
    #[error("invalid symbol 0x{symbol:02X} at byte offset {offset}")]
    InvalidSymbol {
        /// The offending 6-bit group.
        symbol: u8,
        /// Byte offset in the on-air stream where the group ended.
        offset: usize,
    },

    /// The symbol stream decoded to an odd number of nibbles.
    #[error("odd symbol count ({count})")]
    OddSymbolCount {
        /// Number of nibbles decoded.
        count: usize,
    },

    /// Leftover padding bits were not zero.
    #[error("nonzero padding bits at end of packet")]
    TrailingBits,

    /// The decoded frame is too short to carry a CRC.
    #[error("packet too short ({len} bytes)")]
    TooShort {
        /// Decoded length including the CRC byte.
        len: usize,
    },

    /// The trailing CRC-8 did not match the frame contents.
    #[error("CRC mismatch: computed {computed:02X} but received {received:02X}")]
    Crc {
        /// CRC computed over the received frame.
        computed: u8,
        /// CRC carried by the frame.
        received: u8,
    },
}
