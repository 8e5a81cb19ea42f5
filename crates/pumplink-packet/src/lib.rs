//! # pumplink-packet
//!
//! Byte-level packet codec for the pump radio link.
//!
//! The pump transmits 4-bit nibbles as 6-bit symbols chosen for DC balance,
//! and protects every frame with a trailing CRC-8. This crate converts
//! between the raw frame bytes the protocol engine works with and the
//! symbol-coded bytes that actually go over the air:
//!
//! - [`encode`] appends the CRC-8 and produces the on-air byte stream.
//! - [`decode`] reverses the symbol coding, verifies the CRC-8, and strips it.
//! - [`crc16`] computes the checksum used to validate history pages.

mod codec;
mod crc;
mod error;

pub use codec::{decode, encode};
pub use crc::{crc16, crc8};
pub use error::PacketError;

/// Result type for packet operations.
pub type Result<T> = std::result::Result<T, PacketError>;
