//! Packet encoding and decoding.
//!
//! Every frame byte is split into two nibbles and each nibble is sent as a
//! 6-bit symbol, packed most-significant-bit first and zero-padded to a byte
//! boundary. A CRC-8 over the raw frame is appended before symbol coding.
//!
//! ## On-air layout
//!
//! | Field    | Size                   | Description                          |
//! |----------|------------------------|--------------------------------------|
//! | symbols  | 6 bits per nibble      | 4b/6b-coded frame bytes plus CRC-8   |
//! | padding  | 0 or 4 bits            | Zero bits completing the last byte   |

use crate::crc::crc8;
use crate::error::PacketError;

/// 6-bit symbol for each nibble value.
const ENCODE_4B6B: [u8; 16] = [
    0x15, 0x31, 0x32, 0x23, 0x34, 0x25, 0x26, 0x16, 0x1A, 0x19, 0x2A, 0x0B,
    0x2C, 0x0D, 0x0E, 0x1C,
];

/// Reverse lookup from 6-bit symbol to nibble.
fn decode_symbol(symbol: u8) -> Option<u8> {
    ENCODE_4B6B
        .iter()
        .position(|&s| s == symbol)
        .map(|nibble| nibble as u8)
}

/// Encode a raw frame for transmission.
///
/// Appends the CRC-8 and converts the result to the on-air symbol stream.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let crc = crc8(data);
    let mut framed = Vec::with_capacity((data.len() + 1) * 3 / 2 + 1);
    let mut acc: u32 = 0;
    let mut bits = 0;
    for &byte in data.iter().chain(std::iter::once(&crc)) {
        for nibble in [byte >> 4, byte & 0x0F] {
            acc = (acc << 6) | u32::from(ENCODE_4B6B[nibble as usize]);
            bits += 6;
            while bits >= 8 {
                bits -= 8;
                framed.push((acc >> bits) as u8);
            }
        }
    }
    if bits > 0 {
        framed.push((acc << (8 - bits)) as u8);
    }
    framed
}

/// Decode an on-air byte stream back to the raw frame.
///
/// Reverses the symbol coding, verifies the trailing CRC-8, and returns the
/// frame with the CRC stripped.
pub fn decode(framed: &[u8]) -> Result<Vec<u8>, PacketError> {
    let mut nibbles = Vec::with_capacity(framed.len());
    let mut acc: u32 = 0;
    let mut bits = 0;
    for (offset, &byte) in framed.iter().enumerate() {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;
        while bits >= 6 {
            bits -= 6;
            let symbol = ((acc >> bits) & 0x3F) as u8;
            match decode_symbol(symbol) {
                Some(nibble) => nibbles.push(nibble),
                None => return Err(PacketError::InvalidSymbol { symbol, offset }),
            }
        }
    }
    if bits > 0 && acc & ((1 << bits) - 1) != 0 {
        return Err(PacketError::TrailingBits);
    }
    if nibbles.len() % 2 != 0 {
        return Err(PacketError::OddSymbolCount {
            count: nibbles.len(),
        });
    }
    let mut data: Vec<u8> = nibbles
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect();
    if data.len() < 2 {
        return Err(PacketError::TooShort { len: data.len() });
    }
    let received = data[data.len() - 1];
    data.truncate(data.len() - 1);
    let computed = crc8(&data);
    if computed != received {
        return Err(PacketError::Crc { computed, received });
    }
    Ok(data)
}
