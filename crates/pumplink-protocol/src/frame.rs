//! Command frame construction and response classification.
//!
//! ## Command frame layout (pre-codec)
//!
//! | Field         | Size | Description                                 |
//! |---------------|------|---------------------------------------------|
//! | address       | 4    | Device type `0xA7` plus 3-byte pump ID      |
//! | opcode        | 1    | Command code                                |
//! | param length  | 1    | Number of parameter bytes (0 for none)      |
//! | params + pad  | 64   | Present only when the length is nonzero     |
//!
//! The packet codec appends the CRC-8; it is not part of these buffers.
//! Frames without parameters use the 6-byte short form to reduce airtime.
//!
//! Response frames echo the 4-byte address followed by an opcode; the
//! payload starts at byte 5 and its length is implied by the command.

use bytes::{BufMut, BytesMut};

use crate::commands::Command;
use crate::constants::*;
use crate::error::NakCode;
use crate::types::PumpId;

/// Build the pre-codec bytes of a command frame.
pub fn command_frame(id: &PumpId, cmd: Command, params: &[u8]) -> BytesMut {
    debug_assert!(params.len() <= MAX_PARAMS);
    let mut frame = BytesMut::with_capacity(if params.is_empty() {
        SHORT_COMMAND_FRAME
    } else {
        MAX_COMMAND_FRAME
    });
    frame.put_slice(&id.prefix());
    frame.put_u8(cmd.code());
    frame.put_u8(params.len() as u8);
    if !params.is_empty() {
        frame.put_slice(params);
        frame.resize(MAX_COMMAND_FRAME, 0);
    }
    frame
}

/// Outcome of matching a decoded response frame against the command that
/// solicited it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The frame matched; these are the payload bytes after the opcode.
    Payload(Vec<u8>),
    /// The frame came from another device or carried the wrong opcode.
    Unexpected,
    /// The pump answered with a NAK carrying an error code.
    Rejected(NakCode),
}

/// Classify a decoded response frame.
///
/// A frame is accepted when it echoes our address prefix and carries the
/// sent opcode, the expected response opcode, or an ACK replying to a
/// wakeup. Frames from other devices on the shared band are rejected by
/// the address check.
pub fn classify_response(
    id: &PumpId,
    sent: Command,
    expected: Command,
    frame: &[u8],
) -> Classification {
    if frame.len() < MIN_RESPONSE_FRAME {
        return Classification::Unexpected;
    }
    if frame[..ADDRESS_PREFIX_LENGTH] != id.prefix() {
        return Classification::Unexpected;
    }
    let opcode = frame[ADDRESS_PREFIX_LENGTH];
    if opcode == sent.code() || opcode == expected.code() {
        return Classification::Payload(frame[RESPONSE_PAYLOAD_OFFSET..].to_vec());
    }
    if opcode == Command::Ack.code() {
        if sent == Command::Wakeup {
            return Classification::Payload(frame[RESPONSE_PAYLOAD_OFFSET..].to_vec());
        }
        return Classification::Unexpected;
    }
    if opcode == Command::Nak.code() {
        return Classification::Rejected(NakCode::from(frame[RESPONSE_PAYLOAD_OFFSET]));
    }
    Classification::Unexpected
}
