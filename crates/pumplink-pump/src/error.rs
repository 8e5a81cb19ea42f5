//! Engine error types.

use pumplink_packet::PacketError;
use pumplink_protocol::{Command, NakCode};
use thiserror::Error;

use crate::radio::RadioError;

/// Errors latched on the pump handle.
///
/// The first five kinds mirror the command exchange: the transient ones
/// (`NoResponse`, `Packet`, `Radio`) are retried internally for idempotent
/// commands; the rest surface immediately. The history-page kinds are all
/// fatal to the download that raised them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PumpError {
    /// The pump did not answer within the receive timeout.
    #[error("no response to {0}")]
    NoResponse(Command),

    /// The packet codec could not decode the reply.
    #[error(transparent)]
    Packet(#[from] PacketError),

    /// The transceiver reported a failure.
    #[error("radio: {0}")]
    Radio(String),

    /// The reply did not match the sent command.
    #[error("unexpected response to {command}: {data:02X?}")]
    BadResponse {
        /// The command that was sent.
        command: Command,
        /// The decoded frame or payload that did not match.
        data: Vec<u8>,
    },

    /// The pump rejected the command with a NAK.
    #[error("{command} error: {code}")]
    InvalidCommand {
        /// The command that was sent.
        command: Command,
        /// Error code carried by the NAK frame.
        code: NakCode,
    },

    /// A caller-supplied parameter failed validation before sending.
    #[error("{0}")]
    InvalidParameter(String),

    /// The priming phase of a parameterized command got no response.
    #[error("{0} command not performed")]
    NotPerformed(Command),

    /// A history fragment had the wrong length.
    #[error("history page {page}: unexpected fragment length ({len})")]
    FragmentLength {
        /// Page being downloaded.
        page: u8,
        /// Received fragment length.
        len: usize,
    },

    /// A history fragment arrived ahead of the expected sequence.
    #[error("history page {page}: received fragment {got} instead of {expected}")]
    MissedFragment {
        /// Page being downloaded.
        page: u8,
        /// Sequence number received.
        got: u8,
        /// Sequence number expected.
        expected: u8,
    },

    /// The done bit did not agree with the sequence number.
    #[error("history page {page}: unexpected final sequence number ({seq})")]
    FinalSequence {
        /// Page being downloaded.
        page: u8,
        /// Offending sequence number.
        seq: u8,
    },

    /// A fragment could not be recovered after repeated NAKs.
    #[error("history page {page}: lost fragment {seq}")]
    LostFragment {
        /// Page being downloaded.
        page: u8,
        /// Sequence number that never arrived.
        seq: u8,
    },

    /// The assembled page had the wrong size.
    #[error("history page {page}: unexpected size ({len})")]
    PageSize {
        /// Page being downloaded.
        page: u8,
        /// Assembled length.
        len: usize,
    },

    /// The page body did not match its trailing CRC-16.
    #[error("history page {page}: computed CRC {computed:04X} but received {received:04X}")]
    PageCrc {
        /// Page being downloaded.
        page: u8,
        /// CRC computed over the body.
        computed: u16,
        /// CRC carried by the page.
        received: u16,
    },
}

impl From<RadioError> for PumpError {
    fn from(err: RadioError) -> Self {
        PumpError::Radio(err.0)
    }
}
