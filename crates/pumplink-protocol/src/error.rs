//! Protocol error types.

use std::fmt;
use thiserror::Error;

/// Errors that can occur when decoding a response payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResponseError {
    /// Payload is too short for the command's format.
    #[error("response too short: expected at least {expected} bytes, got {actual}")]
    TooShort {
        /// Expected minimum length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// The payload's leading length byte did not match the format.
    #[error("unexpected length header: {0}")]
    BadLengthHeader(u8),

    /// Unknown insulin concentration code.
    #[error("unknown insulin concentration code: 0x{0:02X}")]
    UnknownConcentration(u8),

    /// Unknown temporary basal type tag.
    #[error("unknown temporary basal type: 0x{0:02X}")]
    UnknownTempBasalType(u8),

    /// The model number field was not a decimal integer.
    #[error("model number {0:?} is not numeric")]
    BadModelNumber(String),
}

/// Error codes reported by the pump inside a NAK frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NakCode {
    /// The pump refused the command.
    CommandRefused,
    /// A supplied value exceeds the pump's configured maximum.
    MaxSettingExceeded,
    /// A bolus is in progress and blocks the command.
    BolusInProgress,
    /// The requested history page number does not exist.
    InvalidHistoryPage,
    /// Unknown error code.
    Other(u8),
}

impl fmt::Display for NakCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NakCode::CommandRefused => write!(f, "command refused"),
            NakCode::MaxSettingExceeded => write!(f, "max setting exceeded"),
            NakCode::BolusInProgress => write!(f, "bolus in progress"),
            NakCode::InvalidHistoryPage => write!(f, "invalid history page"),
            NakCode::Other(code) => write!(f, "unknown error (0x{:02X})", code),
        }
    }
}

impl From<u8> for NakCode {
    fn from(code: u8) -> Self {
        match code {
            0x08 => NakCode::CommandRefused,
            0x09 => NakCode::MaxSettingExceeded,
            0x0C => NakCode::BolusInProgress,
            0x0D => NakCode::InvalidHistoryPage,
            _ => NakCode::Other(code),
        }
    }
}

impl From<NakCode> for u8 {
    fn from(code: NakCode) -> Self {
        match code {
            NakCode::CommandRefused => 0x08,
            NakCode::MaxSettingExceeded => 0x09,
            NakCode::BolusInProgress => 0x0C,
            NakCode::InvalidHistoryPage => 0x0D,
            NakCode::Other(code) => code,
        }
    }
}

/// Error parsing a pump ID string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("pump ID must be 6 hex digits, got {0:?}")]
pub struct ParsePumpIdError(pub String);
