//! # pumplink-protocol
//!
//! Wire-format knowledge for the pump command protocol.
//!
//! This crate is the pure, stateless layer: it knows how command frames are
//! laid out, how response frames are classified against the command that
//! solicited them, and how the payloads of individual responses decode into
//! typed values. It performs no I/O; the stateful engine in `pumplink-pump`
//! drives it.
//!
//! # Protocol Overview
//!
//! Every exchange is initiated by the host. A command frame carries the
//! 4-byte address prefix (device type `0xA7` plus the 3-byte pump ID), the
//! command opcode, a parameter length, and optionally a fixed-width
//! parameter block. Responses echo the address prefix and an opcode; the
//! payload bytes that follow are decoded per command by the `decode_*`
//! functions.

mod commands;
pub mod constants;
mod error;
mod frame;
mod responses;
mod types;

pub use commands::Command;
pub use error::{NakCode, ParsePumpIdError, ResponseError};
pub use frame::{classify_response, command_frame, Classification};
pub use responses::{
    decode_model, decode_settings, decode_temp_basal, ModelInfo, SettingsInfo,
    TempBasalInfo, TempBasalType,
};
pub use types::{byte_to_milli_units, two_byte_milli_units, MilliUnits, PumpId};
