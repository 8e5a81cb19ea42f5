//! Command opcodes the engine can issue.

use std::fmt;

/// A pump command opcode.
///
/// `Ack` and `Nak` are reserved values that double as fragment-transfer
/// controls during history page downloads; the remaining opcodes are
/// request codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// Acknowledge; also solicits the next history fragment.
    Ack = 0x06,
    /// Negative acknowledge; also requests fragment retransmission.
    Nak = 0x15,
    /// Set a temporary basal with an absolute rate.
    SetAbsoluteTempBasal = 0x4C,
    /// Wake the pump's radio receiver.
    Wakeup = 0x5D,
    /// Set a temporary basal with a percent rate.
    SetPercentTempBasal = 0x69,
    /// Request a history page.
    HistoryPage = 0x80,
    /// Query the pump's model number.
    Model = 0x8D,
    /// Query the current temporary basal.
    TempBasal = 0x98,
    /// Query the number of the most recent history page.
    LastHistoryPage = 0x9D,
    /// Query the global settings block.
    Settings = 0xC0,
}

impl Command {
    /// Get the wire opcode for this command.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a command by wire opcode.
    pub fn from_code(code: u8) -> Option<Command> {
        match code {
            0x06 => Some(Command::Ack),
            0x15 => Some(Command::Nak),
            0x4C => Some(Command::SetAbsoluteTempBasal),
            0x5D => Some(Command::Wakeup),
            0x69 => Some(Command::SetPercentTempBasal),
            0x80 => Some(Command::HistoryPage),
            0x8D => Some(Command::Model),
            0x98 => Some(Command::TempBasal),
            0x9D => Some(Command::LastHistoryPage),
            0xC0 => Some(Command::Settings),
            _ => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Ack => "Ack",
            Command::Nak => "Nak",
            Command::SetAbsoluteTempBasal => "SetAbsoluteTempBasal",
            Command::Wakeup => "Wakeup",
            Command::SetPercentTempBasal => "SetPercentTempBasal",
            Command::HistoryPage => "HistoryPage",
            Command::Model => "Model",
            Command::TempBasal => "TempBasal",
            Command::LastHistoryPage => "LastHistoryPage",
            Command::Settings => "Settings",
        };
        write!(f, "{}", name)
    }
}
