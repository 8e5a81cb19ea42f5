//! # pumplink-pump
//!
//! Synchronous command engine for a wireless insulin pump.
//!
//! The [`Pump`] handle owns a half-duplex [`Radio`] and presents a blocking
//! "execute this command, get back the response payload" interface, plus a
//! fragmented history-page download with its own retransmission protocol.
//!
//! # Error model
//!
//! Errors latch on the handle rather than propagating through return
//! values: once an operation fails, every later operation is a no-op that
//! returns an empty or default value until the caller inspects
//! [`Pump::error`] and clears it. A batch of commands therefore aborts at
//! the first real problem without each call site having to thread results.
//!
//! Transient link failures (nothing heard, CRC-damaged reply) are retried
//! internally for idempotent queries; commands that carry parameters are
//! attempted exactly once.
//!
//! # Example
//!
//! ```rust,ignore
//! use pumplink_pump::{Pump, PumpConfig};
//!
//! let mut pump = Pump::with_config(radio, &PumpConfig::for_id("a7bc12"))?;
//! pump.wakeup();
//! let settings = pump.settings();
//! if let Some(err) = pump.error() {
//!     eprintln!("session aborted: {err}");
//! }
//! ```

mod error;
mod exchange;
mod history;
mod pump;
mod radio;
mod settings;
mod temp_basal;

pub use error::PumpError;
pub use pump::{Pump, PumpConfig, DEFAULT_RETRIES, DEFAULT_TIMEOUT};
pub use radio::{Radio, RadioError, Reception};

pub use pumplink_protocol::{
    Command, MilliUnits, ModelInfo, NakCode, ParsePumpIdError, PumpId, SettingsInfo,
    TempBasalInfo, TempBasalType,
};
