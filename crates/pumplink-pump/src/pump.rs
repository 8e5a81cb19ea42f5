//! The stateful pump handle.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use pumplink_protocol::{decode_model, Command, ParsePumpIdError, PumpId};

use crate::error::PumpError;
use crate::radio::Radio;

/// Per-attempt receive timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);
/// Retry budget for idempotent commands used when none is configured.
pub const DEFAULT_RETRIES: u32 = 3;

const WAKE_RETRIES: u32 = 100;
const WAKE_TIMEOUT: Duration = Duration::from_millis(10);

/// Construction parameters for a pump handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PumpConfig {
    /// Pump serial number, six hex digits.
    pub id: String,
    /// Per-attempt receive timeout.
    pub timeout: Duration,
    /// Retry budget for idempotent commands.
    pub retries: u32,
}

impl Default for PumpConfig {
    fn default() -> Self {
        PumpConfig {
            id: String::new(),
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
        }
    }
}

impl PumpConfig {
    /// Config for the given serial number with default timing.
    pub fn for_id(id: &str) -> Self {
        PumpConfig {
            id: id.to_string(),
            ..PumpConfig::default()
        }
    }
}

/// Stateful handle for one pump over one radio.
///
/// All operations are blocking and strictly serial; the handle is not safe
/// for concurrent use. Failures latch in an error slot that short-circuits
/// every later operation until cleared (see the crate docs).
pub struct Pump<R: Radio> {
    pub(crate) radio: R,
    pub(crate) id: PumpId,
    pub(crate) family: u8,
    pub(crate) timeout: Duration,
    pub(crate) retries: u32,
    pub(crate) rssi: i16,
    pub(crate) error: Option<PumpError>,
}

impl<R: Radio> Pump<R> {
    /// Create a handle with default timing.
    pub fn new(radio: R, id: PumpId) -> Self {
        Pump {
            radio,
            id,
            family: 0,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            rssi: 0,
            error: None,
        }
    }

    /// Create a handle from a config, parsing the serial number.
    pub fn with_config(radio: R, config: &PumpConfig) -> Result<Self, ParsePumpIdError> {
        let id: PumpId = config.id.parse()?;
        let mut pump = Pump::new(radio, id);
        pump.timeout = config.timeout;
        pump.retries = config.retries;
        Ok(pump)
    }

    /// The pump's address.
    pub fn id(&self) -> PumpId {
        self.id
    }

    /// Access the owned radio.
    pub fn radio(&self) -> &R {
        &self.radio
    }

    /// Mutable access to the owned radio.
    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }

    /// The pump generation, or 0 until a model query has run.
    pub fn family(&self) -> u8 {
        self.family
    }

    /// Set the pump generation directly, for callers that already know it.
    pub fn set_family(&mut self, family: u8) {
        self.family = family;
    }

    /// The per-attempt receive timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Set the per-attempt receive timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// The retry budget for idempotent commands.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Set the retry budget for idempotent commands.
    pub fn set_retries(&mut self, retries: u32) {
        self.retries = retries;
    }

    /// Signal strength of the most recent successful receive, in dBm.
    pub fn rssi(&self) -> i16 {
        self.rssi
    }

    /// The latched error, if any.
    pub fn error(&self) -> Option<&PumpError> {
        self.error.as_ref()
    }

    /// Latch an error on the handle.
    pub fn set_error(&mut self, err: PumpError) {
        self.error = Some(err);
    }

    /// Clear the latched error, resuming normal operation.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Take the latched error, clearing it.
    pub fn take_error(&mut self) -> Option<PumpError> {
        self.error.take()
    }

    /// Whether the latched error is a no-response.
    pub fn no_response(&self) -> bool {
        matches!(self.error, Some(PumpError::NoResponse(_)))
    }

    /// Latch a bad-response error for `cmd` with the offending bytes.
    pub fn bad_response(&mut self, cmd: Command, data: &[u8]) {
        self.set_error(PumpError::BadResponse {
            command: cmd,
            data: data.to_vec(),
        });
    }

    /// Run `f` with the timeout set to `timeout`, restoring the previous
    /// value on every exit path.
    pub(crate) fn with_timeout<T>(
        &mut self,
        timeout: Duration,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.timeout;
        self.timeout = timeout;
        let result = f(self);
        self.timeout = saved;
        result
    }

    /// Run `f` with the retry budget set to `retries`, restoring the
    /// previous value on every exit path.
    pub(crate) fn with_retries<T>(
        &mut self,
        retries: u32,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.retries;
        self.retries = retries;
        let result = f(self);
        self.retries = saved;
        result
    }

    /// Query the pump's model number, e.g. "523".
    ///
    /// The first successful query also records the pump family (the model
    /// number's last two digits), which gates response formats elsewhere.
    pub fn model(&mut self) -> String {
        let data = self.execute(Command::Model, &[]);
        if self.error.is_some() {
            return String::new();
        }
        match decode_model(&data) {
            Ok(info) => {
                if self.family == 0 {
                    self.family = info.family;
                }
                info.number
            }
            Err(_) => {
                self.bad_response(Command::Model, &data);
                String::new()
            }
        }
    }

    /// Wake the pump's radio receiver.
    ///
    /// A pump that is already awake answers the model query and no wakeup
    /// traffic is needed. Otherwise the wakeup command is repeated with a
    /// short timeout until the pump responds.
    pub fn wakeup(&mut self) {
        self.model();
        if self.error.is_none() || !self.no_response() {
            return;
        }
        self.clear_error();
        info!("waking pump");
        self.with_retries(WAKE_RETRIES, |pump| {
            pump.with_timeout(WAKE_TIMEOUT, |pump| {
                pump.execute(Command::Wakeup, &[]);
            })
        });
        if self.error.is_none() {
            info!("pump awake");
        }
    }
}
