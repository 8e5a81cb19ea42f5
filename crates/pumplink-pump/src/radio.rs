//! The transceiver seam.
//!
//! The engine talks to the radio through a single blocking primitive, so
//! any transceiver (hardware driver, serial bridge, or an in-memory fake in
//! tests) can sit behind it.

use std::time::Duration;

use thiserror::Error;

/// A reply heard from the air, with its signal strength.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reception {
    /// Raw frame bytes as received; empty when nothing was heard in time.
    pub frame: Vec<u8>,
    /// Received signal strength, in dBm.
    pub rssi: i16,
}

/// A failure reported by the transceiver itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RadioError(pub String);

/// Half-duplex transceiver: transmit one frame, then listen for a reply.
pub trait Radio {
    /// Transmit `frame` and wait up to `timeout` for a reply.
    ///
    /// An empty reply means nothing was heard within the timeout; that is a
    /// valid outcome, not an error.
    fn send_and_receive(
        &mut self,
        frame: &[u8],
        timeout: Duration,
    ) -> Result<Reception, RadioError>;
}
