//! The perform loop and the two-phase execute exchange.

use tracing::debug;

use pumplink_protocol::{classify_response, command_frame, Classification, Command};

use crate::error::PumpError;
use crate::pump::Pump;
use crate::radio::Radio;

impl<R: Radio> Pump<R> {
    /// Send a command and return the pump's response payload.
    ///
    /// Commands with parameters require an initial exchange with no
    /// parameters to prime the pump's command interpreter, followed by an
    /// exchange carrying the actual arguments. Parameterized exchanges are
    /// never retried.
    pub fn execute(&mut self, cmd: Command, params: &[u8]) -> Vec<u8> {
        if !params.is_empty() {
            self.perform(cmd, Command::Ack, &[]);
            if self.no_response() {
                self.set_error(PumpError::NotPerformed(cmd));
                return Vec::new();
            }
            return self.perform(cmd, Command::Ack, params);
        }
        self.perform(cmd, cmd, &[])
    }

    /// One command/response exchange with retry.
    ///
    /// Transient failures (radio error, nothing heard, undecodable reply)
    /// consume the retry budget; a frame that decodes but does not match
    /// latches immediately. Parameterized sends get a single attempt
    /// regardless of the configured budget.
    pub(crate) fn perform(
        &mut self,
        sent: Command,
        expected: Command,
        params: &[u8],
    ) -> Vec<u8> {
        if self.error.is_some() {
            return Vec::new();
        }
        let frame = command_frame(&self.id, sent, params);
        let framed = pumplink_packet::encode(&frame);
        let max_tries = if params.is_empty() { self.retries } else { 1 };
        for tries in 0..max_tries {
            self.error = None;
            let reception = match self.radio.send_and_receive(&framed, self.timeout) {
                Ok(reception) => reception,
                Err(err) => {
                    self.error = Some(err.into());
                    continue;
                }
            };
            if reception.frame.is_empty() {
                self.error = Some(PumpError::NoResponse(sent));
                continue;
            }
            let data = match pumplink_packet::decode(&reception.frame) {
                Ok(data) => data,
                Err(err) => {
                    self.error = Some(err.into());
                    continue;
                }
            };
            match classify_response(&self.id, sent, expected, &data) {
                Classification::Payload(payload) => {
                    log_tries(sent, tries);
                    self.rssi = reception.rssi;
                    return payload;
                }
                Classification::Unexpected => {
                    self.bad_response(sent, &data);
                    return Vec::new();
                }
                Classification::Rejected(code) => {
                    self.set_error(PumpError::InvalidCommand {
                        command: sent,
                        code,
                    });
                    return Vec::new();
                }
            }
        }
        // The loop only exits with a transient error latched; a zero retry
        // budget degenerates to the same no-response outcome.
        if self.error.is_none() {
            self.error = Some(PumpError::NoResponse(sent));
        }
        Vec::new()
    }
}

fn log_tries(cmd: Command, tries: u32) {
    if tries == 0 {
        return;
    }
    let noun = if tries == 1 { "retry" } else { "retries" };
    debug!("{} command required {} {}", cmd, tries, noun);
}
