//! History-page download engine.
//!
//! A history page arrives as 16 fragments of 65 bytes: a sequence byte
//! (1..16, bit 7 set on the last) followed by 64 payload bytes. The host
//! ACKs each fragment to solicit the next, or NAKs to have the current one
//! retransmitted. The concatenated payloads form a 1024-byte page whose
//! final two bytes are a CRC-16 over the preceding 1022.

use std::time::Duration;

use tracing::debug;

use pumplink_protocol::constants::{
    DONE_BIT, FRAGMENT_LENGTH, HISTORY_PAGE_SIZE, NUM_FRAGMENTS,
};
use pumplink_protocol::Command;

use crate::error::PumpError;
use crate::pump::Pump;
use crate::radio::Radio;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_millis(150);
const MAX_NAKS: u32 = 10;

/// Result of validating one received fragment.
enum FragmentCheck {
    /// The expected fragment; carries its 64-byte payload.
    Next(Vec<u8>),
    /// A duplicate of an already-consumed fragment; nothing to append.
    Duplicate(u8),
}

impl<R: Radio> Pump<R> {
    /// Download the given history page and return its 1022-byte body.
    ///
    /// The receive timeout is narrowed to 150 ms and the retry budget to 1
    /// for the duration of the transfer; both are restored on every exit
    /// path. On failure the cause is latched and the result is empty.
    pub fn download(&mut self, cmd: Command, page: u8) -> Vec<u8> {
        self.with_timeout(DOWNLOAD_TIMEOUT, |pump| {
            let first = pump.execute(cmd, &[page]);
            if pump.error.is_some() {
                return Vec::new();
            }
            pump.with_retries(1, |pump| pump.receive_page(cmd, page, first))
        })
    }

    fn receive_page(&mut self, cmd: Command, page: u8, mut data: Vec<u8>) -> Vec<u8> {
        let mut body = Vec::with_capacity(HISTORY_PAGE_SIZE);
        let mut expected: u8 = 1;
        loop {
            let seq = match self.check_fragment(page, &data, expected) {
                None => return Vec::new(),
                Some(FragmentCheck::Next(payload)) => {
                    body.extend_from_slice(&payload);
                    let seq = expected;
                    expected += 1;
                    seq
                }
                Some(FragmentCheck::Duplicate(seq)) => seq,
            };
            if seq == NUM_FRAGMENTS {
                return self.check_page_crc(page, body);
            }
            // Acknowledge the current fragment and receive the next.
            let next = self.perform(Command::Ack, cmd, &[]);
            data = if self.error.is_some() {
                if !self.no_response() {
                    return Vec::new();
                }
                let recovered = self.recover_fragment(cmd, page, expected);
                if self.error.is_some() {
                    return Vec::new();
                }
                recovered
            } else {
                next
            };
        }
    }

    /// Validate a fragment against the expected sequence number.
    ///
    /// Fragments behind the expected sequence are duplicates of replies we
    /// already consumed and are discarded without advancing; fragments
    /// ahead of it mean one was missed, which is fatal.
    fn check_fragment(
        &mut self,
        page: u8,
        data: &[u8],
        expected: u8,
    ) -> Option<FragmentCheck> {
        if data.len() != FRAGMENT_LENGTH {
            self.set_error(PumpError::FragmentLength {
                page,
                len: data.len(),
            });
            return None;
        }
        let seq = data[0] & !DONE_BIT;
        if seq > expected {
            self.set_error(PumpError::MissedFragment {
                page,
                got: seq,
                expected,
            });
            return None;
        }
        if seq < expected {
            return Some(FragmentCheck::Duplicate(seq));
        }
        let done = data[0] & DONE_BIT != 0;
        if done != (seq == NUM_FRAGMENTS) {
            self.set_error(PumpError::FinalSequence { page, seq });
            return None;
        }
        Some(FragmentCheck::Next(data[1..].to_vec()))
    }

    /// Request retransmission of the expected fragment with NAKs.
    ///
    /// Only entered after an ACK went unanswered. Any error other than
    /// another no-response surfaces; after `MAX_NAKS` unanswered NAKs the
    /// fragment is declared lost.
    fn recover_fragment(&mut self, cmd: Command, page: u8, expected: u8) -> Vec<u8> {
        for count in 0..MAX_NAKS {
            self.clear_error();
            let data = self.perform(Command::Nak, cmd, &[]);
            if self.error.is_none() {
                let seq = data.first().map_or(0, |b| b & !DONE_BIT);
                let noun = if count == 0 { "NAK" } else { "NAKs" };
                debug!(
                    "history page {}: received fragment {} after {} {}",
                    page,
                    seq,
                    count + 1,
                    noun
                );
                return data;
            }
            if !self.no_response() {
                return Vec::new();
            }
        }
        self.set_error(PumpError::LostFragment {
            page,
            seq: expected,
        });
        Vec::new()
    }

    /// Verify the page CRC and return the body with the CRC removed.
    fn check_page_crc(&mut self, page: u8, mut data: Vec<u8>) -> Vec<u8> {
        if data.len() != HISTORY_PAGE_SIZE {
            self.set_error(PumpError::PageSize {
                page,
                len: data.len(),
            });
            return Vec::new();
        }
        let received = u16::from_be_bytes([
            data[HISTORY_PAGE_SIZE - 2],
            data[HISTORY_PAGE_SIZE - 1],
        ]);
        data.truncate(HISTORY_PAGE_SIZE - 2);
        let computed = pumplink_packet::crc16(&data);
        if computed != received {
            self.set_error(PumpError::PageCrc {
                page,
                computed,
                received,
            });
            return Vec::new();
        }
        data
    }
}
