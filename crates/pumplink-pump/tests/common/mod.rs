//! Shared test fixtures: a scripted radio and on-air frame builders.
#![allow(dead_code)] // each test binary uses its own subset

use std::collections::VecDeque;
use std::time::Duration;

use pumplink_protocol::constants::HISTORY_PAGE_SIZE;
use pumplink_pump::{Pump, PumpId, Radio, RadioError, Reception};

/// RSSI reported for every scripted reply.
pub const TEST_RSSI: i16 = -62;

pub fn pump_id() -> PumpId {
    PumpId::new([0x12, 0x34, 0x56])
}

pub fn new_pump(radio: ScriptedRadio) -> Pump<ScriptedRadio> {
    Pump::new(radio, pump_id())
}

/// Build the encoded on-air bytes of a pump response frame.
pub fn response_frame(opcode: u8, payload: &[u8]) -> Vec<u8> {
    let mut raw = pump_id().prefix().to_vec();
    raw.push(opcode);
    raw.extend_from_slice(payload);
    pumplink_packet::encode(&raw)
}

/// Radio fake that replays scripted replies and records all traffic.
///
/// Once the script runs dry every further exchange hears silence, which is
/// what a real radio reports when the pump stops answering.
#[derive(Default)]
pub struct ScriptedRadio {
    replies: VecDeque<Result<Reception, RadioError>>,
    pub sent: Vec<Vec<u8>>,
    pub timeouts: Vec<Duration>,
}

impl ScriptedRadio {
    pub fn new() -> Self {
        ScriptedRadio::default()
    }

    /// Script a pump response frame.
    pub fn reply(&mut self, opcode: u8, payload: &[u8]) {
        self.replies.push_back(Ok(Reception {
            frame: response_frame(opcode, payload),
            rssi: TEST_RSSI,
        }));
    }

    /// Script raw on-air bytes, undecodable garbage included.
    pub fn reply_raw(&mut self, frame: Vec<u8>) {
        self.replies.push_back(Ok(Reception {
            frame,
            rssi: TEST_RSSI,
        }));
    }

    /// Script a timeout with nothing heard.
    pub fn silence(&mut self) {
        self.replies.push_back(Ok(Reception {
            frame: Vec::new(),
            rssi: 0,
        }));
    }

    /// Script a transceiver failure.
    pub fn fail(&mut self, message: &str) {
        self.replies.push_back(Err(RadioError(message.to_string())));
    }

    /// Decode the nth transmitted frame back to its raw bytes.
    pub fn sent_raw(&self, n: usize) -> Vec<u8> {
        pumplink_packet::decode(&self.sent[n]).expect("sent frame decodes")
    }
}

impl Radio for ScriptedRadio {
    fn send_and_receive(
        &mut self,
        frame: &[u8],
        timeout: Duration,
    ) -> Result<Reception, RadioError> {
        self.sent.push(frame.to_vec());
        self.timeouts.push(timeout);
        self.replies.pop_front().unwrap_or_else(|| {
            Ok(Reception {
                frame: Vec::new(),
                rssi: 0,
            })
        })
    }
}

/// A full history page: a patterned 1022-byte body plus its CRC-16.
pub fn history_page() -> Vec<u8> {
    let body: Vec<u8> = (0..HISTORY_PAGE_SIZE - 2).map(|i| (i % 251) as u8).collect();
    let crc = pumplink_packet::crc16(&body);
    let mut page = body;
    page.extend_from_slice(&crc.to_be_bytes());
    page
}

/// The 65-byte on-air fragment carrying part `seq` (1..=16) of `page`.
pub fn fragment(page: &[u8], seq: u8) -> Vec<u8> {
    let done = if seq == 16 { 0x80 } else { 0 };
    let start = (seq as usize - 1) * 64;
    let mut frag = Vec::with_capacity(65);
    frag.push(seq | done);
    frag.extend_from_slice(&page[start..start + 64]);
    frag
}
