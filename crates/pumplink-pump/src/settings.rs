//! Global settings query.

use pumplink_protocol::{decode_settings, Command, SettingsInfo};

use crate::pump::Pump;
use crate::radio::Radio;

impl<R: Radio> Pump<R> {
    /// Read the pump's global settings block.
    pub fn settings(&mut self) -> SettingsInfo {
        // Format of the response depends on the pump family.
        let family = self.family();
        let data = self.execute(Command::Settings, &[]);
        if self.error().is_some() {
            return SettingsInfo::default();
        }
        match decode_settings(&data, family) {
            Ok(info) => info,
            Err(_) => {
                self.bad_response(Command::Settings, &data);
                SettingsInfo::default()
            }
        }
    }
}
