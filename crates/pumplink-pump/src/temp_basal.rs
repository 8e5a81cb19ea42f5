//! Temporary basal query and commands.

use std::time::Duration;

use tracing::warn;

use pumplink_protocol::constants::{FINE_STROKE_MILLI_UNITS, MAX_BASAL_RATE};
use pumplink_protocol::{decode_temp_basal, Command, MilliUnits, TempBasalInfo};

use crate::error::PumpError;
use crate::pump::Pump;
use crate::radio::Radio;

const HALF_HOUR: Duration = Duration::from_secs(30 * 60);
const MAX_TEMP_BASAL_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

impl<R: Radio> Pump<R> {
    /// Read the current temporary basal setting.
    ///
    /// When none is in effect the returned duration is zero.
    pub fn temp_basal(&mut self) -> TempBasalInfo {
        let data = self.execute(Command::TempBasal, &[]);
        if self.error().is_some() {
            return TempBasalInfo::default();
        }
        match decode_temp_basal(&data) {
            Ok(info) => info,
            Err(_) => {
                self.bad_response(Command::TempBasal, &data);
                TempBasalInfo::default()
            }
        }
    }

    /// Set a temporary basal with the given absolute rate and duration.
    ///
    /// The rate is quantized down to whole 25 mU strokes; quantization is
    /// logged when it changes the value.
    pub fn set_absolute_temp_basal(&mut self, duration: Duration, rate: MilliUnits) {
        let half_hours = match self.half_hours(duration) {
            Some(n) => n,
            None => return,
        };
        if rate.0 < 0 {
            self.set_error(PumpError::InvalidParameter(format!(
                "absolute temporary basal rate ({}) is negative",
                rate
            )));
            return;
        }
        if rate.0 > MAX_BASAL_RATE {
            self.set_error(PumpError::InvalidParameter(format!(
                "absolute temporary basal rate ({}) is too large",
                rate
            )));
            return;
        }
        let strokes = rate.0 / FINE_STROKE_MILLI_UNITS;
        let actual = strokes * FINE_STROKE_MILLI_UNITS;
        if actual != rate.0 {
            warn!(
                "rounding temporary basal rate from {} to {}",
                rate,
                MilliUnits(actual)
            );
        }
        let strokes = (strokes as u16).to_be_bytes();
        self.execute(
            Command::SetAbsoluteTempBasal,
            &[strokes[0], strokes[1], half_hours],
        );
    }

    /// Set a temporary basal with the given percent rate and duration.
    pub fn set_percent_temp_basal(&mut self, duration: Duration, percent: u8) {
        let half_hours = match self.half_hours(duration) {
            Some(n) => n,
            None => return,
        };
        if percent > 100 {
            self.set_error(PumpError::InvalidParameter(format!(
                "percent temporary basal rate ({}) is not between 0 and 100",
                percent
            )));
            return;
        }
        self.execute(Command::SetPercentTempBasal, &[percent, half_hours]);
    }

    /// Convert a temp-basal duration to half-hour units, latching a
    /// validation error for durations the pump cannot express.
    fn half_hours(&mut self, duration: Duration) -> Option<u8> {
        let minutes = duration.as_secs() / 60;
        if duration.as_nanos() % HALF_HOUR.as_nanos() != 0 {
            self.set_error(PumpError::InvalidParameter(format!(
                "duration ({}m) is not a multiple of 30 minutes",
                minutes
            )));
            return None;
        }
        if duration > MAX_TEMP_BASAL_DURATION {
            self.set_error(PumpError::InvalidParameter(format!(
                "duration ({}m) is too large",
                minutes
            )));
            return None;
        }
        Some((duration.as_secs() / HALF_HOUR.as_secs()) as u8)
    }
}
