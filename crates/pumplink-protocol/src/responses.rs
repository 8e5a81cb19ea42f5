//! Response payload decoders.
//!
//! Each decoder takes the payload bytes of a classified response frame
//! (everything after the address prefix and opcode) and produces a typed
//! value, or a [`ResponseError`] when the payload violates the command's
//! structure. Decoders validate length and the leading length byte before
//! touching any field.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::NEWER_FAMILY;
use crate::error::ResponseError;
use crate::types::{byte_to_milli_units, two_byte_milli_units, two_byte_uint, MilliUnits};

const HOUR: Duration = Duration::from_secs(60 * 60);
const MINUTE: Duration = Duration::from_secs(60);

/// The pump's global settings block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SettingsInfo {
    /// Inactivity auto-off interval; zero when disabled.
    pub auto_off: Duration,
    /// Configured insulin action time.
    pub insulin_action: Duration,
    /// Insulin concentration, 100 or 50 units per mL.
    pub insulin_concentration: u8,
    /// Largest allowed bolus.
    pub max_bolus: MilliUnits,
    /// Largest allowed basal rate.
    pub max_basal: MilliUnits,
    /// Whether the RF remote is enabled.
    pub rf_enabled: bool,
    /// Index of the selected basal pattern.
    pub selected_pattern: u8,
}

/// Decode the settings response payload.
///
/// The format depends on the pump generation: families at or above
/// [`NEWER_FAMILY`] use a 25-byte block, older ones a 21-byte block with
/// the maximum basal at a different offset and coarser strokes.
pub fn decode_settings(payload: &[u8], family: u8) -> Result<SettingsInfo, ResponseError> {
    let newer = family >= NEWER_FAMILY;
    let (min_len, length_header) = if newer { (26, 25) } else { (22, 21) };
    if payload.len() < min_len {
        return Err(ResponseError::TooShort {
            expected: min_len,
            actual: payload.len(),
        });
    }
    if payload[0] != length_header {
        return Err(ResponseError::BadLengthHeader(payload[0]));
    }
    let insulin_concentration = match payload[10] {
        0 => 100,
        1 => 50,
        other => return Err(ResponseError::UnknownConcentration(other)),
    };
    let max_basal = if newer {
        two_byte_milli_units(&payload[8..10], true)
    } else {
        two_byte_milli_units(&payload[7..9], false)
    };
    Ok(SettingsInfo {
        auto_off: u32::from(payload[1]) * HOUR,
        insulin_action: u32::from(payload[18]) * HOUR,
        insulin_concentration,
        max_bolus: byte_to_milli_units(payload[6], false),
        max_basal,
        rf_enabled: payload[13] == 1,
        selected_pattern: payload[12],
    })
}

/// How a temporary basal rate is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TempBasalType {
    /// An absolute rate in insulin units per hour.
    #[default]
    Absolute,
    /// A percentage of the scheduled basal rate.
    Percent,
}

/// A temporary basal setting.
///
/// When no temporary basal is in effect the duration is zero. Exactly one
/// of `rate` and `percent` is present, matching `temp_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TempBasalInfo {
    /// Remaining duration.
    pub duration: Duration,
    /// Whether the rate is absolute or a percentage.
    pub temp_type: TempBasalType,
    /// Absolute rate, for `TempBasalType::Absolute`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<MilliUnits>,
    /// Percent rate, for `TempBasalType::Percent`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<u8>,
}

/// Decode the temporary basal status payload.
pub fn decode_temp_basal(payload: &[u8]) -> Result<TempBasalInfo, ResponseError> {
    if payload.len() < 7 {
        return Err(ResponseError::TooShort {
            expected: 7,
            actual: payload.len(),
        });
    }
    if payload[0] != 6 {
        return Err(ResponseError::BadLengthHeader(payload[0]));
    }
    let duration = u32::from(two_byte_uint(&payload[5..7])) * MINUTE;
    match payload[1] {
        0 => Ok(TempBasalInfo {
            duration,
            temp_type: TempBasalType::Absolute,
            rate: Some(two_byte_milli_units(&payload[3..5], true)),
            percent: None,
        }),
        1 => Ok(TempBasalInfo {
            duration,
            temp_type: TempBasalType::Percent,
            rate: None,
            percent: Some(payload[2]),
        }),
        other => Err(ResponseError::UnknownTempBasalType(other)),
    }
}

/// The pump's model number and the family it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Model number as printed on the pump, e.g. "523".
    pub number: String,
    /// Pump generation: the last two digits of the model number.
    pub family: u8,
}

/// Decode the model response payload.
pub fn decode_model(payload: &[u8]) -> Result<ModelInfo, ResponseError> {
    if payload.len() < 2 {
        return Err(ResponseError::TooShort {
            expected: 2,
            actual: payload.len(),
        });
    }
    let len = usize::from(payload[1]);
    if payload.len() < 2 + len {
        return Err(ResponseError::TooShort {
            expected: 2 + len,
            actual: payload.len(),
        });
    }
    let number = String::from_utf8(payload[2..2 + len].to_vec())
        .map_err(|_| ResponseError::BadModelNumber(String::new()))?;
    let value: u32 = number
        .parse()
        .map_err(|_| ResponseError::BadModelNumber(number.clone()))?;
    Ok(ModelInfo {
        number,
        family: (value % 100) as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn newer_settings_payload() -> Vec<u8> {
        let mut payload = vec![0u8; 26];
        payload[0] = 25; // length header
        payload[1] = 4; // auto-off hours
        payload[6] = 80; // max bolus, coarse strokes
        payload[8] = 0x01; // max basal, fine strokes, big-endian
        payload[9] = 0x40;
        payload[10] = 0; // concentration 100
        payload[12] = 2; // selected pattern
        payload[13] = 1; // rf enabled
        payload[18] = 5; // insulin action hours
        payload
    }

    #[test]
    fn test_decode_settings_newer() {
        let info = decode_settings(&newer_settings_payload(), 23).unwrap();
        assert_eq!(info.auto_off, Duration::from_secs(4 * 3600));
        assert_eq!(info.insulin_action, Duration::from_secs(5 * 3600));
        assert_eq!(info.insulin_concentration, 100);
        assert_eq!(info.max_bolus, MilliUnits(8000));
        assert_eq!(info.max_basal, MilliUnits(8000));
        assert!(info.rf_enabled);
        assert_eq!(info.selected_pattern, 2);
    }

    #[test]
    fn test_decode_settings_older() {
        let mut payload = vec![0u8; 22];
        payload[0] = 21;
        payload[1] = 8;
        payload[6] = 50;
        payload[7] = 0x00; // max basal, coarse strokes
        payload[8] = 0x28;
        payload[10] = 1; // concentration 50
        payload[18] = 6;
        let info = decode_settings(&payload, 22).unwrap();
        assert_eq!(info.auto_off, Duration::from_secs(8 * 3600));
        assert_eq!(info.insulin_concentration, 50);
        assert_eq!(info.max_bolus, MilliUnits(5000));
        assert_eq!(info.max_basal, MilliUnits(4000));
        assert!(!info.rf_enabled);
    }

    #[test]
    fn test_decode_settings_rejects_bad_shapes() {
        let payload = newer_settings_payload();
        assert!(matches!(
            decode_settings(&payload[..20], 23),
            Err(ResponseError::TooShort { expected: 26, .. })
        ));

        let mut wrong_header = payload.clone();
        wrong_header[0] = 21;
        assert!(matches!(
            decode_settings(&wrong_header, 23),
            Err(ResponseError::BadLengthHeader(21))
        ));

        let mut bad_concentration = payload;
        bad_concentration[10] = 9;
        assert!(matches!(
            decode_settings(&bad_concentration, 23),
            Err(ResponseError::UnknownConcentration(9))
        ));
    }

    #[test]
    fn test_decode_temp_basal_absolute() {
        // 1.500 U/h for 90 minutes: 60 fine strokes.
        let payload = [6, 0, 0, 0x00, 0x3C, 0x00, 0x5A];
        let info = decode_temp_basal(&payload).unwrap();
        assert_eq!(info.temp_type, TempBasalType::Absolute);
        assert_eq!(info.duration, Duration::from_secs(90 * 60));
        assert_eq!(info.rate, Some(MilliUnits(1500)));
        assert_eq!(info.percent, None);
    }

    #[test]
    fn test_decode_temp_basal_percent() {
        let payload = [6, 1, 75, 0x00, 0x00, 0x00, 0x1E];
        let info = decode_temp_basal(&payload).unwrap();
        assert_eq!(info.temp_type, TempBasalType::Percent);
        assert_eq!(info.duration, Duration::from_secs(30 * 60));
        assert_eq!(info.rate, None);
        assert_eq!(info.percent, Some(75));
    }

    #[test]
    fn test_decode_temp_basal_rejects_bad_shapes() {
        assert!(matches!(
            decode_temp_basal(&[6, 0, 0]),
            Err(ResponseError::TooShort { expected: 7, .. })
        ));
        assert!(matches!(
            decode_temp_basal(&[5, 0, 0, 0, 0, 0, 0]),
            Err(ResponseError::BadLengthHeader(5))
        ));
        assert!(matches!(
            decode_temp_basal(&[6, 7, 0, 0, 0, 0, 0]),
            Err(ResponseError::UnknownTempBasalType(7))
        ));
    }

    #[test]
    fn test_decode_model() {
        let payload = [0, 3, b'5', b'2', b'3', 0, 0];
        let info = decode_model(&payload).unwrap();
        assert_eq!(info.number, "523");
        assert_eq!(info.family, 23);
    }

    #[test]
    fn test_decode_model_rejects_non_numeric() {
        let payload = [0, 3, b'x', b'2', b'3'];
        assert!(matches!(
            decode_model(&payload),
            Err(ResponseError::BadModelNumber(_))
        ));
    }

    #[test]
    fn test_temp_basal_serialization_omits_absent_field() {
        let info = TempBasalInfo {
            duration: Duration::from_secs(1800),
            temp_type: TempBasalType::Percent,
            rate: None,
            percent: Some(50),
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("percent"));
        assert!(!json.contains("rate"));
    }
}
