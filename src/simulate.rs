use crate::types::BatterySample;
use chrono::Utc;

// Served when the device can't be reached. Fixed values, only the timestamp moves.
const MOCK_VOLTAGE: f64 = 12.8;
const MOCK_CURRENT: f64 = 2.1;
const MOCK_TEMPERATURE: f64 = 35.6;
const MOCK_SOC: u8 = 83;
const MOCK_SOH: u8 = 97;

pub fn mock_battery_sample() -> BatterySample {
    BatterySample {
        voltage: MOCK_VOLTAGE,
        current: MOCK_CURRENT,
        temperature: MOCK_TEMPERATURE,
        soc: MOCK_SOC,
        soh: MOCK_SOH,
        fault_flags: Vec::new(),
        timestamp: Utc::now(),
    }
}
