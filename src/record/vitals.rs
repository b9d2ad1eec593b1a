use serde::{Deserialize, Serialize};

/// Most recent heart-rate measurement. Each new reading replaces the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateReading {
    pub heart_rate: u32,
    pub timestamp: u64,
}

impl HeartRateReading {
    pub fn new(heart_rate: u32, timestamp: u64) -> Self {
        Self {
            heart_rate,
            timestamp,
        }
    }
}

/// Most recent blood-pressure measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressureReading {
    pub low: u32,
    pub high: u32,
    pub timestamp: u64,
}

impl BloodPressureReading {
    pub fn new(high: u32, low: u32, timestamp: u64) -> Self {
        Self {
            low,
            high,
            timestamp,
        }
    }
}
