use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Inclusive range of local hours, `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HourWindow {
    pub start: i8,
    pub end: i8,
}

impl HourWindow {
    pub const fn new(start: i8, end: i8) -> Self {
        HourWindow { start, end }
    }

    pub fn contains(&self, hour: i8) -> bool {
        self.start <= hour && hour <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TrafficParams {
    pub rush_hour_windows: Vec<HourWindow>,
    pub rush_hour_multiplier: f64,
    pub weekend_multiplier: f64,
    /// Segments strictly longer than this are assumed to use arterial roads.
    pub long_segment_threshold_km: f64,
    pub long_segment_multiplier: f64,
}

impl Default for TrafficParams {
    fn default() -> Self {
        Self {
            rush_hour_windows: vec![HourWindow::new(8, 10), HourWindow::new(17, 19)],
            rush_hour_multiplier: 1.8,
            weekend_multiplier: 0.8,
            long_segment_threshold_km: 10.0,
            long_segment_multiplier: 0.9,
        }
    }
}

impl TrafficParams {
    pub fn is_rush_hour(&self, hour: i8) -> bool {
        self.rush_hour_windows
            .iter()
            .any(|window| window.contains(hour))
    }
}
