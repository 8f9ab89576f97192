//! Monitor Configuration

use std::time::Duration;

use serde::Deserialize;

/// Monitoring session options.
///
/// Defaults follow the MRC display ad guideline: 50% of the pixels for one
/// continuous second, 30% for large units, sampled every 100ms.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Polling cadence in milliseconds
    pub cadence_ms: u64,

    /// Consecutive passing samples needed for a verdict
    pub required_passes: u32,

    /// Accepted viewable percentage for ordinary units
    pub default_accepted_percentage: f64,

    /// Accepted viewable percentage once the unit counts as large
    pub large_ad_accepted_percentage: f64,

    /// Own area (px²) from which a unit counts as large
    pub large_ad_area: f64,

    /// Inset of the occlusion sample grid from the element's edges
    pub occlusion_inset: f64,

    /// Viewport/element area ratio below which geometry uses the area shortcut
    pub fast_path_ratio: f64,

    /// Keep sampling after the verdict
    pub debug_mode: bool,

    /// Longest frame chain walked before giving up
    pub max_frame_depth: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            cadence_ms: 100,
            required_passes: 9,
            default_accepted_percentage: 50.0,
            large_ad_accepted_percentage: 30.0,
            large_ad_area: 242_500.0,
            occlusion_inset: 12.0,
            fast_path_ratio: 0.5,
            debug_mode: false,
            max_frame_depth: 64,
        }
    }
}

impl MonitorConfig {
    /// Polling cadence
    pub fn cadence(&self) -> Duration {
        Duration::from_millis(self.cadence_ms)
    }

    /// Same configuration with continuous sampling enabled
    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: MonitorConfig = serde_json::from_str(r#"{ "debug_mode": true, "cadence_ms": 50 }"#).unwrap();
        assert!(config.debug_mode);
        assert_eq!(config.cadence(), Duration::from_millis(50));
        assert_eq!(config.required_passes, 9);
        assert_eq!(config.large_ad_area, 242_500.0);
    }
}
