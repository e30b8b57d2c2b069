use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::Site;

/// Site, panel dimensions and visualisation parameters.
///
/// Every field is optional in JSON; missing fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub site: Site,
    pub panel_width: f64,
    pub panel_height: f64,
    pub sun_distance: f64,
    pub elevation_arc_radius: f64,
    pub azimuth_arc_radius: f64,
    pub arc_points: usize,
    /// Arcs sweeping less than this many degrees are not drawn.
    pub min_arc_angle_deg: f64,
    /// Arcs are not drawn when the sun's horizontal projection is shorter than this.
    pub min_horizontal_projection: f64,
    pub tick_period_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            site: Site::default(),
            panel_width: 0.5,
            panel_height: 0.8,
            sun_distance: 1.0,
            elevation_arc_radius: 0.3,
            azimuth_arc_radius: 0.2,
            arc_points: 15,
            min_arc_angle_deg: 5.0,
            min_horizontal_projection: 0.01,
            tick_period_ms: 200,
        }
    }
}

impl TrackerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}
