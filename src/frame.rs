use crate::config::TrackerConfig;
use crate::geometry;
use crate::types::{FrameView, Trajectory};

/// Readouts and geometry of frame `index`; `None` past the end.
pub fn frame_view(trajectory: &Trajectory, index: usize, config: &TrackerConfig) -> Option<FrameView> {
    let timestamp = *trajectory.timestamps().get(index)?;
    let sun = trajectory.sun_vectors()[index];
    Some(FrameView {
        index,
        timestamp,
        time_label: timestamp.format("%H:%M").to_string(),
        elevation: trajectory.elevation()[index],
        azimuth: trajectory.azimuth()[index],
        pitch: trajectory.pitch()[index],
        roll: trajectory.roll()[index],
        sun_vector: sun,
        panel_quad: geometry::panel_for(&sun, config),
        elevation_arc: geometry::elevation_arc(&sun, config),
        azimuth_arc: geometry::azimuth_arc(&sun, config),
    })
}
