pub mod angles;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod playback;
pub mod player;
pub mod sampler;
pub mod types;

pub use angles::{
    deg_to_rad, normalize_angle, panel_pitch, panel_roll, rad_to_deg, sun_vector, vector_angles,
};

pub use config::TrackerConfig;

pub use ephemeris::{
    day_of_year, equation_of_time, hour_angle, solar_azimuth, solar_declination, solar_position,
    solar_zenith_angle, AnalyticEphemeris, EphemerisSource, DEGREES_PER_HOUR, EARTH_AXIAL_TILT,
};

pub use error::{EphemerisError, Result, TrackerError};

pub use frame::frame_view;

pub use geometry::{
    angle_arc, azimuth_arc, east, elevation_arc, horizontal_projection, north, panel_for,
    panel_quad, up,
};

pub use playback::{PlaybackController, TickToken};

pub use player::{PlaybackCommand, Player, Renderer};

pub use sampler::{sample, sample_count, start_instant, validate, TrajectorySampler};

pub use types::{
    AngleArc, FrameView, PanelQuad, PlaybackEvent, PlaybackState, SampleRequest, Site,
    SolarAngles, SolarPosition, StopReason, Trajectory,
};
