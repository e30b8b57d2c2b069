use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::angles;

/// Fixed observation site. Latitude and longitude in degrees, east-positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Tz,
}

impl Default for Site {
    fn default() -> Self {
        Self {
            latitude: -0.2105367,
            longitude: -78.491614,
            timezone: chrono_tz::America::Guayaquil,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRequest {
    pub start_date: NaiveDate,
    pub start_hour: i32,
    pub duration_hours: i32,
    pub interval_minutes: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarAngles {
    pub elevation: f64,
    pub azimuth: f64,
}

/// Intermediate quantities of one analytic sun-position evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    pub day_of_year: i32,
    pub declination: f64,
    pub equation_of_time: f64,
    pub local_solar_time: f64,
    pub hour_angle: f64,
    pub zenith: f64,
    pub altitude: f64,
    pub azimuth: f64,
}

/// Index-aligned samples of one simulation run.
///
/// Built once and never mutated; a new run produces a new value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    timestamps: Vec<DateTime<Tz>>,
    elevation: Vec<f64>,
    azimuth: Vec<f64>,
    pitch: Vec<f64>,
    roll: Vec<f64>,
    sun_vectors: Vec<Vector3<f64>>,
}

impl Trajectory {
    /// Derives pitch, roll and the unit sun vector for every sample.
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = (DateTime<Tz>, SolarAngles)>,
    {
        let samples = samples.into_iter();
        let (lower, _) = samples.size_hint();
        let mut traj = Trajectory {
            timestamps: Vec::with_capacity(lower),
            elevation: Vec::with_capacity(lower),
            azimuth: Vec::with_capacity(lower),
            pitch: Vec::with_capacity(lower),
            roll: Vec::with_capacity(lower),
            sun_vectors: Vec::with_capacity(lower),
        };
        for (t, a) in samples {
            traj.timestamps.push(t);
            traj.elevation.push(a.elevation);
            traj.azimuth.push(a.azimuth);
            traj.pitch.push(angles::panel_pitch(a.elevation));
            traj.roll.push(angles::panel_roll(a.azimuth));
            traj.sun_vectors.push(angles::sun_vector(a.elevation, a.azimuth));
        }
        traj
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Tz>] {
        &self.timestamps
    }

    pub fn elevation(&self) -> &[f64] {
        &self.elevation
    }

    pub fn azimuth(&self) -> &[f64] {
        &self.azimuth
    }

    pub fn pitch(&self) -> &[f64] {
        &self.pitch
    }

    pub fn roll(&self) -> &[f64] {
        &self.roll
    }

    pub fn sun_vectors(&self) -> &[Vector3<f64>] {
        &self.sun_vectors
    }

    /// Local wall-clock label ("HH:MM") of frame `index`.
    pub fn time_label(&self, index: usize) -> Option<String> {
        self.timestamps
            .get(index)
            .map(|t| t.format("%H:%M").to_string())
    }

    /// Sun positions scaled to `distance`, in frame order.
    pub fn sun_path(&self, distance: f64) -> Vec<Point3<f64>> {
        self.sun_vectors
            .iter()
            .map(|v| Point3::from(v * distance))
            .collect()
    }
}

/// Rectangle centred at the origin whose normal is the sun vector.
/// Consecutive corners share an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelQuad {
    pub corners: [Point3<f64>; 4],
}

impl PanelQuad {
    pub fn edges(&self) -> [Vector3<f64>; 4] {
        let c = &self.corners;
        [c[1] - c[0], c[2] - c[1], c[3] - c[2], c[0] - c[3]]
    }

    pub fn centroid(&self) -> Point3<f64> {
        let sum = self
            .corners
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / 4.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AngleArc {
    pub points: Vec<Point3<f64>>,
    pub swept_deg: f64,
    pub label_anchor: Point3<f64>,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub index: usize,
    pub timestamp: DateTime<Tz>,
    pub time_label: String,
    pub elevation: f64,
    pub azimuth: f64,
    pub pitch: f64,
    pub roll: f64,
    pub sun_vector: Vector3<f64>,
    pub panel_quad: PanelQuad,
    pub elevation_arc: Option<AngleArc>,
    pub azimuth_arc: Option<AngleArc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    Stopped,
    Paused,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    EndOfTrajectory { frame: usize },
    EmptyTrajectory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackEvent {
    Frame(usize),
    Stopped(StopReason),
}
