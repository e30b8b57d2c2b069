//! Panel and angle-arc geometry in the local East (x), North (y), Up (z) frame.
//!
//! Two inputs have no unique orthogonal basis: a sun vector along the zenith
//! (or along the reference axis) for the panel, and colinear start/end vectors
//! for an arc. Both fall back to fixed world axes instead of failing.

use nalgebra::{Point3, Vector3};

use crate::angles::rad_to_deg;
use crate::config::TrackerConfig;
use crate::types::{AngleArc, PanelQuad};

/// `|n · up|` within this of 1 counts as zenith/nadir.
pub const ZENITH_TOLERANCE: f64 = 1e-8;
/// Cross products shorter than this are treated as zero.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

pub fn east() -> Vector3<f64> {
    Vector3::x()
}

pub fn north() -> Vector3<f64> {
    Vector3::y()
}

pub fn up() -> Vector3<f64> {
    Vector3::z()
}

pub fn horizontal_projection(v: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.x, v.y, 0.0)
}

fn unit_or(v: &Vector3<f64>, fallback: Vector3<f64>) -> Vector3<f64> {
    v.try_normalize(DEGENERATE_EPSILON).unwrap_or(fallback)
}

/// Some unit vector orthogonal to `v` (which must be unit length).
fn any_perpendicular(v: &Vector3<f64>) -> Vector3<f64> {
    v.cross(&east())
        .try_normalize(DEGENERATE_EPSILON)
        .or_else(|| v.cross(&north()).try_normalize(DEGENERATE_EPSILON))
        .unwrap_or_else(east)
}

/// First in-plane axis of the panel.
///
/// Zenith/nadir and sun vectors parallel to `reference_axis` use East.
fn panel_u_axis(normal: &Vector3<f64>, reference_axis: &Vector3<f64>) -> Vector3<f64> {
    if (normal.dot(&up()).abs() - 1.0).abs() <= ZENITH_TOLERANCE {
        return east();
    }
    match reference_axis.cross(normal).try_normalize(DEGENERATE_EPSILON) {
        Some(u) => u,
        None => {
            // East is orthogonal to both ±North and ±Up; for other reference
            // axes project it onto the panel plane.
            let e = east();
            let projected = e - normal * normal.dot(&e);
            projected
                .try_normalize(DEGENERATE_EPSILON)
                .unwrap_or_else(|| any_perpendicular(normal))
        }
    }
}

/// Rectangle of `width` x `height` centred at the origin, normal to `sun`.
///
/// Corners are ordered `(h·u + w·v), (-h·u + w·v), (-h·u - w·v), (h·u - w·v)`
/// with `h = height / 2`, `w = width / 2`. A zero `sun` is treated as the zenith.
pub fn panel_quad(
    sun: &Vector3<f64>,
    width: f64,
    height: f64,
    reference_axis: &Vector3<f64>,
) -> PanelQuad {
    let normal = unit_or(sun, up());
    let u = panel_u_axis(&normal, reference_axis);
    let v = unit_or(&normal.cross(&u), any_perpendicular(&normal));

    let hu = u * (height / 2.0);
    let wv = v * (width / 2.0);
    PanelQuad {
        corners: [
            Point3::from(hu + wv),
            Point3::from(-hu + wv),
            Point3::from(-hu - wv),
            Point3::from(hu - wv),
        ],
    }
}

/// [`panel_quad`] with the configured panel size and North as reference axis.
pub fn panel_for(sun: &Vector3<f64>, config: &TrackerConfig) -> PanelQuad {
    panel_quad(sun, config.panel_width, config.panel_height, &north())
}

/// Circular arc of `radius` around `center` sweeping from `start` toward `end`.
///
/// Colinear inputs sweep in the plane normal to Up; equal inputs collapse to
/// `point_count` copies of the same point.
pub fn angle_arc(
    start: &Vector3<f64>,
    end: &Vector3<f64>,
    center: &Point3<f64>,
    radius: f64,
    point_count: usize,
) -> AngleArc {
    let u = unit_or(start, up());
    let end = unit_or(end, up());

    let normal = unit_or(&u.cross(&end), up());
    let v = unit_or(&normal.cross(&u), any_perpendicular(&u));

    let swept = u.dot(&end).clamp(-1.0, 1.0).acos();
    let points: Vec<Point3<f64>> = (0..point_count)
        .map(|i| {
            let a = if point_count > 1 {
                swept * i as f64 / (point_count - 1) as f64
            } else {
                0.0
            };
            *center + (u * a.cos() + v * a.sin()) * radius
        })
        .collect();

    let label_anchor = points.get(points.len() / 2).copied().unwrap_or(*center);
    AngleArc {
        points,
        swept_deg: rad_to_deg(swept),
        label_anchor,
    }
}

fn arc_visible(swept_deg: f64, projection: &Vector3<f64>, config: &TrackerConfig) -> bool {
    projection.norm() > config.min_horizontal_projection && swept_deg > config.min_arc_angle_deg
}

/// Arc from the sun's horizontal projection up to the sun vector.
pub fn elevation_arc(sun: &Vector3<f64>, config: &TrackerConfig) -> Option<AngleArc> {
    let projection = horizontal_projection(sun);
    let arc = angle_arc(
        &projection,
        sun,
        &Point3::origin(),
        config.elevation_arc_radius,
        config.arc_points,
    );
    arc_visible(arc.swept_deg, &projection, config).then_some(arc)
}

/// Arc from North to the sun's horizontal projection.
pub fn azimuth_arc(sun: &Vector3<f64>, config: &TrackerConfig) -> Option<AngleArc> {
    let projection = horizontal_projection(sun);
    let arc = angle_arc(
        &north(),
        &projection,
        &Point3::origin(),
        config.azimuth_arc_radius,
        config.arc_points,
    );
    arc_visible(arc.swept_deg, &projection, config).then_some(arc)
}
