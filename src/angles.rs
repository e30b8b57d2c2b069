use nalgebra::Vector3;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Panel tilt from horizontal: 0 faces the zenith, 90 is vertical.
pub fn panel_pitch(elevation: f64) -> f64 {
    90.0 - elevation
}

/// Panel rotation about the vertical axis, following the sun's azimuth.
pub fn panel_roll(azimuth: f64) -> f64 {
    azimuth
}

/// Unit vector toward the sun in the local East (x), North (y), Up (z) frame.
pub fn sun_vector(elevation: f64, azimuth: f64) -> Vector3<f64> {
    let el = deg_to_rad(elevation);
    let az = deg_to_rad(azimuth);
    Vector3::new(el.cos() * az.sin(), el.cos() * az.cos(), el.sin())
}

/// Inverse of [`sun_vector`]: (elevation, azimuth) in degrees.
pub fn vector_angles(v: &Vector3<f64>) -> (f64, f64) {
    let horizontal = v.x.hypot(v.y);
    let elevation = rad_to_deg(v.z.atan2(horizontal));
    let azimuth = normalize_angle(rad_to_deg(v.x.atan2(v.y)));
    (elevation, azimuth)
}
