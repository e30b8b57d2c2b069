use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use log::warn;

use crate::angles::{deg_to_rad, normalize_angle, rad_to_deg};
use crate::error::EphemerisError;
use crate::types::{Site, SolarAngles, SolarPosition};

pub const EARTH_AXIAL_TILT: f64 = 23.45;
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Source of apparent sun angles for a site and instant, in degrees.
///
/// Implementations must be deterministic and free of side effects.
pub trait EphemerisSource {
    fn altitude(
        &self,
        latitude: f64,
        longitude: f64,
        instant: &DateTime<Tz>,
    ) -> Result<f64, EphemerisError>;

    fn azimuth(
        &self,
        latitude: f64,
        longitude: f64,
        instant: &DateTime<Tz>,
    ) -> Result<f64, EphemerisError>;

    fn angles(&self, site: &Site, instant: &DateTime<Tz>) -> Result<SolarAngles, EphemerisError> {
        Ok(SolarAngles {
            elevation: self.altitude(site.latitude, site.longitude, instant)?,
            azimuth: self.azimuth(site.latitude, site.longitude, instant)?,
        })
    }
}

impl<E: EphemerisSource + ?Sized> EphemerisSource for &E {
    fn altitude(
        &self,
        latitude: f64,
        longitude: f64,
        instant: &DateTime<Tz>,
    ) -> Result<f64, EphemerisError> {
        (**self).altitude(latitude, longitude, instant)
    }

    fn azimuth(
        &self,
        latitude: f64,
        longitude: f64,
        instant: &DateTime<Tz>,
    ) -> Result<f64, EphemerisError> {
        (**self).azimuth(latitude, longitude, instant)
    }
}

/// Closed-form sun position: Cooper declination, Spencer equation of time,
/// hour angle from apparent solar time. Good to about a degree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn position<Tz2: TimeZone>(
        &self,
        latitude: f64,
        longitude: f64,
        dt: &DateTime<Tz2>,
    ) -> Result<SolarPosition, EphemerisError> {
        check_coordinates(latitude, longitude, dt)?;
        Ok(solar_position(latitude, longitude, dt))
    }
}

impl EphemerisSource for AnalyticEphemeris {
    fn altitude(
        &self,
        latitude: f64,
        longitude: f64,
        instant: &DateTime<Tz>,
    ) -> Result<f64, EphemerisError> {
        self.position(latitude, longitude, instant).map(|p| p.altitude)
    }

    fn azimuth(
        &self,
        latitude: f64,
        longitude: f64,
        instant: &DateTime<Tz>,
    ) -> Result<f64, EphemerisError> {
        self.position(latitude, longitude, instant).map(|p| p.azimuth)
    }
}

fn check_coordinates<Tz2: TimeZone>(
    latitude: f64,
    longitude: f64,
    dt: &DateTime<Tz2>,
) -> Result<(), EphemerisError> {
    let instant = || dt.with_timezone(&Utc).to_rfc3339();
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        warn!("latitude {latitude} out of range");
        return Err(EphemerisError::new(
            instant(),
            format!("latitude {latitude} outside [-90, 90]"),
        ));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        warn!("longitude {longitude} out of range");
        return Err(EphemerisError::new(
            instant(),
            format!("longitude {longitude} outside [-180, 180]"),
        ));
    }
    Ok(())
}

pub fn leap_year(year: i32) -> bool {
    (year % 400 == 0) || (year % 4 == 0 && year % 100 != 0)
}

pub fn days_in_months(year: i32) -> [u32; 12] {
    [
        31,
        if leap_year(year) { 29 } else { 28 },
        31, 30, 31, 30, 31, 31, 30, 31, 30, 31,
    ]
}

pub fn day_of_year(year: i32, month: u32, day: u32) -> i32 {
    let dim = days_in_months(year);
    let sum: u32 = dim[..(month - 1) as usize].iter().sum();
    (sum + day) as i32
}

pub fn intermediate_angle_b(n: i32) -> f64 {
    deg_to_rad((n - 1) as f64 * (360.0 / 365.0))
}

/// Minutes.
pub fn equation_of_time(n: i32) -> f64 {
    let b = intermediate_angle_b(n);
    229.18
        * (0.000075
            + 0.001868 * b.cos()
            - 0.032077 * b.sin()
            - 0.014615 * (2.0 * b).cos()
            - 0.040849 * (2.0 * b).sin())
}

pub fn solar_declination(n: i32) -> f64 {
    EARTH_AXIAL_TILT * deg_to_rad(360.0 * ((284 + n) as f64 / 365.0)).sin()
}

pub fn hour_angle(local_solar_time: f64) -> f64 {
    DEGREES_PER_HOUR * (local_solar_time - 12.0)
}

pub fn solar_zenith_angle(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let cos_zenith =
        lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * ha_rad.cos();
    rad_to_deg(cos_zenith.clamp(-1.0, 1.0).acos())
}

/// Clockwise from North, in [0, 360).
pub fn solar_azimuth(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let sin_az = -dec_rad.cos() * ha_rad.sin();
    let cos_az = dec_rad.sin() * lat_rad.cos() - dec_rad.cos() * lat_rad.sin() * ha_rad.cos();
    normalize_angle(rad_to_deg(sin_az.atan2(cos_az)))
}

pub fn solar_position<Tz2: TimeZone>(
    latitude: f64,
    longitude: f64,
    dt: &DateTime<Tz2>,
) -> SolarPosition {
    let utc = dt.with_timezone(&Utc);
    let utc_hours =
        utc.hour() as f64 + utc.minute() as f64 / 60.0 + utc.second() as f64 / 3600.0;
    let n = day_of_year(utc.year(), utc.month(), utc.day());
    let eot = equation_of_time(n);
    let declination = solar_declination(n);
    let lst = (utc_hours + (4.0 * longitude + eot) / 60.0).rem_euclid(24.0);
    let ha = hour_angle(lst);
    let zenith = solar_zenith_angle(latitude, declination, ha);
    SolarPosition {
        day_of_year: n,
        declination,
        equation_of_time: eot,
        local_solar_time: lst,
        hour_angle: ha,
        zenith,
        altitude: 90.0 - zenith,
        azimuth: solar_azimuth(latitude, declination, ha),
    }
}
