use chrono::{DateTime, LocalResult, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use log::{debug, warn};

use crate::ephemeris::EphemerisSource;
use crate::error::{Result, TrackerError};
use crate::types::{SampleRequest, Site, Trajectory};

pub const MAX_INTERVAL_MINUTES: i32 = 60;

/// Number of samples a request yields, ⌈duration·60 / interval⌉.
/// Zero for non-positive durations or intervals.
pub fn sample_count(request: &SampleRequest) -> usize {
    if request.duration_hours <= 0 || request.interval_minutes <= 0 {
        return 0;
    }
    let total = request.duration_hours as i64 * 60;
    let step = request.interval_minutes as i64;
    ((total + step - 1) / step) as usize
}

pub fn validate(request: &SampleRequest) -> Result<()> {
    if request.duration_hours <= 0 {
        return Err(TrackerError::invalid(format!(
            "duration_hours must be positive, got {}",
            request.duration_hours
        )));
    }
    if request.interval_minutes <= 0 {
        return Err(TrackerError::invalid(format!(
            "interval_minutes must be positive, got {}",
            request.interval_minutes
        )));
    }
    if request.interval_minutes > MAX_INTERVAL_MINUTES {
        return Err(TrackerError::invalid(format!(
            "interval_minutes must be at most {MAX_INTERVAL_MINUTES}, got {}",
            request.interval_minutes
        )));
    }
    if !(0..=23).contains(&request.start_hour) {
        return Err(TrackerError::invalid(format!(
            "start_hour must be in 0..=23, got {}",
            request.start_hour
        )));
    }
    if sample_count(request) == 0 {
        return Err(TrackerError::invalid("request yields no samples"));
    }
    Ok(())
}

/// Local start instant: the request date at midnight plus `start_hour` hours,
/// localised in the site zone. Ambiguous wall times take the earlier instant.
pub fn start_instant(site: &Site, request: &SampleRequest) -> Result<DateTime<Tz>> {
    let naive = request.start_date.and_time(NaiveTime::MIN)
        + TimeDelta::hours(request.start_hour as i64);
    match site.timezone.from_local_datetime(&naive) {
        LocalResult::Single(t) => Ok(t),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(TrackerError::invalid(format!(
            "{naive} does not exist in {}",
            site.timezone
        ))),
    }
}

/// One sample per `interval_minutes` from the start instant, strictly
/// increasing, stopping before `duration_hours` have elapsed.
///
/// The first ephemeris failure aborts the run; no partial trajectory is returned.
pub fn sample<E>(site: &Site, request: &SampleRequest, ephemeris: &E) -> Result<Trajectory>
where
    E: EphemerisSource + ?Sized,
{
    if let Err(e) = validate(request) {
        warn!("rejected {request:?}: {e}");
        return Err(e);
    }
    let start = start_instant(site, request)?;
    let total_minutes = request.duration_hours as i64 * 60;
    let step = request.interval_minutes as i64;

    let mut samples = Vec::with_capacity(sample_count(request));
    let mut offset = 0;
    while offset < total_minutes {
        let t = start + TimeDelta::minutes(offset);
        let angles = ephemeris.angles(site, &t).map_err(|e| {
            warn!("ephemeris failed at offset {offset} min: {e}");
            e
        })?;
        samples.push((t, angles));
        offset += step;
    }

    debug!(
        "sampled {} instants from {} every {} min",
        samples.len(),
        start,
        request.interval_minutes
    );
    Ok(Trajectory::from_samples(samples))
}

/// Binds a site to an ephemeris so callers only supply requests.
#[derive(Debug, Clone)]
pub struct TrajectorySampler<E> {
    site: Site,
    ephemeris: E,
}

impl<E: EphemerisSource> TrajectorySampler<E> {
    pub fn new(site: Site, ephemeris: E) -> Self {
        Self { site, ephemeris }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn sample(&self, request: &SampleRequest) -> Result<Trajectory> {
        sample(&self.site, request, &self.ephemeris)
    }
}
