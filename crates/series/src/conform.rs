//! Resampling of an irregular series onto target instants.
//!
//! A single forward pass over both sequences: `O(samples + targets)`, with
//! no mutation of the input samples.

use chrono::NaiveDateTime;

use crate::series::Sample;

/// Conforms `samples` onto `targets`, returning one value per target.
///
/// Both sequences must be in ascending time order. For each target:
///
/// - before the first sample the value is `0.0`,
/// - at a sample's exact instant the value is that sample's value,
/// - between two samples the value is linearly interpolated in time,
/// - after the last sample the last value is held.
///
/// An empty `samples` slice yields all zeros.
///
/// # Examples
///
/// ```
/// use amm_series::{conform, Sample};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
/// let t = |h| day.and_hms_opt(h, 0, 0).unwrap();
/// let samples = [Sample::new(t(1), 10.0), Sample::new(t(3), 20.0)];
///
/// let out = conform(&samples, &[t(0), t(1), t(2), t(4)]);
/// assert_eq!(out, vec![0.0, 10.0, 15.0, 20.0]);
/// ```
pub fn conform(samples: &[Sample], targets: &[NaiveDateTime]) -> Vec<f64> {
    let mut out = Vec::with_capacity(targets.len());
    let Some(last) = samples.last() else {
        out.resize(targets.len(), 0.0);
        return out;
    };

    // Index of the first sample not earlier than the current target.
    let mut next = 0;
    for &t in targets {
        while next < samples.len() && samples[next].time < t {
            next += 1;
        }
        let value = match samples.get(next) {
            None => last.value,
            Some(s) if s.time == t => s.value,
            Some(_) if next == 0 => 0.0,
            Some(right) => interpolate(&samples[next - 1], right, t),
        };
        out.push(value);
    }
    out
}

fn interpolate(left: &Sample, right: &Sample, t: NaiveDateTime) -> f64 {
    let span = (right.time - left.time).num_milliseconds() as f64;
    let offset = (t - left.time).num_milliseconds() as f64;
    left.value + (right.value - left.value) * (offset / span)
}
