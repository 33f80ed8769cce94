//! Fixed-step simulation clock.

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::CalendarError;

/// Fixed-step simulation horizon, inclusive of both endpoints.
///
/// The step is held at millisecond resolution so fractional-minute steps
/// (e.g. 0.5 min) are representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationClock {
    start: NaiveDateTime,
    end: NaiveDateTime,
    step: TimeDelta,
}

impl SimulationClock {
    /// Creates a clock stepping from `start` to `end` every `step_minutes`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidStep`] if `step_minutes` is not a
    /// positive finite number of at least one millisecond, and
    /// [`CalendarError::InvalidHorizon`] if `end < start`.
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        step_minutes: f64,
    ) -> Result<Self, CalendarError> {
        if !step_minutes.is_finite() || step_minutes <= 0.0 {
            return Err(CalendarError::InvalidStep {
                minutes: step_minutes,
            });
        }
        let millis = (step_minutes * 60_000.0).round() as i64;
        if millis <= 0 {
            return Err(CalendarError::InvalidStep {
                minutes: step_minutes,
            });
        }
        if end < start {
            return Err(CalendarError::InvalidHorizon { start, end });
        }
        Ok(Self {
            start,
            end,
            step: TimeDelta::milliseconds(millis),
        })
    }

    /// Returns the first simulation instant.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the last instant the horizon may reach.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns the step as a [`TimeDelta`].
    pub fn step(&self) -> TimeDelta {
        self.step
    }

    /// Returns the step length in seconds.
    pub fn step_seconds(&self) -> f64 {
        self.step.num_milliseconds() as f64 / 1000.0
    }

    /// Returns the step length in minutes.
    pub fn step_minutes(&self) -> f64 {
        self.step.num_milliseconds() as f64 / 60_000.0
    }

    /// Returns the number of simulation instants.
    pub fn len(&self) -> usize {
        let span = (self.end - self.start).num_milliseconds();
        (span / self.step.num_milliseconds()) as usize + 1
    }

    /// A clock always holds at least its start instant.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns every simulation instant from start to end inclusive.
    pub fn instants(&self) -> Vec<NaiveDateTime> {
        let n = self.len();
        let mut out = Vec::with_capacity(n);
        let mut t = self.start;
        for _ in 0..n {
            out.push(t);
            t += self.step;
        }
        out
    }

    /// Returns the `n` instants immediately preceding the horizon, oldest
    /// first, ending one step before [`start`](Self::start).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] if the lead-in leaves chrono's
    /// representable range.
    pub fn lead_in(&self, n: usize) -> Result<Vec<NaiveDateTime>, CalendarError> {
        let mut out = Vec::with_capacity(n);
        for k in (1..=n).rev() {
            let back = self
                .step
                .checked_mul(k as i32)
                .and_then(|d| self.start.checked_sub_signed(d))
                .ok_or_else(|| CalendarError::OutOfRange {
                    reason: format!("{k} steps before {}", self.start),
                })?;
            out.push(back);
        }
        Ok(out)
    }

    /// Returns the instants with one extra step prepended before the start.
    ///
    /// Used when a cumulative series is differenced back into per-step
    /// increments, which consumes one leading sample.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] if the extra step leaves
    /// chrono's representable range.
    pub fn instants_with_leading_step(&self) -> Result<Vec<NaiveDateTime>, CalendarError> {
        let mut out = self.lead_in(1)?;
        out.extend(self.instants());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn inclusive_endpoints() {
        let clock = SimulationClock::new(at(1, 0, 0), at(1, 1, 0), 15.0).unwrap();
        let t = clock.instants();
        assert_eq!(t.len(), 5);
        assert_eq!(t[0], at(1, 0, 0));
        assert_eq!(t[4], at(1, 1, 0));
        assert_eq!(clock.len(), 5);
    }

    #[test]
    fn end_not_on_step_boundary() {
        let clock = SimulationClock::new(at(1, 0, 0), at(1, 0, 40), 15.0).unwrap();
        let t = clock.instants();
        assert_eq!(t.len(), 3);
        assert_eq!(*t.last().unwrap(), at(1, 0, 30));
    }

    #[test]
    fn single_instant() {
        let clock = SimulationClock::new(at(1, 0, 0), at(1, 0, 0), 5.0).unwrap();
        assert_eq!(clock.instants(), vec![at(1, 0, 0)]);
    }

    #[test]
    fn step_conversions() {
        let clock = SimulationClock::new(at(1, 0, 0), at(2, 0, 0), 15.0).unwrap();
        assert_eq!(clock.step_seconds(), 900.0);
        assert_eq!(clock.step_minutes(), 15.0);
    }

    #[test]
    fn lead_in_is_oldest_first() {
        let clock = SimulationClock::new(at(2, 0, 0), at(2, 1, 0), 30.0).unwrap();
        let lead = clock.lead_in(3).unwrap();
        assert_eq!(lead, vec![at(1, 22, 30), at(1, 23, 0), at(1, 23, 30)]);
        assert!(clock.lead_in(0).unwrap().is_empty());
    }

    #[test]
    fn leading_step_prepended() {
        let clock = SimulationClock::new(at(2, 0, 0), at(2, 0, 30), 15.0).unwrap();
        let t = clock.instants_with_leading_step().unwrap();
        assert_eq!(t, vec![at(1, 23, 45), at(2, 0, 0), at(2, 0, 15), at(2, 0, 30)]);
    }

    #[test]
    fn rejects_non_positive_step() {
        assert_eq!(
            SimulationClock::new(at(1, 0, 0), at(2, 0, 0), 0.0).unwrap_err(),
            CalendarError::InvalidStep { minutes: 0.0 }
        );
        assert!(SimulationClock::new(at(1, 0, 0), at(2, 0, 0), -5.0).is_err());
        assert!(SimulationClock::new(at(1, 0, 0), at(2, 0, 0), f64::NAN).is_err());
    }

    #[test]
    fn rejects_reversed_horizon() {
        let err = SimulationClock::new(at(2, 0, 0), at(1, 0, 0), 15.0).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidHorizon { .. }));
    }
}
