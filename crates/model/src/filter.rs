//! Numerical primitives of the AMM recursion.

/// Decay factor substituted for a zero half-life. Effectively disables
/// an unused component without dividing by zero.
pub const ZERO_HALF_LIFE_DECAY: f64 = 0.99;

/// Logistic slope constant: places the cold and hot references at 11/12
/// and 1/12 of the sigmoid.
const LOGISTIC_SLOPE: f64 = 4.7964;

/// Per-step decay factor `0.5^(step / half_life)`, both in seconds.
///
/// Returns [`ZERO_HALF_LIFE_DECAY`] when `half_life_seconds` is zero.
///
/// # Examples
///
/// ```
/// use amm_model::decay_factor;
///
/// assert_eq!(decay_factor(3600.0, 3600.0), 0.5);
/// assert_eq!(decay_factor(0.0, 900.0), 0.99);
/// ```
pub fn decay_factor(half_life_seconds: f64, step_seconds: f64) -> f64 {
    if half_life_seconds == 0.0 {
        ZERO_HALF_LIFE_DECAY
    } else {
        0.5_f64.powf(step_seconds / half_life_seconds)
    }
}

/// Fractional trailing moving average over `history`, whose last element
/// is the current step.
///
/// A window of `lag` steps averages `lag + 1` sample-equivalents: the
/// newest `floor(lag + 1)` samples in full plus the next older one
/// weighted by the fractional remainder.
///
/// `history` must hold at least `floor(lag + 1) + 1` values.
pub fn moving_average(history: &[f64], lag: f64) -> f64 {
    let real = lag + 1.0;
    let whole = real.floor() as usize;
    let part = real - whole as f64;
    let n = history.len();
    let full: f64 = history[n - whole..].iter().sum();
    (full + history[n - 1 - whole] * part) / real
}

/// Gain of the antecedent-moisture forcing, `(AMRF - 1) / ln(AMRF)`.
///
/// Tends to 1 as `amrf` approaches 1.
pub fn moisture_gain(amrf: f64) -> f64 {
    let ln = amrf.ln();
    if ln.abs() < 1e-12 { 1.0 } else { (amrf - 1.0) / ln }
}

/// Temperature sigmoid shared by a subcatchment's seasonal blends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Logistic {
    x0: f64,
    k: f64,
}

impl Logistic {
    /// Builds the sigmoid centred between `cold` and `hot` (`cold < hot`).
    pub fn new(cold_temp: f64, hot_temp: f64) -> Self {
        Self {
            x0: (cold_temp + hot_temp) / 2.0,
            k: LOGISTIC_SLOPE / (cold_temp - hot_temp),
        }
    }

    /// Returns the midpoint temperature.
    pub fn midpoint(&self) -> f64 {
        self.x0
    }

    /// Blends between the `hot` and `cold` reference values at the
    /// averaged temperature `temp`. Equals `cold` at the cold reference
    /// temperature, `hot` at the hot one, and never goes negative.
    pub fn blend(&self, temp: f64, hot: f64, cold: f64) -> f64 {
        let l = 1.2 * (cold - hot);
        let sigmoid = 1.0 / (1.0 + (-self.k * (temp - self.x0)).exp());
        (l * sigmoid + cold - 11.0 / 12.0 * l).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn decay_halves_over_half_life() {
        let d = decay_factor(7200.0, 900.0);
        assert_relative_eq!(d.powi(8), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn moving_average_zero_lag_is_current() {
        assert_relative_eq!(moving_average(&[9.0, 1.0, 2.0, 3.0], 0.0), 3.0);
    }

    #[test]
    fn moving_average_whole_window() {
        // lag 2 averages the last three values
        assert_relative_eq!(moving_average(&[100.0, 1.0, 2.0, 3.0], 2.0), 2.0);
    }

    #[test]
    fn moving_average_fractional_window() {
        // lag 1.5: (2 + 3 + 0.5 * 1) / 2.5
        assert_relative_eq!(moving_average(&[1.0, 2.0, 3.0], 1.5), 2.2);
    }

    #[test]
    fn moving_average_of_constant() {
        let h = [4.0; 10];
        for lag in [0.0, 0.3, 2.0, 5.75] {
            assert_relative_eq!(moving_average(&h, lag), 4.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn moisture_gain_limits() {
        assert_relative_eq!(moisture_gain(1.0), 1.0);
        assert_relative_eq!(moisture_gain(0.5), 0.5 / std::f64::consts::LN_2, epsilon = 1e-12);
    }

    #[test]
    fn blend_hits_references() {
        let s = Logistic::new(30.0, 70.0);
        assert_relative_eq!(s.midpoint(), 50.0);
        assert_relative_eq!(s.blend(30.0, 1.0, 5.0), 5.0, epsilon = 1e-3);
        assert_relative_eq!(s.blend(70.0, 1.0, 5.0), 1.0, epsilon = 1e-3);
        // midpoint: cold - 5/12 * L
        assert_relative_eq!(s.blend(50.0, 1.0, 5.0), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn blend_equal_references_is_constant() {
        let s = Logistic::new(30.0, 70.0);
        for t in [-10.0, 30.0, 55.0, 100.0] {
            assert_relative_eq!(s.blend(t, 2.5, 2.5), 2.5);
        }
    }

    #[test]
    fn blend_never_negative() {
        let s = Logistic::new(30.0, 70.0);
        assert_eq!(s.blend(200.0, 0.0, 10.0), 0.0);
    }
}
