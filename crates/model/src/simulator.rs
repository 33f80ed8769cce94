//! The per-subcatchment AMM recursion.
//!
//! Each step, for each of Fast, Medium and Slow:
//!
//! ```text
//! SHCF_t = blend(MA_SAT(T), hot, cold(season))
//! RW_t   = (AMRF - 1) / ln(AMRF) * RD * SHCF_t * MA_MAT(P) + AMRF * RW_{t-1}
//! Q_t    = A (1 - SF) / dt * (RD + (RW_t + RW_{t-1}) / 2) * MA_TP(P) + SF * Q_{t-1}
//! ```
//!
//! and for Base, with `R_t = blend(MA_SAT(T), hot_R, cold_R(season))`:
//!
//! ```text
//! Q_t = A (1 - SF) / dt * (R_t + R_{t-1}) / 2 * MA_TP(P) + SF * Q_{t-1}
//! ```

use chrono::NaiveDateTime;

use amm_calendar::Season;

use crate::error::ModelError;
use crate::filter::{Logistic, decay_factor, moisture_gain, moving_average};
use crate::params::SubcatchmentParameters;
use crate::result::{Measurement, ResultSet};
use crate::units::FlowUnit;

const RUNOFF: [Measurement; 4] = [
    Measurement::RunoffFast,
    Measurement::RunoffMed,
    Measurement::RunoffSlow,
    Measurement::RunoffBase,
];
const CAPTURE: [Measurement; 4] = [
    Measurement::PcFast,
    Measurement::PcMed,
    Measurement::PcSlow,
    Measurement::PcBase,
];
const SHCF: [Measurement; 3] = [
    Measurement::ShcfFast,
    Measurement::ShcfMed,
    Measurement::ShcfSlow,
];

/// Per-step driving data for one subcatchment.
///
/// `rain` (metres per step) and `temps` each hold
/// [`SubcatchmentParameters::lead_in_len`] pre-horizon values followed by
/// one value per entry of `instants`.
#[derive(Debug, Clone, Copy)]
pub struct Forcing<'a> {
    /// Simulation instants of the horizon.
    pub instants: &'a [NaiveDateTime],
    /// Rain depth per step, lead-in first.
    pub rain: &'a [f64],
    /// Air temperature per step, lead-in first.
    pub temps: &'a [f64],
}

/// Runs the AMM recursion for one subcatchment.
#[derive(Debug, Clone)]
pub struct SubcatchmentSimulator<'a> {
    params: &'a SubcatchmentParameters,
    step_seconds: f64,
    flow_unit: FlowUnit,
    /// Hydrograph decay per component, Base last.
    sf: [f64; 4],
    /// Antecedent-moisture decay for Fast, Medium, Slow.
    amrf: [f64; 3],
    logistic: Logistic,
}

impl<'a> SubcatchmentSimulator<'a> {
    /// Computes the derived constants for `params` at the given step.
    pub fn new(params: &'a SubcatchmentParameters, step_seconds: f64, flow_unit: FlowUnit) -> Self {
        let wet = params.wet_components();
        Self {
            params,
            step_seconds,
            flow_unit,
            sf: [
                decay_factor(wet[0].hhl, step_seconds),
                decay_factor(wet[1].hhl, step_seconds),
                decay_factor(wet[2].hhl, step_seconds),
                decay_factor(params.base().hhl, step_seconds),
            ],
            amrf: wet.map(|c| decay_factor(c.amhl, step_seconds)),
            logistic: Logistic::new(params.cold_temp(), params.hot_temp()),
        }
    }

    /// Steps through the horizon and records `measurements`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InputLength`] if `forcing` does not carry the
    /// lead-in plus one value per instant.
    pub fn run(
        &self,
        forcing: &Forcing<'_>,
        measurements: &[Measurement],
    ) -> Result<ResultSet, ModelError> {
        let lead = self.params.lead_in_len();
        let steps = forcing.instants.len();
        let expected = lead + steps;
        for (input, got) in [("rain", forcing.rain.len()), ("temperature", forcing.temps.len())] {
            if got != expected {
                return Err(ModelError::InputLength {
                    name: self.params.name().to_string(),
                    input,
                    expected,
                    got,
                });
            }
        }

        let units = self.flow_unit.system();
        let to_flow = self.flow_unit.to_cms();
        let to_shcf = units.shcf_to_per_m();
        let to_depth = units.depth_to_m();
        let area = self.params.area_m2();
        let dt = self.step_seconds;
        let wet = self.params.wet_components();
        let base = self.params.base();

        let mut results = ResultSet::new(measurements, steps);
        let mut rw_prev = wet.map(|c| c.rw0);
        let mut r_base_prev = 0.0;
        let mut q_prev = [0.0; 4];

        for (i, t) in forcing.instants.iter().enumerate() {
            let now = lead + i;
            let rain = &forcing.rain[..=now];
            let temps = &forcing.temps[..=now];
            let season = Season::of(t.date());

            let mut q = [0.0; 4];
            let mut pc = [0.0; 4];
            for (c, w) in wet.iter().enumerate() {
                let cold = match season {
                    Season::Spring => w.spring_cold_shcf,
                    Season::Fall => w.fall_cold_shcf,
                };
                let shcf = self
                    .logistic
                    .blend(moving_average(temps, w.sat), w.hot_shcf, cold);
                let rw = moisture_gain(self.amrf[c]) * w.rd * shcf * moving_average(rain, w.mat)
                    + self.amrf[c] * rw_prev[c];
                let sf = self.sf[c];
                q[c] = area * (1.0 - sf) / dt
                    * (w.rd + (rw + rw_prev[c]) / 2.0)
                    * moving_average(rain, w.tp)
                    + sf * q_prev[c];
                pc[c] = (w.rd + rw) * 100.0;
                rw_prev[c] = rw;
                results.record(SHCF[c], i, shcf / to_shcf);
            }

            let cold_r = match season {
                Season::Spring => base.spring_cold_r,
                Season::Fall => base.fall_cold_r,
            };
            let r_base = self
                .logistic
                .blend(moving_average(temps, base.sat), base.hot_r, cold_r);
            let sf = self.sf[3];
            q[3] = area * (1.0 - sf) / dt * (r_base + r_base_prev) / 2.0
                * moving_average(rain, base.tp)
                + sf * q_prev[3];
            pc[3] = r_base * 100.0;
            r_base_prev = r_base;
            q_prev = q;

            for c in 0..4 {
                results.record(RUNOFF[c], i, q[c] / to_flow);
                results.record(CAPTURE[c], i, pc[c]);
            }
            results.record(Measurement::RunoffTotal, i, q.iter().sum::<f64>() / to_flow);
            results.record(Measurement::Rain, i, forcing.rain[now] / to_depth);
            results.record(Measurement::Temps, i, forcing.temps[now]);
            results.observe_capture(pc.iter().sum());
        }

        Ok(results)
    }
}
