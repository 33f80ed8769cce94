//! Per-subcatchment output series.

use std::collections::BTreeMap;
use std::fmt;

/// Kind of quantity a measurement reports, as grouped in series files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Flow, in the configured flow unit.
    Runoff,
    /// Percent capture, in %.
    PercentCapture,
    /// Seasonal hydrologic condition factor, in 1/depth.
    Shcf,
    /// Rain depth per step.
    Rain,
    /// Air temperature.
    Temperature,
}

impl Quantity {
    /// Function name used in series files.
    pub fn label(self) -> &'static str {
        match self {
            Self::Runoff => "Runoff",
            Self::PercentCapture => "Percent Capture",
            Self::Shcf => "SHCF",
            Self::Rain => "Rain",
            Self::Temperature => "Temperature",
        }
    }
}

/// A named output series of one subcatchment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Measurement {
    RunoffTotal,
    RunoffFast,
    RunoffMed,
    RunoffSlow,
    RunoffBase,
    PcFast,
    PcMed,
    PcSlow,
    PcBase,
    ShcfFast,
    ShcfMed,
    ShcfSlow,
    Rain,
    Temps,
}

impl Measurement {
    /// Every measurement, in file order.
    pub const ALL: [Measurement; 14] = [
        Self::RunoffTotal,
        Self::RunoffFast,
        Self::RunoffMed,
        Self::RunoffSlow,
        Self::RunoffBase,
        Self::PcFast,
        Self::PcMed,
        Self::PcSlow,
        Self::PcBase,
        Self::ShcfFast,
        Self::ShcfMed,
        Self::ShcfSlow,
        Self::Rain,
        Self::Temps,
    ];

    /// The reduced detail set.
    pub const TOTAL_ONLY: [Measurement; 1] = [Self::RunoffTotal];

    /// Name as written to series files (`Runoff_Total`, `PC_Fast`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Self::RunoffTotal => "Runoff_Total",
            Self::RunoffFast => "Runoff_Fast",
            Self::RunoffMed => "Runoff_Med",
            Self::RunoffSlow => "Runoff_Slow",
            Self::RunoffBase => "Runoff_Base",
            Self::PcFast => "PC_Fast",
            Self::PcMed => "PC_Med",
            Self::PcSlow => "PC_Slow",
            Self::PcBase => "PC_Base",
            Self::ShcfFast => "SHCF_Fast",
            Self::ShcfMed => "SHCF_Med",
            Self::ShcfSlow => "SHCF_Slow",
            Self::Rain => "Rain",
            Self::Temps => "Temps",
        }
    }

    /// Quantity this measurement reports.
    pub fn quantity(self) -> Quantity {
        match self {
            Self::RunoffTotal
            | Self::RunoffFast
            | Self::RunoffMed
            | Self::RunoffSlow
            | Self::RunoffBase => Quantity::Runoff,
            Self::PcFast | Self::PcMed | Self::PcSlow | Self::PcBase => Quantity::PercentCapture,
            Self::ShcfFast | Self::ShcfMed | Self::ShcfSlow => Quantity::Shcf,
            Self::Rain => Quantity::Rain,
            Self::Temps => Quantity::Temperature,
        }
    }

    /// Whether the series scales with drainage area.
    pub fn scales_with_area(self) -> bool {
        self.quantity() == Quantity::Runoff
    }

    /// Location name in series files: the subcatchment name, suffixed with
    /// the measurement name for all but total runoff, rain and temperature.
    pub fn location(self, subcatchment: &str) -> String {
        match self {
            Self::RunoffTotal | Self::Rain | Self::Temps => subcatchment.to_string(),
            _ => format!("{subcatchment}_{}", self.name()),
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output series of one subcatchment, one value per simulation step.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    series: BTreeMap<Measurement, Vec<f64>>,
    steps: usize,
    peak_capture_pct: f64,
}

impl ResultSet {
    /// Creates zero-filled series of `steps` values for each measurement.
    pub fn new(measurements: &[Measurement], steps: usize) -> Self {
        Self {
            series: measurements
                .iter()
                .map(|&m| (m, vec![0.0; steps]))
                .collect(),
            steps,
            peak_capture_pct: 0.0,
        }
    }

    /// Stores `value` for step `index` if `measurement` is tracked.
    pub(crate) fn record(&mut self, measurement: Measurement, index: usize, value: f64) {
        if let Some(values) = self.series.get_mut(&measurement) {
            values[index] = value;
        }
    }

    pub(crate) fn observe_capture(&mut self, total_pct: f64) {
        self.peak_capture_pct = self.peak_capture_pct.max(total_pct);
    }

    /// Returns the series for `measurement`, if tracked.
    pub fn get(&self, measurement: Measurement) -> Option<&[f64]> {
        self.series.get(&measurement).map(Vec::as_slice)
    }

    /// Iterates tracked measurements in file order.
    pub fn iter(&self) -> impl Iterator<Item = (Measurement, &[f64])> {
        self.series.iter().map(|(&m, v)| (m, v.as_slice()))
    }

    /// Returns the number of steps per series.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the number of tracked measurements.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns `true` if no measurement is tracked.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Largest summed percent capture of all four components at any step.
    pub fn peak_capture_pct(&self) -> f64 {
        self.peak_capture_pct
    }

    /// Returns an independent copy with every area-dependent series
    /// multiplied by `ratio`.
    pub fn scaled(&self, ratio: f64) -> Self {
        let mut copy = self.clone();
        for (m, values) in copy.series.iter_mut() {
            if m.scales_with_area() {
                values.iter_mut().for_each(|v| *v *= ratio);
            }
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_locations() {
        assert_eq!(Measurement::PcBase.name(), "PC_Base");
        assert_eq!(Measurement::RunoffTotal.location("S1"), "S1");
        assert_eq!(Measurement::Temps.location("S1"), "S1");
        assert_eq!(Measurement::ShcfMed.location("S1"), "S1_SHCF_Med");
    }

    #[test]
    fn quantities() {
        assert_eq!(Measurement::RunoffBase.quantity(), Quantity::Runoff);
        assert_eq!(Measurement::PcSlow.quantity().label(), "Percent Capture");
        assert!(Measurement::RunoffFast.scales_with_area());
        assert!(!Measurement::PcFast.scales_with_area());
        assert!(!Measurement::Rain.scales_with_area());
    }

    #[test]
    fn all_is_sorted() {
        let mut sorted = Measurement::ALL;
        sorted.sort();
        assert_eq!(sorted, Measurement::ALL);
    }

    #[test]
    fn record_ignores_untracked() {
        let mut r = ResultSet::new(&Measurement::TOTAL_ONLY, 3);
        r.record(Measurement::RunoffTotal, 1, 2.0);
        r.record(Measurement::Rain, 1, 9.0);
        assert_eq!(r.get(Measurement::RunoffTotal), Some(&[0.0, 2.0, 0.0][..]));
        assert_eq!(r.get(Measurement::Rain), None);
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn scaled_copy_touches_flows_only() {
        let mut r = ResultSet::new(&Measurement::ALL, 2);
        r.record(Measurement::RunoffTotal, 0, 1.0);
        r.record(Measurement::RunoffBase, 1, 2.0);
        r.record(Measurement::PcFast, 0, 30.0);
        r.observe_capture(30.0);
        let s = r.scaled(2.5);
        assert_eq!(s.get(Measurement::RunoffTotal), Some(&[2.5, 0.0][..]));
        assert_eq!(s.get(Measurement::RunoffBase), Some(&[0.0, 5.0][..]));
        assert_eq!(s.get(Measurement::PcFast), Some(&[30.0, 0.0][..]));
        assert_eq!(s.peak_capture_pct(), 30.0);
        assert_eq!(r.get(Measurement::RunoffTotal), Some(&[1.0, 0.0][..]));
    }
}
