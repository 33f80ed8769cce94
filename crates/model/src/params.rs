//! Subcatchment parameters: parsing, unit conversion and validation.
//!
//! Attribute records hold parameters in user units (hours, days, percent,
//! 1/mm or 1/in, ha or ac). [`SubcatchmentParameters::from_record`]
//! converts them to model units:
//!
//! | Entered               | Stored                |
//! |-----------------------|-----------------------|
//! | TP (hours)            | steps                 |
//! | MAT, SAT (days)       | steps                 |
//! | HHL (hours)           | seconds               |
//! | AMHL (days)           | seconds               |
//! | RD, Base R (%)        | fraction              |
//! | SHCF (1/mm, 1/in)     | 1/m                   |
//! | Area (ha, ac)         | m²                    |

use std::collections::BTreeSet;
use std::fmt;

use crate::attributes::{AttributeRecord, AttributeValue};
use crate::error::ModelError;
use crate::twin::TwinKey;
use crate::units::UnitSystem;
use crate::validate::ValidationCollector;

/// Numeric parameter fields every subcatchment record must carry.
pub const PARAMETER_FIELDS: &[&str] = &[
    "RDFast", "RDMed", "RDSlow",
    "HtRBase", "SpClRB", "FlClRB",
    "TPFast", "TPMed", "TPSlow", "TPBase",
    "HHLFast", "HHLMed", "HHLSlow", "HHLBase",
    "RW0Fast", "RW0Med", "RW0Slow",
    "AMHLFast", "AMHLMed", "AMHLSlow",
    "MATFast", "MATMed", "MATSlow",
    "SATFast", "SATMed", "SATSlow", "SATBase",
    "HtSHCFFast", "HtSHCFMed", "HtSHCFSlow",
    "SpClSHCFF", "SpClSHCFM", "SpClSHCFS",
    "FlClSHCFF", "FlClSHCFM", "FlClSHCFS",
    "HotTemp", "ColdTemp",
];

/// Longest averaging window, in calculation steps, a record may ask for.
pub const MAX_WINDOW_STEPS: f64 = 1.0e6;

/// One of the four parallel runoff processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    /// Surface and near-surface response.
    Fast,
    /// Interflow.
    Med,
    /// Slow subsurface response.
    Slow,
    /// Groundwater base flow.
    Base,
}

impl Component {
    /// The three moisture-driven components.
    pub const WET: [Component; 3] = [Component::Fast, Component::Med, Component::Slow];

    /// Field-name suffix (`Fast`, `Med`, `Slow`, `Base`).
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Fast => "Fast",
            Self::Med => "Med",
            Self::Slow => "Slow",
            Self::Base => "Base",
        }
    }

    /// One-letter suffix used by the seasonal cold fields.
    fn initial(self) -> char {
        match self {
            Self::Fast => 'F',
            Self::Med => 'M',
            Self::Slow => 'S',
            Self::Base => 'B',
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Parameters of a Fast, Medium or Slow component, in model units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WetComponent {
    /// Dry-weather percent capture, as a fraction.
    pub rd: f64,
    /// Precipitation averaging (time-to-peak) window, in steps.
    pub tp: f64,
    /// Hydrograph half-life, in seconds.
    pub hhl: f64,
    /// Initial wet-capture fraction.
    pub rw0: f64,
    /// Antecedent-moisture half-life, in seconds.
    pub amhl: f64,
    /// Moisture averaging window, in steps.
    pub mat: f64,
    /// Seasonal (temperature) averaging window, in steps.
    pub sat: f64,
    /// Hot-season SHCF, in 1/m.
    pub hot_shcf: f64,
    /// Spring cold-season SHCF, in 1/m.
    pub spring_cold_shcf: f64,
    /// Fall cold-season SHCF, in 1/m.
    pub fall_cold_shcf: f64,
}

impl WetComponent {
    fn twin_values(&self) -> [f64; 10] {
        [
            self.rd,
            self.tp,
            self.hhl,
            self.rw0,
            self.amhl,
            self.mat,
            self.sat,
            self.hot_shcf,
            self.spring_cold_shcf,
            self.fall_cold_shcf,
        ]
    }
}

/// Parameters of the Base component, in model units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BaseComponent {
    /// Precipitation averaging window, in steps.
    pub tp: f64,
    /// Hydrograph half-life, in seconds.
    pub hhl: f64,
    /// Seasonal averaging window, in steps.
    pub sat: f64,
    /// Hot-season percent capture, as a fraction.
    pub hot_r: f64,
    /// Spring cold-season percent capture, as a fraction.
    pub spring_cold_r: f64,
    /// Fall cold-season percent capture, as a fraction.
    pub fall_cold_r: f64,
}

impl BaseComponent {
    fn twin_values(&self) -> [f64; 6] {
        [
            self.tp,
            self.hhl,
            self.sat,
            self.hot_r,
            self.spring_cold_r,
            self.fall_cold_r,
        ]
    }
}

/// What a record is checked against while parsing.
#[derive(Debug, Clone)]
pub struct ParseContext {
    units: UnitSystem,
    step_minutes: f64,
    gages: BTreeSet<String>,
    nodes: Option<BTreeSet<String>>,
}

impl ParseContext {
    /// Creates a context for `units` and a calculation step of
    /// `step_minutes`, with the set of defined rain gages.
    pub fn new<I, S>(units: UnitSystem, step_minutes: f64, gages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            units,
            step_minutes,
            gages: gages.into_iter().map(Into::into).collect(),
            nodes: None,
        }
    }

    /// Restricts outlets to the given node names.
    pub fn with_nodes<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nodes = Some(nodes.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the unit system.
    pub fn units(&self) -> UnitSystem {
        self.units
    }

    /// Returns the calculation step in minutes.
    pub fn step_minutes(&self) -> f64 {
        self.step_minutes
    }
}

/// Validated parameters of one subcatchment, in model units.
#[derive(Debug, Clone, PartialEq)]
pub struct SubcatchmentParameters {
    name: String,
    outlet: String,
    area_m2: f64,
    gage: String,
    wet: [WetComponent; 3],
    base: BaseComponent,
    hot_temp: f64,
    cold_temp: f64,
}

impl SubcatchmentParameters {
    /// Parses and validates one attribute record. `position` is the
    /// record's index in its source, used when it has no name.
    ///
    /// # Errors
    ///
    /// - [`ModelError::MissingName`] if `Name` is absent or empty
    /// - [`ModelError::InvalidParameters`] listing every other violation
    pub fn from_record<R>(
        record: &R,
        position: usize,
        ctx: &ParseContext,
    ) -> Result<Self, ModelError>
    where
        R: AttributeRecord + ?Sized,
    {
        let name = record
            .value("Name")
            .map(AttributeValue::as_text)
            .unwrap_or_default();
        if name.is_empty() {
            return Err(ModelError::MissingName { index: position });
        }

        let mut fields = FieldReader::new(record);

        let outlet = fields.text("Outlet");
        if !outlet.is_empty()
            && let Some(nodes) = &ctx.nodes
            && !nodes.contains(&outlet)
        {
            fields.errors.push(format!("outlet \"{outlet}\" is not a known node"));
        }

        let area_m2 = fields.area(ctx.units) * ctx.units.area_to_m2();

        let gage = fields.text("RainGage");
        if !gage.is_empty() && !ctx.gages.contains(&gage) {
            fields.errors.push(format!("rain gage \"{gage}\" is not defined"));
        }

        let wet = Component::WET.map(|c| fields.wet_component(c, ctx));
        let base = fields.base_component(ctx);

        let hot_temp = fields.number("HotTemp");
        let cold_temp = fields.number("ColdTemp");
        if cold_temp >= hot_temp && fields.has("HotTemp") && fields.has("ColdTemp") {
            fields
                .errors
                .push("HotTemp must be greater than ColdTemp");
        }

        fields.errors.finish(&name)?;
        Ok(Self {
            name,
            outlet,
            area_m2,
            gage,
            wet,
            base,
            hot_temp,
            cold_temp,
        })
    }

    /// Returns the subcatchment name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the outlet node identifier.
    pub fn outlet(&self) -> &str {
        &self.outlet
    }

    /// Returns the drainage area in m².
    pub fn area_m2(&self) -> f64 {
        self.area_m2
    }

    /// Returns the rain gage name.
    pub fn gage(&self) -> &str {
        &self.gage
    }

    /// Returns the Fast, Medium and Slow parameters in that order.
    pub fn wet_components(&self) -> &[WetComponent; 3] {
        &self.wet
    }

    /// Returns the Base component parameters.
    pub fn base(&self) -> &BaseComponent {
        &self.base
    }

    /// Returns the hot reference temperature.
    pub fn hot_temp(&self) -> f64 {
        self.hot_temp
    }

    /// Returns the cold reference temperature.
    pub fn cold_temp(&self) -> f64 {
        self.cold_temp
    }

    /// Number of pre-horizon steps the longest averaging window reaches
    /// back: `floor(max(TP, MAT, SAT)) + 1`.
    pub fn max_lag(&self) -> usize {
        let longest = self
            .wet
            .iter()
            .flat_map(|c| [c.tp, c.mat, c.sat])
            .chain([self.base.tp, self.base.sat])
            .fold(0.0_f64, f64::max);
        (longest.floor() as usize).saturating_add(1)
    }

    /// Number of pre-horizon values the inputs must carry.
    pub fn lead_in_len(&self) -> usize {
        self.max_lag().saturating_add(1)
    }

    /// Fingerprint of every calibratable parameter plus the rain gage.
    /// Name, outlet and area are excluded.
    pub fn twin_key(&self) -> TwinKey {
        let values = self
            .wet
            .iter()
            .flat_map(WetComponent::twin_values)
            .chain(self.base.twin_values())
            .chain([self.hot_temp, self.cold_temp]);
        TwinKey::new(self.gage.clone(), values)
    }
}

/// Reads typed fields from a record, collecting every problem found.
struct FieldReader<'a, R: ?Sized> {
    record: &'a R,
    errors: ValidationCollector,
}

impl<'a, R: AttributeRecord + ?Sized> FieldReader<'a, R> {
    fn new(record: &'a R) -> Self {
        Self {
            record,
            errors: ValidationCollector::new(),
        }
    }

    fn has(&self, field: &str) -> bool {
        self.record
            .value(field)
            .and_then(AttributeValue::as_number)
            .is_some()
    }

    fn text(&mut self, field: &str) -> String {
        let text = self
            .record
            .value(field)
            .map(AttributeValue::as_text)
            .unwrap_or_default();
        if text.is_empty() {
            self.errors.push(format!("{field} is missing"));
        }
        text
    }

    fn number(&mut self, field: &str) -> f64 {
        match self.record.value(field) {
            None => {
                self.errors.push(format!("{field} is missing"));
                0.0
            }
            Some(v) => match v.as_number() {
                Some(n) if n.is_finite() => n,
                _ => {
                    self.errors
                        .push(format!("{field} is not a number: {}", v.as_text()));
                    0.0
                }
            },
        }
    }

    fn non_negative(&mut self, field: &str) -> f64 {
        let value = self.number(field);
        self.errors.non_negative(field, value);
        value
    }

    /// An averaging time converted to steps, bounded by [`MAX_WINDOW_STEPS`].
    fn window(&mut self, field: &str, steps_per_unit: f64) -> f64 {
        let steps = self.non_negative(field) * steps_per_unit;
        if steps > MAX_WINDOW_STEPS {
            self.errors.push(format!(
                "{field} spans more than {MAX_WINDOW_STEPS} calculation steps"
            ));
            return 0.0;
        }
        steps
    }

    /// A half-life that must be positive when `active`.
    fn half_life(&mut self, field: &str, active: bool) -> f64 {
        let value = self.non_negative(field);
        if active && value == 0.0 {
            self.errors.push(format!("{field} must be positive"));
        }
        value
    }

    fn area(&mut self, units: UnitSystem) -> f64 {
        let scaled = self
            .record
            .value("ScaleArea")
            .and_then(AttributeValue::as_flag)
            .unwrap_or(false);
        let area = if scaled {
            match self.record.polygon_area() {
                Some(a) => a * units.polygon_area_scale(),
                None => {
                    self.errors
                        .push("ScaleArea is set but the record has no polygon area");
                    return 0.0;
                }
            }
        } else {
            self.number("Area")
        };
        if area <= 0.0 {
            self.errors.push("Area must be positive");
        }
        area
    }

    fn wet_component(&mut self, c: Component, ctx: &ParseContext) -> WetComponent {
        let s = c.suffix();
        let i = c.initial();
        let per_step_hours = 60.0 / ctx.step_minutes;
        let per_step_days = 1440.0 / ctx.step_minutes;
        let shcf = ctx.units.shcf_to_per_m();

        let rd = self.non_negative(&format!("RD{s}")) / 100.0;
        let active = rd > 0.0;
        WetComponent {
            rd,
            tp: self.window(&format!("TP{s}"), per_step_hours),
            hhl: self.half_life(&format!("HHL{s}"), active) * 3600.0,
            rw0: self.non_negative(&format!("RW0{s}")),
            amhl: self.half_life(&format!("AMHL{s}"), active) * 86400.0,
            mat: self.window(&format!("MAT{s}"), per_step_days),
            sat: self.window(&format!("SAT{s}"), per_step_days),
            hot_shcf: self.non_negative(&format!("HtSHCF{s}")) * shcf,
            spring_cold_shcf: self.non_negative(&format!("SpClSHCF{i}")) * shcf,
            fall_cold_shcf: self.non_negative(&format!("FlClSHCF{i}")) * shcf,
        }
    }

    fn base_component(&mut self, ctx: &ParseContext) -> BaseComponent {
        let hot_r = self.non_negative("HtRBase") / 100.0;
        let spring_cold_r = self.non_negative("SpClRB") / 100.0;
        let fall_cold_r = self.non_negative("FlClRB") / 100.0;
        let active = hot_r.max(spring_cold_r).max(fall_cold_r) > 0.0;
        BaseComponent {
            tp: self.window("TPBase", 60.0 / ctx.step_minutes),
            hhl: self.half_life("HHLBase", active) * 3600.0,
            sat: self.window("SATBase", 1440.0 / ctx.step_minutes),
            hot_r,
            spring_cold_r,
            fall_cold_r,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeMap, POLYGON_AREA_FIELD};
    use approx::assert_relative_eq;

    /// A metric record with only the Fast component active.
    fn fast_only(name: &str, area_ha: f64) -> AttributeMap {
        let mut rec = AttributeMap::new();
        for field in PARAMETER_FIELDS {
            rec.insert(*field, 0.0);
        }
        let mut rec = rec
            .with("Name", name)
            .with("Outlet", "J1")
            .with("Area", area_ha)
            .with("RainGage", "G1")
            .with("HotTemp", 70.0)
            .with("ColdTemp", 30.0);
        rec.insert("RDFast", 10.0);
        rec.insert("HHLFast", 2.0);
        rec.insert("AMHLFast", 1.0);
        rec
    }

    fn ctx() -> ParseContext {
        ParseContext::new(UnitSystem::Metric, 15.0, ["G1"])
    }

    #[test]
    fn converts_units() {
        let mut rec = fast_only("S1", 10.0);
        rec.insert("TPFast", 1.5);
        rec.insert("MATFast", 1.0);
        rec.insert("HtSHCFFast", 2.0);
        let p = SubcatchmentParameters::from_record(&rec, 0, &ctx()).unwrap();
        let fast = &p.wet_components()[0];
        assert_relative_eq!(p.area_m2(), 1e5);
        assert_relative_eq!(fast.rd, 0.1);
        assert_relative_eq!(fast.tp, 6.0);
        assert_relative_eq!(fast.hhl, 7200.0);
        assert_relative_eq!(fast.amhl, 86400.0);
        assert_relative_eq!(fast.mat, 96.0);
        assert_relative_eq!(fast.hot_shcf, 2000.0);
        assert_eq!(p.max_lag(), 97);
        assert_eq!(p.lead_in_len(), 98);
    }

    #[test]
    fn scaled_area_from_polygon() {
        let rec = fast_only("S1", -1.0)
            .with("ScaleArea", "True")
            .with(POLYGON_AREA_FIELD, 25_000.0);
        let p = SubcatchmentParameters::from_record(&rec, 0, &ctx()).unwrap();
        assert_relative_eq!(p.area_m2(), 25_000.0, epsilon = 1e-9);
    }

    #[test]
    fn scaled_area_without_polygon_fails() {
        let rec = fast_only("S1", 1.0).with("ScaleArea", true);
        let err = SubcatchmentParameters::from_record(&rec, 0, &ctx()).unwrap_err();
        assert!(matches!(err, ModelError::InvalidParameters { count: 1, .. }));
        assert!(err.to_string().contains("no polygon area"));
    }

    #[test]
    fn missing_name() {
        let rec = fast_only("", 1.0);
        assert_eq!(
            SubcatchmentParameters::from_record(&rec, 4, &ctx()).unwrap_err(),
            ModelError::MissingName { index: 4 }
        );
    }

    #[test]
    fn collects_every_violation() {
        let rec = fast_only("S1", 0.0)
            .with("HHLFast", 0.0)
            .with("TPMed", -1.0)
            .with("RainGage", "G2")
            .with("ColdTemp", 80.0);
        let err = SubcatchmentParameters::from_record(&rec, 0, &ctx()).unwrap_err();
        let ModelError::InvalidParameters {
            name,
            count,
            details,
        } = err
        else {
            panic!("expected InvalidParameters");
        };
        assert_eq!(name, "S1");
        assert_eq!(count, 5);
        assert!(details.contains("Area must be positive"));
        assert!(details.contains("rain gage \"G2\" is not defined"));
        assert!(details.contains("HHLFast must be positive"));
        assert!(details.contains("TPMed may not be negative"));
        assert!(details.contains("HotTemp must be greater than ColdTemp"));
    }

    #[test]
    fn inactive_component_may_have_zero_half_life() {
        let rec = fast_only("S1", 1.0).with("HHLMed", 0.0).with("AMHLSlow", 0.0);
        assert!(SubcatchmentParameters::from_record(&rec, 0, &ctx()).is_ok());
    }

    #[test]
    fn base_half_life_required_when_base_active() {
        let rec = fast_only("S1", 1.0).with("SpClRB", 5.0);
        let err = SubcatchmentParameters::from_record(&rec, 0, &ctx()).unwrap_err();
        assert!(err.to_string().contains("HHLBase must be positive"));
    }

    #[test]
    fn outlet_checked_against_nodes() {
        let ctx = ctx().with_nodes(["J2", "J3"]);
        let err = SubcatchmentParameters::from_record(&fast_only("S1", 1.0), 0, &ctx)
            .unwrap_err();
        assert!(err.to_string().contains("outlet \"J1\" is not a known node"));
    }

    #[test]
    fn missing_and_malformed_fields() {
        let rec = fast_only("S1", 1.0).with("SATBase", "fast");
        let mut rec2 = rec.clone();
        rec2.insert("Outlet", "");
        let err = SubcatchmentParameters::from_record(&rec2, 0, &ctx()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Outlet is missing"));
        assert!(msg.contains("SATBase is not a number: fast"));
    }

    #[test]
    fn oversized_window_is_rejected() {
        let rec = fast_only("S1", 1.0)
            .with("MATFast", 1e20)
            .with("TPBase", 1e300);
        let err = SubcatchmentParameters::from_record(&rec, 0, &ctx()).unwrap_err();
        assert!(matches!(err, ModelError::InvalidParameters { count: 2, .. }));
        let msg = err.to_string();
        assert!(msg.contains("MATFast spans more than"));
        assert!(msg.contains("TPBase spans more than"));
    }

    #[test]
    fn longest_allowed_window_sets_lead_in() {
        // 10416 days at 15 minutes is 999_936 steps
        let rec = fast_only("S1", 1.0).with("SATMed", 10_416.0);
        let p = SubcatchmentParameters::from_record(&rec, 0, &ctx()).unwrap();
        assert_eq!(p.max_lag(), 999_937);
        assert_eq!(p.lead_in_len(), 999_938);
    }

    #[test]
    fn twin_key_ignores_name_and_area() {
        let a = SubcatchmentParameters::from_record(&fast_only("A", 1.0), 0, &ctx()).unwrap();
        let b = SubcatchmentParameters::from_record(&fast_only("B", 7.0), 1, &ctx()).unwrap();
        assert_eq!(a.twin_key(), b.twin_key());

        let c = SubcatchmentParameters::from_record(
            &fast_only("C", 1.0).with("RDFast", 11.0),
            2,
            &ctx(),
        )
        .unwrap();
        assert_ne!(a.twin_key(), c.twin_key());
    }
}
