#![allow(dead_code)]

use amm_calendar::SimulationClock;
use amm_model::{AttributeMap, PARAMETER_FIELDS};
use amm_series::{RainFormat, RainGage, Sample, TimeSeries};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

pub fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 5, 3)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// A 15-minute clock over `days` days.
pub fn clock(days: i64) -> SimulationClock {
    SimulationClock::new(start(), start() + TimeDelta::days(days), 15.0).unwrap()
}

/// A 15-minute VOLUME gage, zero except for the `(index, mm)` pulses.
pub fn pulse_gage(name: &str, samples: usize, pulses: &[(usize, f64)]) -> RainGage {
    let points = (0..samples)
        .map(|i| {
            let value = pulses
                .iter()
                .find(|(k, _)| *k == i)
                .map_or(0.0, |(_, v)| *v);
            Sample::new(start() + TimeDelta::minutes(15 * i as i64), value)
        })
        .collect();
    RainGage::new(
        name,
        RainFormat::Volume,
        15.0,
        TimeSeries::new(format!("{name}_ts"), points),
    )
}

/// A metric record with every parameter zero except the Fast component.
pub fn fast_only(name: &str, area_ha: f64) -> AttributeMap {
    let mut rec = AttributeMap::new();
    for field in PARAMETER_FIELDS {
        rec.insert(*field, 0.0);
    }
    rec.with("Name", name)
        .with("Outlet", "J1")
        .with("Area", area_ha)
        .with("RainGage", "G1")
        .with("HotTemp", 70.0)
        .with("ColdTemp", 30.0)
        .with("RDFast", 10.0)
        .with("HHLFast", 2.0)
        .with("AMHLFast", 1.0)
}

/// A metric record with all four components active and seasonal SHCFs.
pub fn all_components(name: &str, area_ha: f64, outlet: &str) -> AttributeMap {
    let mut rec = fast_only(name, area_ha).with("Outlet", outlet);
    let values: &[(&str, f64)] = &[
        ("RDFast", 5.0),
        ("RDMed", 3.0),
        ("RDSlow", 1.0),
        ("HtRBase", 0.5),
        ("SpClRB", 1.5),
        ("FlClRB", 1.0),
        ("TPFast", 0.5),
        ("TPMed", 3.25),
        ("TPSlow", 12.0),
        ("TPBase", 24.0),
        ("HHLFast", 1.5),
        ("HHLMed", 12.0),
        ("HHLSlow", 48.0),
        ("HHLBase", 240.0),
        ("RW0Fast", 0.01),
        ("RW0Med", 0.02),
        ("AMHLFast", 2.0),
        ("AMHLMed", 5.0),
        ("AMHLSlow", 10.0),
        ("MATFast", 0.5),
        ("MATMed", 1.0),
        ("MATSlow", 2.0),
        ("SATFast", 1.0),
        ("SATMed", 1.5),
        ("SATSlow", 2.0),
        ("SATBase", 3.3),
        ("HtSHCFFast", 0.5),
        ("HtSHCFMed", 0.2),
        ("HtSHCFSlow", 0.1),
        ("SpClSHCFF", 1.5),
        ("SpClSHCFM", 0.8),
        ("SpClSHCFS", 0.4),
        ("FlClSHCFF", 1.2),
        ("FlClSHCFM", 0.6),
        ("FlClSHCFS", 0.3),
    ];
    for (field, value) in values {
        rec.insert(*field, *value);
    }
    rec
}
