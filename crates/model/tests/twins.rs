mod common;

use amm_model::{Measurement, ModelConfig, RunInputs, run_subcatchments};
use approx::assert_relative_eq;

use common::{all_components, clock, pulse_gage};

fn inputs() -> RunInputs {
    RunInputs::new(
        clock(4),
        vec![
            pulse_gage("G1", 120, &[(4, 6.0), (5, 2.0), (60, 3.0)]),
            pulse_gage("G2", 120, &[(10, 1.0)]),
        ],
    )
}

#[test]
fn twin_is_scaled_by_area_ratio() {
    let records = [
        all_components("A", 10.0, "J1"),
        all_components("B", 25.0, "J2"),
    ];
    let out = run_subcatchments(&records, &inputs(), &ModelConfig::default()).unwrap();
    let (a, b) = (&out.subcatchments()[0], &out.subcatchments()[1]);
    assert_eq!(a.twin_of(), None);
    assert_eq!(b.twin_of(), Some("A"));

    for m in [
        Measurement::RunoffTotal,
        Measurement::RunoffSlow,
        Measurement::RunoffBase,
    ] {
        let qa = a.results().get(m).unwrap();
        let qb = b.results().get(m).unwrap();
        for (x, y) in qa.iter().zip(qb) {
            assert_relative_eq!(x * 2.5, *y, max_relative = 1e-12);
        }
    }
    assert_eq!(
        a.results().get(Measurement::PcMed),
        b.results().get(Measurement::PcMed)
    );
}

#[test]
fn disabling_twins_does_not_change_results() {
    let records = [
        all_components("A", 10.0, "J1"),
        all_components("B", 25.0, "J1"),
        all_components("C", 25.0, "J1").with("RainGage", "G2"),
        all_components("D", 7.0, "J1"),
    ];
    let with = run_subcatchments(&records, &inputs(), &ModelConfig::default()).unwrap();
    let without = run_subcatchments(
        &records,
        &inputs(),
        &ModelConfig::default().with_twins(false),
    )
    .unwrap();

    let used: Vec<Option<&str>> = with.subcatchments().iter().map(|s| s.twin_of()).collect();
    assert_eq!(used, vec![None, Some("A"), None, Some("A")]);
    assert!(
        without
            .subcatchments()
            .iter()
            .all(|s| s.twin_of().is_none())
    );

    for (s, t) in with.subcatchments().iter().zip(without.subcatchments()) {
        for ((m, x), (_, y)) in s.results().iter().zip(t.results().iter()) {
            assert_eq!(x.len(), y.len(), "{m}");
            for (u, v) in x.iter().zip(y) {
                assert_relative_eq!(*u, *v, epsilon = 1e-15, max_relative = 1e-12);
            }
        }
    }
    assert_eq!(with.outlet_flows().len(), 1);
}

#[test]
fn different_gage_is_not_a_twin() {
    let records = [
        all_components("A", 10.0, "J1"),
        all_components("B", 10.0, "J1").with("RainGage", "G2"),
    ];
    let out = run_subcatchments(&records, &inputs(), &ModelConfig::default()).unwrap();
    assert_eq!(out.subcatchments()[1].twin_of(), None);
    assert_ne!(
        out.subcatchments()[0]
            .results()
            .get(Measurement::RunoffTotal),
        out.subcatchments()[1]
            .results()
            .get(Measurement::RunoffTotal)
    );
}
