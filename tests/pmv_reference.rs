//! PMV/SET 기준점 회귀 테스트. 기준값은 CBE Thermal Comfort Tool 과 같은 계산 절차로 구한 값이다.
use thermal_comfort_toolbox::comfort::{
    pierce_set, pmv, pmv_fanger, saturated_vapor_pressure_torr, ComfortError, ComfortInputs,
    STILL_AIR_THRESHOLD,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

fn office() -> ComfortInputs {
    ComfortInputs::new(25.0, 25.0, 0.1, 50.0, 1.2, 0.5)
}

#[test]
fn still_air_reference_point() {
    let res = pmv(&office(), STILL_AIR_THRESHOLD).expect("pmv");
    assert_close("pmv", res.pmv, 0.0843, 1e-3);
    assert_close("ppd", res.ppd, 5.147, 1e-2);
    assert_close("set", res.set, 25.210, 1e-2);
    assert_eq!(res.ce, 0.0);
    assert_eq!(res.ta_adj, 25.0);

    let expected = [11.1678, 4.8846, 5.0811, 0.8792, 24.4332, 21.7315];
    for (i, (actual, expected)) in res.heat_loss.to_array().iter().zip(expected).enumerate() {
        assert_close(&format!("heat_loss[{i}]"), *actual, expected, 1e-3);
    }
}

#[test]
fn still_air_matches_fanger_directly() {
    let res = pmv(&office(), STILL_AIR_THRESHOLD).expect("pmv");
    let fanger = pmv_fanger(&office()).expect("fanger");
    assert_eq!(res.pmv, fanger.pmv);
    assert_eq!(res.ppd, fanger.ppd);
    assert_eq!(res.heat_loss, fanger.heat_loss);
}

#[test]
fn low_velocity_has_no_cooling_effect() {
    for (ta, vel, rh, met, clo) in [
        (18.0, 0.0, 30.0, 1.0, 1.0),
        (22.0, 0.05, 60.0, 1.4, 0.7),
        (29.0, 0.1, 80.0, 1.1, 0.3),
    ] {
        let inputs = ComfortInputs::new(ta, ta + 1.0, vel, rh, met, clo);
        let res = pmv(&inputs, STILL_AIR_THRESHOLD).expect("pmv");
        assert_eq!(res.ce, 0.0);
        assert_eq!(res.ta_adj, ta);
    }
}

#[test]
fn elevated_air_speed_reference_point() {
    let inputs = ComfortInputs::new(30.0, 30.0, 0.8, 60.0, 1.0, 0.5);
    let res = pmv(&inputs, STILL_AIR_THRESHOLD).expect("pmv");
    assert_close("pmv", res.pmv, 0.5299, 2e-3);
    assert_close("ppd", res.ppd, 10.874, 5e-2);
    assert_close("set", res.set, 26.633, 1e-2);
    assert_close("ce", res.ce, 2.754, 1e-2);
    assert_close("ta_adj", res.ta_adj, 30.0 - res.ce, 1e-12);
}

#[test]
fn custom_still_air_threshold() {
    let inputs = ComfortInputs::new(28.0, 28.0, 0.3, 50.0, 1.1, 0.5);
    let res = pmv(&inputs, 0.15).expect("pmv");
    assert_close("pmv", res.pmv, 0.3018, 2e-3);
    assert_close("ce", res.ce, 1.295, 1e-2);
    assert_close("set", res.set, 26.159, 1e-2);
}

#[test]
fn cooling_effect_grows_with_air_speed() {
    let mut previous = 0.0;
    for (vel, expected) in [(0.2, 0.672), (0.5, 2.356), (1.0, 3.531), (1.5, 4.170)] {
        let inputs = ComfortInputs::new(25.0, 25.0, vel, 50.0, 1.2, 0.5);
        let res = pmv(&inputs, STILL_AIR_THRESHOLD).expect("pmv");
        assert_close(&format!("ce@{vel}"), res.ce, expected, 1e-2);
        assert!(res.ce > previous, "ce must increase with velocity");
        previous = res.ce;
    }
}

#[test]
fn external_work_lowers_pmv() {
    let inputs = office().with_external_work(1.0);
    let res = pmv(&inputs, STILL_AIR_THRESHOLD).expect("pmv");
    assert_close("pmv", res.pmv, -3.2378, 2e-3);
    assert_close("set", res.set, 25.128, 1e-2);
}

#[test]
fn set_reference_points() {
    let cases = [
        (ComfortInputs::new(25.0, 25.0, 0.1, 50.0, 1.2, 0.0), 20.878),
        (ComfortInputs::new(10.0, 10.0, 0.1, 50.0, 1.0, 1.0), 13.655),
        (ComfortInputs::new(35.0, 35.0, 0.1, 80.0, 1.0, 0.5), 39.148),
    ];
    for (inputs, expected) in cases {
        let set = pierce_set(&inputs).expect("set");
        assert_close("set", set, expected, 1e-2);
    }
}

#[test]
fn set_clamps_velocity_below_floor() {
    let slow = ComfortInputs::new(25.0, 25.0, 0.05, 50.0, 1.2, 0.5);
    let floor = office();
    assert_eq!(pierce_set(&slow).expect("slow"), pierce_set(&floor).expect("floor"));
}

#[test]
fn set_handles_condensing_environment() {
    // 피부 포화수증기압보다 주변 수증기압이 높아 증발이 불가능한 조건
    let inputs = ComfortInputs::new(40.0, 40.0, 0.1, 100.0, 1.0, 0.5);
    let set = pierce_set(&inputs).expect("set");
    assert_close("set", set, 48.994, 5e-2);
}

#[test]
fn saturated_vapor_pressure_is_strictly_increasing() {
    let mut previous = saturated_vapor_pressure_torr(-20.0);
    for step in 1..=140 {
        let t = -20.0 + step as f64 * 0.5;
        let p = saturated_vapor_pressure_torr(t);
        assert!(p > previous, "not increasing at {t} °C");
        previous = p;
    }
}

#[test]
fn invalid_inputs_are_domain_errors() {
    let bad_rh = ComfortInputs::new(25.0, 25.0, 0.1, 101.0, 1.2, 0.5);
    assert!(matches!(pmv(&bad_rh, STILL_AIR_THRESHOLD), Err(ComfortError::Domain(_))));
    let bad_met = ComfortInputs::new(25.0, 25.0, 0.1, 50.0, -1.0, 0.5);
    assert!(matches!(pierce_set(&bad_met), Err(ComfortError::Domain(_))));
    let bad_ta = ComfortInputs::new(f64::NAN, 25.0, 0.1, 50.0, 1.2, 0.5);
    assert!(matches!(pmv_fanger(&bad_ta), Err(ComfortError::Domain(_))));
}
