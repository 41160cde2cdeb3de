//! PMV ↔ PPD 변환 회귀 테스트.
use thermal_comfort_toolbox::comfort::{
    pmv_from_ppd, ppd_from_pmv, ComfortError, DEFAULT_PPD_ERROR,
};

#[test]
fn neutral_pmv_gives_five_percent() {
    assert_eq!(ppd_from_pmv(0.0), 5.0);
}

#[test]
fn ppd_is_symmetric() {
    for pmv in [0.1, 0.5, 1.0, 1.7, 2.5, 3.0] {
        assert_eq!(ppd_from_pmv(pmv), ppd_from_pmv(-pmv));
    }
}

#[test]
fn ppd_grows_with_magnitude() {
    let mut previous = ppd_from_pmv(0.0);
    for step in 1..=30 {
        let ppd = ppd_from_pmv(step as f64 * 0.1);
        assert!(ppd > previous);
        assert!(ppd <= 100.0);
        previous = ppd;
    }
}

#[test]
fn pmv_from_ppd_reference_values() {
    let range = pmv_from_ppd(10.0, DEFAULT_PPD_ERROR).expect("ppd 10");
    assert!((range.lower + 0.4892).abs() < 1e-3, "lower {}", range.lower);
    assert!((range.upper - 0.4892).abs() < 1e-3, "upper {}", range.upper);

    let range = pmv_from_ppd(20.0, DEFAULT_PPD_ERROR).expect("ppd 20");
    assert!((range.lower + 0.8431).abs() < 1e-3, "lower {}", range.lower);
    assert!((range.upper - 0.8431).abs() < 1e-3, "upper {}", range.upper);
}

#[test]
fn pmv_from_ppd_round_trips() {
    for ppd in [5.5, 7.5, 10.0, 25.0, 50.0, 75.0, 95.0] {
        let range = pmv_from_ppd(ppd, DEFAULT_PPD_ERROR).expect("range");
        assert!(range.lower <= 0.0 && range.upper >= 0.0);
        // 할선법은 |f| < tol, 이분법은 구간폭 기준이므로 여유를 둔다.
        assert!((ppd_from_pmv(range.lower) - ppd).abs() < 0.05, "lower @ {ppd}");
        assert!((ppd_from_pmv(range.upper) - ppd).abs() < 0.05, "upper @ {ppd}");
    }
}

#[test]
fn pmv_from_ppd_rejects_out_of_range() {
    for ppd in [3.0, 5.0, 100.0, 150.0] {
        let err = pmv_from_ppd(ppd, DEFAULT_PPD_ERROR).unwrap_err();
        assert!(matches!(err, ComfortError::Domain(_)), "ppd {ppd}");
    }
}
