//! Fanger PMV와 Pierce SET을 결합한 PMV 계산 (ASHRAE-55 2015 방식).
//!
//! 풍속이 정지공기 기준(기본 0.1 m/s)을 넘으면, 정지공기에서 같은 SET을 내도록 공기·복사온도를
//! 낮추는 냉각효과(ce)를 구한 뒤 그 조건으로 Fanger PMV를 계산한다.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::fanger::{fanger_unchecked, HeatLossTerms};
use super::pierce::set_unchecked;
use super::{ComfortError, ComfortInputs, PmvInput};
use crate::rootfind;

/// Fanger 원식이 유효한 정지공기 풍속 기준 [m/s]
pub const STILL_AIR_THRESHOLD: f64 = 0.1;
/// 냉각효과 탐색 구간 [°C]
const COOLING_EFFECT_BOUNDS: (f64, f64) = (0.0, 40.0);
/// 냉각효과 허용오차 [°C]
const COOLING_EFFECT_TOLERANCE: f64 = 0.001;
/// `calc_missing_pmv_input` 기본 허용오차
pub const DEFAULT_PMV_ERROR: f64 = 0.001;

/// PMV 모델 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComfortResult {
    /// 예상 평균 온열감 (PMV)
    pub pmv: f64,
    /// 예상 불만족률 (PPD) [%]
    pub ppd: f64,
    /// 표준유효온도 (SET) [°C]
    pub set: f64,
    /// 풍속 보정된 공기온도 [°C]
    pub ta_adj: f64,
    /// 냉각효과: 공기온도와 보정 공기온도의 차 [°C]
    pub ce: f64,
    pub heat_loss: HeatLossTerms,
}

/// Fanger PMV를 계산하되, 풍속이 `still_air_threshold` 를 넘으면 SET 기반 냉각효과로 보정한다.
pub fn pmv(inputs: &ComfortInputs, still_air_threshold: f64) -> Result<ComfortResult, ComfortError> {
    inputs.validate()?;
    if !(still_air_threshold.is_finite() && still_air_threshold >= 0.0) {
        return Err(ComfortError::Domain(format!(
            "정지공기 기준 풍속이 잘못되었습니다: {still_air_threshold}"
        )));
    }
    pmv_unchecked(inputs, still_air_threshold)
}

fn pmv_unchecked(
    inputs: &ComfortInputs,
    still_air_threshold: f64,
) -> Result<ComfortResult, ComfortError> {
    let set = set_unchecked(inputs)?;

    let (fanger, ta_adj, ce) = if inputs.air_velocity <= still_air_threshold {
        (fanger_unchecked(inputs)?, inputs.air_temp, 0.0)
    } else {
        let ce = cooling_effect(inputs, set, still_air_threshold)?;
        let still = inputs.cooled_by(ce, still_air_threshold);
        (fanger_unchecked(&still)?, inputs.air_temp - ce, ce)
    };

    Ok(ComfortResult {
        pmv: fanger.pmv,
        ppd: fanger.ppd,
        set,
        ta_adj,
        ce,
        heat_loss: fanger.heat_loss,
    })
}

/// 정지공기에서 같은 SET을 내기 위해 필요한 온도 저감량을 구한다.
///
/// 구간 안에 근이 없으면 냉각효과 0 으로 처리한다.
fn cooling_effect(
    inputs: &ComfortInputs,
    set: f64,
    still_air_threshold: f64,
) -> Result<f64, ComfortError> {
    let (low, high) = COOLING_EFFECT_BOUNDS;
    let residual = |ce: f64| -> Result<f64, ComfortError> {
        Ok(set - set_unchecked(&inputs.cooled_by(ce, still_air_threshold))?)
    };
    let ce = rootfind::solve_or(low, high, residual, COOLING_EFFECT_TOLERANCE, 0.0)?;
    trace!(ce, velocity = inputs.air_velocity, "cooling effect solved");
    Ok(ce)
}

/// 목표 PMV를 만드는 누락 입력값을 구한다.
///
/// `other_inputs` 는 공기온도, 복사온도, 풍속, 상대습도, 대사량, 착의량, 외부 일 순서에서
/// `missing` 항목을 뺀 6개 값이다. 정지공기 기준은 [`STILL_AIR_THRESHOLD`] 를 쓴다.
/// 경계값을 실제 해에 가깝게 줄수록 빠르게 수렴한다.
pub fn calc_missing_pmv_input(
    target_pmv: f64,
    other_inputs: &[f64; 6],
    missing: PmvInput,
    low_bound: f64,
    up_bound: f64,
    error: f64,
) -> Result<f64, ComfortError> {
    if !(low_bound.is_finite() && up_bound.is_finite()) || low_bound >= up_bound {
        return Err(ComfortError::Domain(format!(
            "탐색 구간이 잘못되었습니다: [{low_bound}, {up_bound}]"
        )));
    }
    missing.fill(other_inputs, low_bound).validate()?;
    missing.fill(other_inputs, up_bound).validate()?;

    let residual = |x: f64| -> Result<f64, ComfortError> {
        let inputs = missing.fill(other_inputs, x);
        Ok(pmv_unchecked(&inputs, STILL_AIR_THRESHOLD)?.pmv - target_pmv)
    };
    let value = rootfind::solve(low_bound, up_bound, residual, error)?;
    trace!(%missing, value, target_pmv, "missing PMV input solved");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_rejects_inverted_bounds() {
        let others = [25.0, 0.1, 50.0, 1.2, 0.5, 0.0];
        let err =
            calc_missing_pmv_input(0.0, &others, PmvInput::AirTemperature, 30.0, 10.0, 0.001)
                .unwrap_err();
        assert!(matches!(err, ComfortError::Domain(_)));
    }

    #[test]
    fn missing_input_rejects_bounds_outside_model_range() {
        let others = [25.0, 25.0, 0.1, 1.2, 0.5, 0.0];
        let err = calc_missing_pmv_input(0.0, &others, PmvInput::RelHumidity, 0.0, 150.0, 0.001)
            .unwrap_err();
        assert!(matches!(err, ComfortError::Domain(_)));
    }
}
