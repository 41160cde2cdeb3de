use serde::{Deserialize, Serialize};

use super::ComfortError;
use crate::rootfind;

/// `pmv_from_ppd` 의 기본 허용오차 [%]
pub const DEFAULT_PPD_ERROR: f64 = 0.001;

/// 같은 PPD를 내는 두 PMV 값(추운 쪽, 더운 쪽).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PmvRange {
    pub lower: f64,
    pub upper: f64,
}

/// PMV로부터 불만족 예상 비율(PPD, %)을 구한다.
pub fn ppd_from_pmv(pmv: f64) -> f64 {
    100.0 - 95.0 * (-0.03353 * pmv.powi(4) - 0.2179 * pmv.powi(2)).exp()
}

/// 주어진 PPD를 만드는 두 PMV 값을 구한다.
///
/// PPD는 PMV=0 에 대해 대칭이므로 [-3, 0], [0, 3] 구간에서 각각 근을 찾는다.
/// PPD가 (5, 100) 을 벗어나면 모델이 정의되지 않으므로 `Domain` 오류를 낸다.
pub fn pmv_from_ppd(ppd: f64, ppd_error: f64) -> Result<PmvRange, ComfortError> {
    if !(ppd > 5.0 && ppd < 100.0) {
        return Err(ComfortError::Domain(format!(
            "PPD {ppd}% 는 PMV 모델의 허용 범위(5~100%)를 벗어났습니다."
        )));
    }
    let target = |pmv: f64| Ok::<f64, ComfortError>(ppd_from_pmv(pmv) - ppd);

    let lower = rootfind::solve(-3.0, 0.0, target, ppd_error)?;
    let upper = rootfind::solve(0.0, 3.0, target, ppd_error)?;
    Ok(PmvRange { lower, upper })
}
