//! Fanger 정상상태 열평형식에 의한 PMV 계산.
//!
//! Fanger의 실험은 저풍속(0.1 m/s 이하)에서 수행되었으므로, 풍속이 더 높을 수 있는 경우
//! 냉각효과 보정을 포함한 [`super::pmv`] 를 사용한다.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ppd::ppd_from_pmv;
use super::psychrometrics::saturated_vapor_pressure_kpa;
use super::{ComfortError, ComfortInputs};

/// 착의 표면온도 반복 계산의 최대 횟수
pub const MAX_TCL_ITERATIONS: usize = 150;
/// 착의 표면온도 반복 계산의 수렴 기준 (100 K 단위)
const TCL_TOLERANCE: f64 = 0.00015;
/// 1 met 당 W/m²
const MET_TO_W_PER_M2: f64 = 58.15;

/// PMV 모델의 6개 열손실 항 [W/m²].
///
/// 위치 기반 순서: 피부 확산, 발한, 호흡 잠열, 호흡 현열, 복사, 대류.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HeatLossTerms {
    /// 피부를 통한 수분 확산 열손실
    pub conduction: f64,
    /// 발한 열손실
    pub sweating: f64,
    /// 호흡 잠열 손실
    pub latent_respiration: f64,
    /// 호흡 현열 손실
    pub dry_respiration: f64,
    /// 복사 열손실
    pub radiation: f64,
    /// 대류 열손실
    pub convection: f64,
}

impl HeatLossTerms {
    /// 고정 순서의 배열로 돌려준다.
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.conduction,
            self.sweating,
            self.latent_respiration,
            self.dry_respiration,
            self.radiation,
            self.convection,
        ]
    }

    pub fn total(&self) -> f64 {
        self.to_array().iter().sum()
    }
}

/// Fanger 모델 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PmvResult {
    /// 예상 평균 온열감 (PMV)
    pub pmv: f64,
    /// 예상 불만족률 (PPD) [%]
    pub ppd: f64,
    pub heat_loss: HeatLossTerms,
}

/// Fanger 원식만으로 PMV/PPD와 열손실 항을 계산한다.
pub fn pmv_fanger(inputs: &ComfortInputs) -> Result<PmvResult, ComfortError> {
    inputs.validate()?;
    fanger_unchecked(inputs)
}

pub(crate) fn fanger_unchecked(inputs: &ComfortInputs) -> Result<PmvResult, ComfortError> {
    fanger_with_limit(inputs, MAX_TCL_ITERATIONS)
}

/// 반복 한도를 지정해 계산한다. 한도를 넘기면 `Convergence` 오류를 낸다.
pub(crate) fn fanger_with_limit(
    inputs: &ComfortInputs,
    max_iterations: usize,
) -> Result<PmvResult, ComfortError> {
    let ta = inputs.air_temp;
    let tr = inputs.radiant_temp;

    // 수증기 분압 [Pa]
    let pa = inputs.relative_humidity * 10.0 * saturated_vapor_pressure_kpa(ta);

    let icl = 0.155 * inputs.clothing_insulation; // 착의 열저항 [m²K/W]
    let m = inputs.metabolic_rate * MET_TO_W_PER_M2;
    let w = inputs.external_work * MET_TO_W_PER_M2;
    let mw = m - w; // 체내 열생산
    let fcl = if icl <= 0.078 {
        1.0 + 1.29 * icl
    } else {
        1.05 + 0.645 * icl
    };

    // 강제대류 열전달계수
    let hcf = 12.1 * inputs.air_velocity.sqrt();
    let taa = ta + 273.0;
    let tra = tr + 273.0;
    let tcla = taa + (35.5 - ta) / (3.5 * icl + 0.1);

    let p1 = icl * fcl;
    let p2 = p1 * 3.96;
    let p3 = p1 * 100.0;
    let p4 = p1 * taa;
    let p5 = (308.7 - 0.028 * mw) + p2 * (tra / 100.0).powi(4);
    let mut xn = tcla / 100.0;
    let mut xf = tcla / 50.0;
    let mut hc = hcf;

    let mut n = 0;
    while (xn - xf).abs() > TCL_TOLERANCE {
        xf = (xf + xn) / 2.0;
        let hcn = 2.38 * (100.0 * xf - taa).abs().powf(0.25);
        hc = if hcf > hcn { hcf } else { hcn };
        xn = (p5 + p4 * hc - p2 * xf.powi(4)) / (100.0 + p3 * hc);
        n += 1;
        if n > max_iterations {
            warn!(iterations = n, "Fanger clothing temperature did not converge");
            return Err(ComfortError::Convergence {
                model: "Fanger PMV",
                iterations: max_iterations,
            });
        }
    }
    if !xn.is_finite() {
        return Err(ComfortError::Convergence {
            model: "Fanger PMV",
            iterations: n,
        });
    }

    let tcl = 100.0 * xn - 273.0;

    let heat_loss = HeatLossTerms {
        conduction: 3.05 * 0.001 * (5733.0 - 6.99 * mw - pa),
        sweating: if mw > MET_TO_W_PER_M2 {
            0.42 * (mw - MET_TO_W_PER_M2)
        } else {
            0.0
        },
        latent_respiration: 1.7 * 0.00001 * m * (5867.0 - pa),
        dry_respiration: 0.0014 * m * (34.0 - ta),
        radiation: 3.96 * fcl * (xn.powi(4) - (tra / 100.0).powi(4)),
        convection: fcl * hc * (tcl - ta),
    };

    let ts = 0.303 * (-0.036 * m).exp() + 0.028;
    let pmv = ts * (mw - heat_loss.total());
    if !pmv.is_finite() {
        return Err(ComfortError::Convergence {
            model: "Fanger PMV",
            iterations: n,
        });
    }

    Ok(PmvResult {
        pmv,
        ppd: ppd_from_pmv(pmv),
        heat_loss,
    })
}
