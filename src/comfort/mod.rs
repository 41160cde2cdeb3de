//! 인체 온열 쾌적 지표(PMV, PPD, SET) 계산 모듈 모음.
//! Fanger 정상상태 PMV, Pierce 2-노드 SET, 풍속 냉각효과 보정, 누락 입력 역산으로 구성한다.

pub mod condition;
pub mod error;
pub mod fanger;
pub mod inputs;
pub mod pierce;
pub mod pmv;
pub mod ppd;
pub mod psychrometrics;

pub use condition::{thermal_condition, ThermalCondition, DEFAULT_PPD_COMFORT_THRESHOLD};
pub use error::ComfortError;
pub use fanger::{pmv_fanger, HeatLossTerms, PmvResult};
pub use inputs::{ComfortInputs, PmvInput};
pub use pierce::pierce_set;
pub use pmv::{calc_missing_pmv_input, pmv, ComfortResult, DEFAULT_PMV_ERROR, STILL_AIR_THRESHOLD};
pub use ppd::{pmv_from_ppd, ppd_from_pmv, PmvRange, DEFAULT_PPD_ERROR};
pub use psychrometrics::{saturated_vapor_pressure_kpa, saturated_vapor_pressure_torr};
