use serde::{Deserialize, Serialize};

use super::ComfortResult;

/// ASHRAE-55 의 80% 수용 기준에 해당하는 PPD 한계 [%]
pub const DEFAULT_PPD_COMFORT_THRESHOLD: f64 = 10.0;

/// 온열 상태 판정.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThermalCondition {
    Cold,
    Neutral,
    Hot,
}

impl ThermalCondition {
    /// -1(추움), 0(쾌적), +1(더움) 정수 표현.
    pub fn as_i8(self) -> i8 {
        match self {
            ThermalCondition::Cold => -1,
            ThermalCondition::Neutral => 0,
            ThermalCondition::Hot => 1,
        }
    }
}

impl std::fmt::Display for ThermalCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThermalCondition::Cold => write!(f, "추움"),
            ThermalCondition::Neutral => write!(f, "쾌적"),
            ThermalCondition::Hot => write!(f, "더움"),
        }
    }
}

/// PPD가 `ppd_threshold` 미만이면 쾌적, 아니면 PMV 부호로 추움/더움을 판정한다.
pub fn thermal_condition(pmv: f64, ppd: f64, ppd_threshold: f64) -> ThermalCondition {
    if ppd < ppd_threshold {
        ThermalCondition::Neutral
    } else if pmv < 0.0 {
        ThermalCondition::Cold
    } else {
        ThermalCondition::Hot
    }
}

impl ComfortResult {
    pub fn condition(&self, ppd_threshold: f64) -> ThermalCondition {
        thermal_condition(self.pmv, self.ppd, ppd_threshold)
    }
}
