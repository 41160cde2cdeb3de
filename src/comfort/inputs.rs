use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::ComfortError;

/// PMV/SET 모델의 환경·개인 입력값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComfortInputs {
    /// 건구 공기온도 [°C]
    pub air_temp: f64,
    /// 평균 복사온도 [°C]
    pub radiant_temp: f64,
    /// 상대 풍속 [m/s]
    pub air_velocity: f64,
    /// 상대습도 [%] (0~100)
    pub relative_humidity: f64,
    /// 대사량 [met]
    pub metabolic_rate: f64,
    /// 착의량 [clo]
    pub clothing_insulation: f64,
    /// 외부 일 [met], 착석 시 보통 0
    #[serde(default)]
    pub external_work: f64,
}

impl Default for ComfortInputs {
    fn default() -> Self {
        Self {
            air_temp: 25.0,
            radiant_temp: 25.0,
            air_velocity: 0.1,
            relative_humidity: 50.0,
            metabolic_rate: 1.2,
            clothing_insulation: 0.5,
            external_work: 0.0,
        }
    }
}

impl ComfortInputs {
    /// 외부 일이 0인 입력값을 만든다.
    pub fn new(ta: f64, tr: f64, vel: f64, rh: f64, met: f64, clo: f64) -> Self {
        Self {
            air_temp: ta,
            radiant_temp: tr,
            air_velocity: vel,
            relative_humidity: rh,
            metabolic_rate: met,
            clothing_insulation: clo,
            external_work: 0.0,
        }
    }

    /// 외부 일을 지정한다.
    pub fn with_external_work(mut self, wme: f64) -> Self {
        self.external_work = wme;
        self
    }

    /// 공기온도와 복사온도를 같은 양만큼 낮춘 입력값을 돌려준다.
    pub(crate) fn cooled_by(&self, ce: f64, air_velocity: f64) -> Self {
        Self {
            air_temp: self.air_temp - ce,
            radiant_temp: self.radiant_temp - ce,
            air_velocity,
            ..*self
        }
    }

    /// 입력값이 모델의 물리적 유효 범위 안에 있는지 확인한다.
    pub fn validate(&self) -> Result<(), ComfortError> {
        let fields = [
            ("air_temp", self.air_temp),
            ("radiant_temp", self.radiant_temp),
            ("air_velocity", self.air_velocity),
            ("relative_humidity", self.relative_humidity),
            ("metabolic_rate", self.metabolic_rate),
            ("clothing_insulation", self.clothing_insulation),
            ("external_work", self.external_work),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ComfortError::Domain(format!(
                "{name} 값이 유한하지 않습니다: {value}"
            )));
        }
        if !(0.0..=100.0).contains(&self.relative_humidity) {
            return Err(ComfortError::Domain(format!(
                "상대습도는 0~100% 범위여야 합니다: {}",
                self.relative_humidity
            )));
        }
        if self.metabolic_rate <= 0.0 {
            return Err(ComfortError::Domain(format!(
                "대사량은 0보다 커야 합니다: {}",
                self.metabolic_rate
            )));
        }
        if self.clothing_insulation < 0.0 {
            return Err(ComfortError::Domain(format!(
                "착의량은 음수일 수 없습니다: {}",
                self.clothing_insulation
            )));
        }
        if self.air_velocity < 0.0 {
            return Err(ComfortError::Domain(format!(
                "풍속은 음수일 수 없습니다: {}",
                self.air_velocity
            )));
        }
        Ok(())
    }
}

/// 역산 대상이 되는 PMV 입력 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PmvInput {
    AirTemperature,
    RadTemperature,
    AirSpeed,
    RelHumidity,
    MetRate,
    CloValue,
    ExternalWork,
}

impl PmvInput {
    pub const ALL: [PmvInput; 7] = [
        PmvInput::AirTemperature,
        PmvInput::RadTemperature,
        PmvInput::AirSpeed,
        PmvInput::RelHumidity,
        PmvInput::MetRate,
        PmvInput::CloValue,
        PmvInput::ExternalWork,
    ];

    /// 표준 입력 순서상의 위치.
    pub fn index(self) -> usize {
        match self {
            PmvInput::AirTemperature => 0,
            PmvInput::RadTemperature => 1,
            PmvInput::AirSpeed => 2,
            PmvInput::RelHumidity => 3,
            PmvInput::MetRate => 4,
            PmvInput::CloValue => 5,
            PmvInput::ExternalWork => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PmvInput::AirTemperature => "air temperature",
            PmvInput::RadTemperature => "rad temperature",
            PmvInput::AirSpeed => "air speed",
            PmvInput::RelHumidity => "rel humidity",
            PmvInput::MetRate => "met rate",
            PmvInput::CloValue => "clo value",
            PmvInput::ExternalWork => "external work",
        }
    }

    /// 나머지 6개 입력(표준 순서, 자기 자신은 건너뜀)에 `value` 를 끼워 넣어 전체 입력을 만든다.
    pub fn fill(self, other_inputs: &[f64; 6], value: f64) -> ComfortInputs {
        let mut all = [0.0; 7];
        let missing = self.index();
        let mut others = other_inputs.iter();
        for (i, slot) in all.iter_mut().enumerate() {
            *slot = if i == missing {
                value
            } else {
                // other_inputs 는 정확히 6개이므로 항상 값이 있다.
                others.next().copied().unwrap_or_default()
            };
        }
        ComfortInputs {
            air_temp: all[0],
            radiant_temp: all[1],
            air_velocity: all[2],
            relative_humidity: all[3],
            metabolic_rate: all[4],
            clothing_insulation: all[5],
            external_work: all[6],
        }
    }

    /// 전체 입력에서 이 항목을 뺀 나머지 6개를 표준 순서로 돌려준다.
    pub fn others(self, inputs: &ComfortInputs) -> [f64; 6] {
        let all = [
            inputs.air_temp,
            inputs.radiant_temp,
            inputs.air_velocity,
            inputs.relative_humidity,
            inputs.metabolic_rate,
            inputs.clothing_insulation,
            inputs.external_work,
        ];
        let mut out = [0.0; 6];
        let skipped = self.index();
        for (slot, (_, value)) in out
            .iter_mut()
            .zip(all.iter().enumerate().filter(|(i, _)| *i != skipped))
        {
            *slot = *value;
        }
        out
    }
}

impl std::fmt::Display for PmvInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PmvInput {
    type Err = ComfortError;

    /// 대소문자를 구분하지 않으며 `-`, `_` 는 공백으로 취급한다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(|c: char| c == '-' || c == '_', " ");
        PmvInput::ALL
            .into_iter()
            .find(|input| input.name() == normalized)
            .ok_or_else(|| ComfortError::Configuration(format!("알 수 없는 PMV 입력 이름: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Air Temperature".parse::<PmvInput>(), Ok(PmvInput::AirTemperature));
        assert_eq!("clo-value".parse::<PmvInput>(), Ok(PmvInput::CloValue));
        assert_eq!("rel_humidity".parse::<PmvInput>(), Ok(PmvInput::RelHumidity));
    }

    #[test]
    fn unknown_name_is_configuration_error() {
        let err = "wind chill".parse::<PmvInput>().unwrap_err();
        assert!(matches!(err, ComfortError::Configuration(_)));
    }

    #[test]
    fn fill_and_others_are_consistent() {
        let inputs = ComfortInputs::new(24.0, 26.0, 0.3, 45.0, 1.1, 0.7).with_external_work(0.2);
        for input in PmvInput::ALL {
            let others = input.others(&inputs);
            let value = match input {
                PmvInput::AirTemperature => inputs.air_temp,
                PmvInput::RadTemperature => inputs.radiant_temp,
                PmvInput::AirSpeed => inputs.air_velocity,
                PmvInput::RelHumidity => inputs.relative_humidity,
                PmvInput::MetRate => inputs.metabolic_rate,
                PmvInput::CloValue => inputs.clothing_insulation,
                PmvInput::ExternalWork => inputs.external_work,
            };
            assert_eq!(input.fill(&others, value), inputs, "{input}");
        }
    }

    #[test]
    fn validate_rejects_out_of_range_humidity() {
        let inputs = ComfortInputs::new(25.0, 25.0, 0.1, 120.0, 1.2, 0.5);
        assert!(matches!(inputs.validate(), Err(ComfortError::Domain(_))));
    }

    #[test]
    fn validate_rejects_non_positive_met() {
        let inputs = ComfortInputs::new(25.0, 25.0, 0.1, 50.0, 0.0, 0.5);
        assert!(matches!(inputs.validate(), Err(ComfortError::Domain(_))));
    }
}
