use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::comfort::{
    ComfortInputs, DEFAULT_PMV_ERROR, DEFAULT_PPD_COMFORT_THRESHOLD, DEFAULT_PPD_ERROR,
    STILL_AIR_THRESHOLD,
};

/// 근 찾기 허용오차 설정.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverSettings {
    /// PPD→PMV 역산 허용오차 [%]
    pub ppd_error: f64,
    /// 누락 입력 역산 시 PMV 허용오차
    pub pmv_error: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            ppd_error: DEFAULT_PPD_ERROR,
            pmv_error: DEFAULT_PMV_ERROR,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fanger 원식을 그대로 쓰는 정지공기 풍속 기준 [m/s]
    pub still_air_threshold: f64,
    /// 쾌적 판정 PPD 한계 [%]
    pub ppd_comfort_threshold: f64,
    #[serde(default)]
    pub solver: SolverSettings,
    /// CLI에서 생략된 입력값에 쓰는 기본 조건
    #[serde(default)]
    pub default_conditions: ComfortInputs,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            still_air_threshold: STILL_AIR_THRESHOLD,
            ppd_comfort_threshold: DEFAULT_PPD_COMFORT_THRESHOLD,
            solver: SolverSettings::default(),
            default_conditions: ComfortInputs::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성해 저장한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        tracing::info!(path = %path.display(), "wrote default config");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 TOML 파일로 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
