use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::comfort::{self, ComfortError, PmvInput};
use crate::config::{self, Config, ConfigError};
use crate::ui_cli::{self, Cli, Command};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 쾌적 지표 계산 오류
    Comfort(ComfortError),
    /// 결과 출력 직렬화 오류
    Output(toml::ser::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Comfort(e) => write!(f, "계산 오류: {e}"),
            AppError::Output(e) => write!(f, "출력 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<ComfortError> for AppError {
    fn from(value: ComfortError) -> Self {
        AppError::Comfort(value)
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(value: toml::ser::Error) -> Self {
        AppError::Output(value)
    }
}

#[derive(Serialize)]
struct SetOutput {
    set: f64,
}

#[derive(Serialize)]
struct PpdOutput {
    pmv: f64,
    ppd: f64,
}

#[derive(Serialize)]
struct SolveOutput {
    missing: String,
    target_pmv: f64,
    value: f64,
}

#[derive(Serialize)]
struct ComfortOutput {
    condition: i8,
    #[serde(flatten)]
    result: comfort::ComfortResult,
}

/// `--config` 가 주어지면 파일에서, 아니면 기본 설정을 쓴다.
pub fn resolve_config(path: Option<&Path>) -> Result<Config, AppError> {
    match path {
        Some(path) => Ok(config::load_or_default(path)?),
        None => Ok(Config::default()),
    }
}

/// 명령행 인자에 따라 계산을 수행하고 결과를 출력한다.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let cfg = resolve_config(cli.config.as_deref())?;
    debug!(?cfg, "resolved configuration");
    let as_toml = cli.toml;

    match cli.command {
        Command::Pmv {
            conditions,
            threshold,
        } => {
            let inputs = conditions.resolve(&cfg.default_conditions);
            let threshold = threshold.unwrap_or(cfg.still_air_threshold);
            let result = comfort::pmv(&inputs, threshold)?;
            let condition = result.condition(cfg.ppd_comfort_threshold);
            if as_toml {
                ui_cli::print_toml(&ComfortOutput {
                    condition: condition.as_i8(),
                    result,
                })?;
            } else {
                ui_cli::print_comfort(&result, &condition.to_string());
            }
        }
        Command::Fanger { conditions } => {
            let inputs = conditions.resolve(&cfg.default_conditions);
            let result = comfort::pmv_fanger(&inputs)?;
            if as_toml {
                ui_cli::print_toml(&result)?;
            } else {
                ui_cli::print_fanger(&result);
            }
        }
        Command::Set { conditions } => {
            let inputs = conditions.resolve(&cfg.default_conditions);
            let set = comfort::pierce_set(&inputs)?;
            if as_toml {
                ui_cli::print_toml(&SetOutput { set })?;
            } else {
                println!("SET: {set:.2} °C");
            }
        }
        Command::Ppd { pmv } => {
            let ppd = comfort::ppd_from_pmv(pmv);
            if as_toml {
                ui_cli::print_toml(&PpdOutput { pmv, ppd })?;
            } else {
                println!("PPD: {ppd:.2} %");
            }
        }
        Command::PmvFromPpd { ppd, error } => {
            let range = comfort::pmv_from_ppd(ppd, error.unwrap_or(cfg.solver.ppd_error))?;
            if as_toml {
                ui_cli::print_toml(&range)?;
            } else {
                ui_cli::print_range(&range, ppd);
            }
        }
        Command::Solve {
            target,
            missing,
            low,
            high,
            conditions,
        } => {
            let missing: PmvInput = missing.parse()?;
            let inputs = conditions.resolve(&cfg.default_conditions);
            let others = missing.others(&inputs);
            let value = comfort::calc_missing_pmv_input(
                target,
                &others,
                missing,
                low,
                high,
                cfg.solver.pmv_error,
            )?;
            if as_toml {
                ui_cli::print_toml(&SolveOutput {
                    missing: missing.to_string(),
                    target_pmv: target,
                    value,
                })?;
            } else {
                println!("PMV {target} 을(를) 만드는 {missing}: {value:.4}");
            }
        }
    }
    Ok(())
}
