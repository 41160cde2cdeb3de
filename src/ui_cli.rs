use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::app::AppError;
use crate::comfort::{ComfortInputs, ComfortResult, HeatLossTerms, PmvRange, PmvResult};

/// 명령행 인자 정의.
#[derive(Debug, Parser)]
#[command(name = "thermal_comfort_toolbox", version, about = "PMV / PPD / SET 온열 쾌적 계산기")]
pub struct Cli {
    /// TOML 설정 파일 경로 (없으면 기본값으로 생성)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// 결과를 TOML 형식으로 출력
    #[arg(long, global = true)]
    pub toml: bool,
    #[command(subcommand)]
    pub command: Command,
}

/// 서브커맨드.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 풍속 보정을 포함한 PMV/PPD/SET
    Pmv {
        #[command(flatten)]
        conditions: ConditionArgs,
        /// 정지공기 기준 풍속 [m/s] (설정값 대체)
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Fanger 원식 PMV
    Fanger {
        #[command(flatten)]
        conditions: ConditionArgs,
    },
    /// Pierce 2-노드 모델 SET
    Set {
        #[command(flatten)]
        conditions: ConditionArgs,
    },
    /// PMV → PPD
    Ppd {
        #[arg(long, allow_hyphen_values = true)]
        pmv: f64,
    },
    /// PPD → 두 PMV 값
    PmvFromPpd {
        #[arg(long)]
        ppd: f64,
        /// 허용오차 (설정값 대체)
        #[arg(long)]
        error: Option<f64>,
    },
    /// 목표 PMV를 만드는 누락 입력값 역산
    Solve {
        /// 목표 PMV
        #[arg(long, allow_hyphen_values = true)]
        target: f64,
        /// 누락 입력 이름 (예: "air temperature", "clo value")
        #[arg(long)]
        missing: String,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        low: f64,
        #[arg(long, default_value_t = 100.0, allow_hyphen_values = true)]
        high: f64,
        #[command(flatten)]
        conditions: ConditionArgs,
    },
}

/// 환경 조건 인자. 생략한 값은 설정 파일의 기본 조건을 쓴다.
#[derive(Debug, Clone, Default, Args)]
pub struct ConditionArgs {
    /// 공기온도 [°C]
    #[arg(long, allow_hyphen_values = true)]
    pub ta: Option<f64>,
    /// 평균 복사온도 [°C]
    #[arg(long, allow_hyphen_values = true)]
    pub tr: Option<f64>,
    /// 풍속 [m/s]
    #[arg(long)]
    pub vel: Option<f64>,
    /// 상대습도 [%]
    #[arg(long)]
    pub rh: Option<f64>,
    /// 대사량 [met]
    #[arg(long)]
    pub met: Option<f64>,
    /// 착의량 [clo]
    #[arg(long)]
    pub clo: Option<f64>,
    /// 외부 일 [met]
    #[arg(long)]
    pub wme: Option<f64>,
}

impl ConditionArgs {
    /// 지정된 값만 기본 조건 위에 덮어쓴다.
    pub fn resolve(&self, defaults: &ComfortInputs) -> ComfortInputs {
        ComfortInputs {
            air_temp: self.ta.unwrap_or(defaults.air_temp),
            radiant_temp: self.tr.unwrap_or(defaults.radiant_temp),
            air_velocity: self.vel.unwrap_or(defaults.air_velocity),
            relative_humidity: self.rh.unwrap_or(defaults.relative_humidity),
            metabolic_rate: self.met.unwrap_or(defaults.metabolic_rate),
            clothing_insulation: self.clo.unwrap_or(defaults.clothing_insulation),
            external_work: self.wme.unwrap_or(defaults.external_work),
        }
    }
}

/// 결과를 TOML 문자열로 출력한다.
pub fn print_toml<T: Serialize>(value: &T) -> Result<(), AppError> {
    let text = toml::to_string_pretty(value)?;
    print!("{text}");
    Ok(())
}

pub fn print_comfort(result: &ComfortResult, condition: &str) {
    println!("PMV: {:.3}", result.pmv);
    println!("PPD: {:.1} %", result.ppd);
    println!("SET: {:.2} °C", result.set);
    println!(
        "보정 공기온도: {:.2} °C (냉각효과 {:.2} °C)",
        result.ta_adj, result.ce
    );
    println!("온열 상태: {condition}");
    print_heat_loss(&result.heat_loss);
}

pub fn print_fanger(result: &PmvResult) {
    println!("PMV: {:.3}", result.pmv);
    println!("PPD: {:.1} %", result.ppd);
    print_heat_loss(&result.heat_loss);
}

pub fn print_range(range: &PmvRange, ppd: f64) {
    println!(
        "PPD {:.1}% 에 해당하는 PMV: {:.3} (추운 쪽), {:.3} (더운 쪽)",
        ppd, range.lower, range.upper
    );
}

fn print_heat_loss(terms: &HeatLossTerms) {
    println!("열손실 [W/m²]:");
    println!("  피부 확산: {:.2}", terms.conduction);
    println!("  발한: {:.2}", terms.sweating);
    println!("  호흡 잠열: {:.2}", terms.latent_respiration);
    println!("  호흡 현열: {:.2}", terms.dry_respiration);
    println!("  복사: {:.2}", terms.radiation);
    println!("  대류: {:.2}", terms.convection);
}
