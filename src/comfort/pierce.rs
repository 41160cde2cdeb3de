//! J.B. Pierce 2-노드 체온조절 모델에 의한 표준유효온도(SET) 계산.
//!
//! 피부/심부 두 구획을 1분 간격 60스텝 동안 모의해 생리적 정상상태를 얻은 뒤,
//! 같은 피부 열손실과 습윤도를 내는 표준환경(RH 50%, 표준 착의, 해면 기압)의 온도를
//! 뉴턴 반복으로 구한다.

use tracing::warn;

use super::psychrometrics::saturated_vapor_pressure_torr;
use super::{ComfortError, ComfortInputs};

/// 모델 내부에서 쓰는 최소 풍속 [m/s]
pub const MIN_AIR_VELOCITY: f64 = 0.1;
/// 모의 시간 [min]
const SIMULATION_MINUTES: usize = 60;
/// SET 뉴턴 반복의 최대 횟수
pub const MAX_SET_ITERATIONS: usize = 100;
const MAX_TCL_REFINEMENTS: usize = 100;

const KCLO: f64 = 0.25;
const BODY_WEIGHT: f64 = 69.9; // kg
const BODY_SURFACE_AREA: f64 = 1.8258; // m²
const MET_FACTOR: f64 = 58.2; // W/m² per met
const SBC: f64 = 0.000000056697; // Stefan-Boltzmann 상수 [W/m²K⁴]
const CSW: f64 = 170.0;
const CDIL: f64 = 120.0;
const CSTR: f64 = 0.5;

const TEMP_SKIN_NEUTRAL: f64 = 33.7;
const TEMP_CORE_NEUTRAL: f64 = 36.49;
const TEMP_BODY_NEUTRAL: f64 = 36.49;
const SKIN_BLOOD_FLOW_NEUTRAL: f64 = 6.3;

/// 대기압 [kPa]
const ATMOSPHERIC_PRESSURE_KPA: f64 = 101.325;

/// 60분 모의가 끝난 뒤 SET 산정에 필요한 상태값.
#[derive(Debug, Clone, Copy)]
struct SteadyState {
    temp_skin: f64,
    /// 피부 총 열손실 (현열 + 증발)
    hsk: f64,
    /// 피부 습윤도
    wettedness: f64,
    /// 복사 열전달계수
    chr: f64,
    lewis_ratio: f64,
}

/// 표준유효온도(SET, °C)를 계산한다.
pub fn pierce_set(inputs: &ComfortInputs) -> Result<f64, ComfortError> {
    inputs.validate()?;
    set_unchecked(inputs)
}

pub(crate) fn set_unchecked(inputs: &ComfortInputs) -> Result<f64, ComfortError> {
    let state = simulate(inputs);
    standard_effective_temperature(inputs, &state)
}

fn simulate(inputs: &ComfortInputs) -> SteadyState {
    let ta = inputs.air_temp;
    let tr = inputs.radiant_temp;
    let met = inputs.metabolic_rate;
    let clo = inputs.clothing_insulation;
    let wme = inputs.external_work;

    let vapor_pressure = inputs.relative_humidity * saturated_vapor_pressure_torr(ta) / 100.0;
    let air_velocity = inputs.air_velocity.max(MIN_AIR_VELOCITY);

    let mut temp_skin = TEMP_SKIN_NEUTRAL;
    let mut temp_core = TEMP_CORE_NEUTRAL;
    let mut skin_blood_flow = SKIN_BLOOD_FLOW_NEUTRAL;
    let mut alfa = 0.1;
    let mut esk = 0.1 * met;

    let pressure_in_atmospheres = ATMOSPHERIC_PRESSURE_KPA * 0.009869;
    let rcl = 0.155 * clo;
    let facl = 1.0 + 0.15 * clo; // 착의에 의한 체표면적 증가
    let lr = 2.2 / pressure_in_atmospheres; // 해면에서 Lewis 관계 2.2
    let rm = met * MET_FACTOR;
    let mut m = met * MET_FACTOR;

    let (wcrit, icl) = if clo <= 0.0 {
        (0.38 * air_velocity.powf(-0.29), 1.0)
    } else {
        (0.59 * air_velocity.powf(-0.08), 0.45)
    };

    let chc_natural = 3.0 * pressure_in_atmospheres.powf(0.53);
    let chc_forced = 8.600001 * (air_velocity * pressure_in_atmospheres).powf(0.53);
    let chc = chc_natural.max(chc_forced);

    // 착의 표면온도 초기 추정
    let mut chr = 4.7;
    let mut ctc = chr + chc;
    let mut ra = 1.0 / (facl * ctc); // 공기층 현열 저항
    let mut top = (chr * tr + chc * ta) / ctc;
    let mut tcl = top + (temp_skin - top) / (ctc * (ra + rcl));

    let mut tcl_old = tcl;
    let mut first_step = true;
    let mut dry = 0.0;
    let mut pwet = 0.0;

    for _ in 0..SIMULATION_MINUTES {
        // tcl/chr 보정은 첫 스텝에서만 시도한다. 진입 시 tcl_old == tcl 이므로 chr 은
        // 초기값 4.7 을 유지하며, SET 기준값이 이 동작에 맞춰져 있다.
        if first_step {
            for _ in 0..MAX_TCL_REFINEMENTS {
                if (tcl - tcl_old).abs() <= 0.01 {
                    break;
                }
                tcl_old = tcl;
                chr = 4.0 * SBC * ((tcl + tr) / 2.0 + 273.15).powi(3) * 0.72;
                ctc = chr + chc;
                ra = 1.0 / (facl * ctc);
                top = (chr * tr + chc * ta) / ctc;
                tcl = (ra * temp_skin + rcl * top) / (ra + rcl);
            }
        }
        first_step = false;

        dry = (temp_skin - top) / (ra + rcl);
        let hfcs = (temp_core - temp_skin) * (5.28 + 1.163 * skin_blood_flow);
        let eres = 0.0023 * m * (44.0 - vapor_pressure);
        let cres = 0.0014 * m * (34.0 - ta);
        let scr = m - hfcs - eres - cres - wme;
        let ssk = hfcs - dry - esk;
        let tcsk = 0.97 * alfa * BODY_WEIGHT;
        let tccr = 0.97 * (1.0 - alfa) * BODY_WEIGHT;
        let dtsk = ssk * BODY_SURFACE_AREA / (tcsk * 60.0); // °C/min
        let dtcr = scr * BODY_SURFACE_AREA / (tccr * 60.0); // °C/min
        temp_skin += dtsk;
        temp_core += dtcr;
        let tb = alfa * temp_skin + (1.0 - alfa) * temp_core;

        let sksig = temp_skin - TEMP_SKIN_NEUTRAL;
        let warms = sksig.max(0.0);
        let colds = (-sksig).max(0.0);
        let crsig = temp_core - TEMP_CORE_NEUTRAL;
        let warmc = crsig.max(0.0);
        let coldc = (-crsig).max(0.0);
        let warmb = (tb - TEMP_BODY_NEUTRAL).max(0.0);

        skin_blood_flow =
            ((SKIN_BLOOD_FLOW_NEUTRAL + CDIL * warmc) / (1.0 + CSTR * colds)).clamp(0.5, 90.0);

        let regsw = (CSW * warmb * (warms / 10.7).exp()).min(500.0);
        let mut ersw = 0.68 * regsw;
        let rea = 1.0 / (lr * facl * chc); // 공기층 증발 저항
        let recl = rcl / (lr * icl); // 착의 증발 저항
        let emax = (saturated_vapor_pressure_torr(temp_skin) - vapor_pressure) / (rea + recl);
        let mut prsw = ersw / emax;
        pwet = 0.06 + 0.94 * prsw;
        let mut edif = pwet * emax - ersw;
        if pwet > wcrit {
            // 땀샘 출력 포화: 초과분은 확산 증발로 돌린다.
            pwet = wcrit;
            prsw = wcrit / 0.94;
            ersw = prsw * emax;
            edif = 0.06 * (1.0 - prsw) * emax;
        }
        if emax < 0.0 {
            // 증발이 불가능한 환경: 증발 열손실은 음수(응축)인 emax 와 같다.
            pwet = wcrit;
            esk = emax;
        } else {
            esk = ersw + edif;
        }

        let mshiv = 19.4 * colds * coldc;
        m = rm + mshiv;
        alfa = 0.0417737 + 0.7451833 / (skin_blood_flow + 0.585417);
    }

    SteadyState {
        temp_skin,
        hsk: dry + esk,
        wettedness: pwet,
        chr,
        lewis_ratio: lr,
    }
}

/// 표준환경에서 같은 피부 열손실을 내는 온도를 뉴턴 반복으로 구한다.
fn standard_effective_temperature(
    inputs: &ComfortInputs,
    state: &SteadyState,
) -> Result<f64, ComfortError> {
    let met = inputs.metabolic_rate;
    let wme = inputs.external_work;
    let lr = state.lewis_ratio;

    // ASHRAE 표준환경 정의
    let chr_s = state.chr;
    let chc_s = if met < 0.85 {
        3.0
    } else {
        (5.66 * (met - 0.85).powf(0.39)).max(3.0)
    };
    let ctc_s = chc_s + chr_s;
    let rclo_s = 1.52 / ((met - wme / MET_FACTOR) + 0.6944) - 0.1835;
    let rcl_s = 0.155 * rclo_s;
    let facl_s = 1.0 + KCLO * rclo_s;
    let fcl_s = 1.0 / (1.0 + 0.155 * facl_s * ctc_s * rclo_s);
    let im_s = 0.45;
    let icl_s = im_s * chc_s / ctc_s * (1.0 - fcl_s) / (chc_s / ctc_s - fcl_s * im_s);
    let ra_s = 1.0 / (facl_s * ctc_s);
    let rea_s = 1.0 / (lr * facl_s * chc_s);
    let recl_s = rcl_s / (lr * icl_s);
    let hd_s = 1.0 / (ra_s + rcl_s);
    let he_s = 1.0 / (rea_s + recl_s);

    let temp_skin = state.temp_skin;
    let hsk = state.hsk;
    let w = state.wettedness;
    let pssk = saturated_vapor_pressure_torr(temp_skin);
    let residual = |x: f64| {
        hsk - hd_s * (temp_skin - x) - w * he_s * (pssk - 0.5 * saturated_vapor_pressure_torr(x))
    };

    const DELTA: f64 = 0.0001;
    let mut x_old = temp_skin - hsk / hd_s; // SET 하한
    for _ in 0..MAX_SET_ITERATIONS {
        let err1 = residual(x_old);
        let err2 = residual(x_old + DELTA);
        let x = x_old - DELTA * err1 / (err2 - err1);
        if !x.is_finite() {
            break;
        }
        let dx = x - x_old;
        x_old = x;
        if dx.abs() <= 0.01 {
            return Ok(x);
        }
    }

    warn!(
        ta = inputs.air_temp,
        met, "SET Newton iteration did not converge"
    );
    Err(ComfortError::Convergence {
        model: "Pierce SET",
        iterations: MAX_SET_ITERATIONS,
    })
}
