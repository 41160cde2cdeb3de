//! 스칼라 방정식 근 찾기 모듈.
//!
//! 할선법(secant)을 먼저 시도하고, 수렴하지 않으면 이분법(bisection)으로 재시도한다.
//! 목적 함수는 `FnMut(f64) -> Result<f64, E>` 형태로 받아 모델 계산 오류를 그대로 전달한다.

use tracing::{debug, trace, warn};

/// 할선법 최대 반복 횟수
pub const SECANT_MAX_ITERATIONS: usize = 100;
/// 이분법 최대 반복 횟수
pub const BISECT_MAX_ITERATIONS: usize = 200;

/// 근 찾기 실패 사유.
#[derive(Debug, Clone, PartialEq)]
pub enum RootFindError {
    /// 반복 한도 내에 허용오차를 만족하지 못함
    NoConvergence { iterations: usize },
    /// 기울기가 0이거나 유한하지 않아 다음 추정값을 정의할 수 없음
    UndefinedStep { at: f64 },
    /// 구간 양 끝의 부호가 같아 근을 포함하지 않음
    NotBracketed { lower: f64, upper: f64 },
}

impl std::fmt::Display for RootFindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RootFindError::NoConvergence { iterations } => {
                write!(f, "{iterations}회 반복 후에도 수렴하지 않음")
            }
            RootFindError::UndefinedStep { at } => {
                write!(f, "x={at} 에서 할선 기울기를 정의할 수 없음")
            }
            RootFindError::NotBracketed { lower, upper } => {
                write!(f, "구간 [{lower}, {upper}] 이(가) 근을 포함하지 않음")
            }
        }
    }
}

impl std::error::Error for RootFindError {}

/// 할선법으로 `f(x) = 0` 의 근을 구한다.
///
/// 두 경계값을 초기 추정값으로 사용하며 `|f(x)| < tolerance` 가 되면 종료한다.
pub fn secant<F, E>(lower: f64, upper: f64, mut f: F, tolerance: f64) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<RootFindError>,
{
    let (mut a, mut b) = (lower, upper);
    let mut fa = f(a)?;
    if fa.abs() <= tolerance {
        return Ok(a);
    }
    let mut fb = f(b)?;
    if fb.abs() <= tolerance {
        return Ok(b);
    }

    for i in 0..SECANT_MAX_ITERATIONS {
        let slope = (fb - fa) / (b - a);
        if slope == 0.0 || !slope.is_finite() {
            return Err(RootFindError::UndefinedStep { at: b }.into());
        }
        let c = b - fb / slope;
        if !c.is_finite() {
            return Err(RootFindError::UndefinedStep { at: b }.into());
        }
        let fc = f(c)?;
        if fc.abs() < tolerance {
            trace!(root = c, iterations = i + 1, "secant converged");
            return Ok(c);
        }
        a = b;
        fa = fb;
        b = c;
        fb = fc;
    }
    Err(RootFindError::NoConvergence {
        iterations: SECANT_MAX_ITERATIONS,
    }
    .into())
}

/// 이분법으로 근을 구한다. 구간이 부호 변화를 포함하지 않으면 `NotBracketed` 오류를 낸다.
///
/// 구간 폭이 `2 * tolerance` 이하가 되면 중점을 반환한다.
pub fn try_bisect<F, E>(lower: f64, upper: f64, mut f: F, tolerance: f64) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<RootFindError>,
{
    let (mut a, mut b) = (lower, upper);
    let mut fa = f(a)?;
    let mut fb = f(b)?;
    let mut midpoint = (a + b) / 2.0;

    for _ in 0..BISECT_MAX_ITERATIONS {
        if (b - a).abs() <= 2.0 * tolerance {
            return Ok(midpoint);
        }
        midpoint = (a + b) / 2.0;
        let fm = f(midpoint)?;
        if fm == 0.0 {
            return Ok(midpoint);
        }
        if fa * fm < 0.0 {
            b = midpoint;
            fb = fm;
        } else if fb * fm < 0.0 {
            a = midpoint;
            fa = fm;
        } else {
            return Err(RootFindError::NotBracketed { lower, upper }.into());
        }
    }
    Err(RootFindError::NoConvergence {
        iterations: BISECT_MAX_ITERATIONS,
    }
    .into())
}

/// 이분법으로 근을 구하되, 구간이 근을 포함하지 않으면 `fallback` 을 반환한다.
///
/// 이 경우 결과는 근이 아니라 호출자가 정한 대체값이므로 정확도가 떨어질 수 있다.
pub fn bisect<F, E>(lower: f64, upper: f64, f: F, tolerance: f64, fallback: f64) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<RootFindError> + AsRootFindError,
{
    match try_bisect(lower, upper, f, tolerance) {
        Err(err) if err.is_not_bracketed() => {
            warn!(lower, upper, fallback, "bisection interval has no sign change, using fallback");
            Ok(fallback)
        }
        other => other,
    }
}

/// 할선법 → 이분법 순서로 근을 구한다.
pub fn solve<F, E>(lower: f64, upper: f64, mut f: F, tolerance: f64) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<RootFindError> + std::fmt::Display,
{
    match secant(lower, upper, &mut f, tolerance) {
        Ok(root) => Ok(root),
        Err(err) => {
            debug!(lower, upper, %err, "secant failed, retrying with bisection");
            try_bisect(lower, upper, f, tolerance)
        }
    }
}

/// [`solve`] 와 같지만 이분법 단계에서 구간이 근을 포함하지 않으면 `fallback` 을 반환한다.
pub fn solve_or<F, E>(
    lower: f64,
    upper: f64,
    mut f: F,
    tolerance: f64,
    fallback: f64,
) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<RootFindError> + AsRootFindError + std::fmt::Display,
{
    match secant(lower, upper, &mut f, tolerance) {
        Ok(root) => Ok(root),
        Err(err) => {
            debug!(lower, upper, %err, "secant failed, retrying with bisection");
            bisect(lower, upper, f, tolerance, fallback)
        }
    }
}

/// 호출자 오류 타입에서 근 찾기 실패를 꺼내 보기 위한 트레이트.
pub trait AsRootFindError {
    fn as_root_find_error(&self) -> Option<&RootFindError>;

    fn is_not_bracketed(&self) -> bool {
        matches!(
            self.as_root_find_error(),
            Some(RootFindError::NotBracketed { .. })
        )
    }
}

impl AsRootFindError for RootFindError {
    fn as_root_find_error(&self) -> Option<&RootFindError> {
        Some(self)
    }
}
