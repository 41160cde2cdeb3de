use crate::rootfind::{AsRootFindError, RootFindError};

/// 쾌적 지표 계산 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum ComfortError {
    /// 모델의 유효 범위를 벗어난 입력
    Domain(String),
    /// 모델 내부 반복 계산이 한도 내에 수렴하지 않음
    Convergence {
        model: &'static str,
        iterations: usize,
    },
    /// 근 찾기(할선법/이분법) 실패
    RootFind(RootFindError),
    /// 잘못된 설정값(예: 알 수 없는 입력 이름)
    Configuration(String),
}

impl std::fmt::Display for ComfortError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComfortError::Domain(msg) => write!(f, "유효 범위 오류: {msg}"),
            ComfortError::Convergence { model, iterations } => {
                write!(f, "{model} 모델이 {iterations}회 반복 내에 수렴하지 않음")
            }
            ComfortError::RootFind(e) => write!(f, "근 찾기 실패: {e}"),
            ComfortError::Configuration(msg) => write!(f, "설정 오류: {msg}"),
        }
    }
}

impl std::error::Error for ComfortError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ComfortError::RootFind(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RootFindError> for ComfortError {
    fn from(value: RootFindError) -> Self {
        ComfortError::RootFind(value)
    }
}

impl AsRootFindError for ComfortError {
    fn as_root_find_error(&self) -> Option<&RootFindError> {
        match self {
            ComfortError::RootFind(e) => Some(e),
            _ => None,
        }
    }
}
