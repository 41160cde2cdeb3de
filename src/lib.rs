//! 온열 쾌적 지표 계산 로직을 라이브러리로 분리하여 CLI 뿐 아니라 다른 설계 도구에서도 쓸 수 있게 한다.

pub mod app;
pub mod comfort;
pub mod config;
pub mod rootfind;
pub mod ui_cli;
