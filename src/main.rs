use clap::Parser;
use std::process::ExitCode;
use thermal_comfort_toolbox::{app, ui_cli::Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 프로그램의 엔트리 포인트. 로깅을 초기화한 뒤 인자를 해석해 계산을 실행한다.
fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thermal_comfort_toolbox=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match app::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}
