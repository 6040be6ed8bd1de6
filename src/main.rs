use clap::Parser;
use voltage_drop_toolbox::app::{self, Cli};

/// 프로그램의 엔트리 포인트. 인자를 해석한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    match app::execute(cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err}");
            std::process::ExitCode::FAILURE
        }
    }
}
