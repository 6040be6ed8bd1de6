//! tracing 구독자 초기화.

use tracing_subscriber::EnvFilter;

/// stderr로 로그를 출력하는 fmt 구독자를 설치한다.
///
/// `RUST_LOG`가 설정돼 있으면 `default_filter`보다 우선한다. 이미 설치된 구독자가
/// 있으면 아무것도 하지 않는다.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
