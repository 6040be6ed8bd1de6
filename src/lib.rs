//! 전압강하 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 코드를 쓰도록 한다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod logging;
pub mod quantity;
pub mod record;
pub mod session;
pub mod ui_cli;
pub mod units;
pub mod wire;
