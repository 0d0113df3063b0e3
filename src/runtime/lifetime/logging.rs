use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// 初始化日志，返回的 guard 必须存活到进程退出，否则缓冲中的日志会丢失
///
/// 开发环境输出带文件与行号的文本日志，其余环境输出 JSON。
pub fn init_tracing(config: &AppConfig) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.app.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_level(true);

    if config.is_development() {
        builder
            .with_ansi(true)
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        builder.with_ansi(false).json().init();
    }

    guard
}
