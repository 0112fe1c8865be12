use tickerview_core::config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// 滚动日志文件名前缀
const LOG_FILE_PREFIX: &str = "tickerview.log";

/// # Summary
/// 初始化全局日志。
///
/// # Logic
/// 1. `RUST_LOG` 存在时优先使用，否则使用配置的级别。
/// 2. stdout 通过非阻塞 writer 输出。
/// 3. 配置了日志目录时额外按天滚动写入文件 (无 ANSI 颜色)。
///
/// # Returns
/// 后台写线程的守卫，必须持有到进程退出，否则缓冲日志会丢失。
pub fn init(config: &LogConfig) -> anyhow::Result<Vec<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let (stdout, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let mut guards = vec![stdout_guard];

    let file_layer = match &config.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            guards.push(guard);
            Some(fmt::layer().with_writer(writer).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(stdout))
        .with(file_layer)
        .try_init()?;

    Ok(guards)
}
