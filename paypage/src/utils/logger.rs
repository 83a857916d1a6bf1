use std::io;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化日志系统
///
/// 配置结构化日志输出:
/// - JSON格式: 便于机器解析和日志分析
/// - 按天轮转: 每天一个新文件
/// - 双输出: 标准错误(开发) + 文件(生产),标准输出留给命令行报告
/// - 环境变量控制: RUST_LOG=debug 可调整日志级别
///
/// # 示例日志
/// ```json
/// {
///   "timestamp": "2026-10-19T10:30:45.123Z",
///   "level": "INFO",
///   "target": "paypage::services::dialog_controller",
///   "fields": {
///     "event_type": "DialogOpened",
///     "channel": "alipay",
///     "variant": "Generic"
///   }
/// }
/// ```
///
/// # 错误
/// 日志目录无法创建或订阅器已被设置时返回 `io::Error`。
pub fn init(log_dir: &Path) -> Result<(), io::Error> {
    // 文件命名格式: paypage.2026-10-19.log
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("paypage")
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .json()
        .with_writer(file_appender)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false);

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    Ok(())
}

/// 日志宏辅助模块
///
/// 提供结构化日志的便捷宏
pub mod macros {
    /// 记录业务事件
    ///
    /// 使用示例:
    /// ```no_run
    /// use paypage::log_event;
    /// log_event!(
    ///     "DialogOpened",
    ///     channel = "alipay",
    ///     variant = "Generic"
    /// );
    /// ```
    #[macro_export]
    macro_rules! log_event {
        ($event_type:expr, $($field:tt = $value:expr),* $(,)?) => {
            tracing::info!(
                event_type = $event_type,
                $($field = $value),*
            );
        };
    }

    /// 记录错误事件
    ///
    /// 使用示例:
    /// ```no_run
    /// use paypage::log_error;
    /// log_error!(
    ///     "EncodeFailed",
    ///     channel = "tenpay",
    ///     error = "data too long"
    /// );
    /// ```
    #[macro_export]
    macro_rules! log_error {
        ($event_type:expr, $($field:tt = $value:expr),* $(,)?) => {
            tracing::error!(
                event_type = $event_type,
                $($field = $value),*
            );
        };
    }
}
