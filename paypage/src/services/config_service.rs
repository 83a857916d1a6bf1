use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{ConfigError, PageConfig};

/// 配置文件路径的环境变量
pub const CONFIG_ENV: &str = "PAYPAGE_CONFIG";

/// 日志目录的环境变量
pub const LOG_DIR_ENV: &str = "PAYPAGE_LOG_DIR";

const DEFAULT_LOG_DIR: &str = "logs";

/// 运行设置
///
/// 来源优先级: 命令行参数 > 环境变量 (.env 文件) > 默认值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config_path: Option<PathBuf>,
    pub log_dir: PathBuf,
}

impl Settings {
    /// 从变量查询函数构建设置
    ///
    /// 空字符串视为未设置。
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            config_path: read(CONFIG_ENV).map(PathBuf::from),
            log_dir: read(LOG_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
        }
    }
}

/// 配置服务
///
/// 职责单一:
/// - 加载 .env 中的运行设置
/// - 读取并解析支付页配置载荷
pub struct ConfigService;

impl ConfigService {
    /// 读取运行设置
    ///
    /// 当前目录存在 .env 时先加载它,已存在的环境变量不会被覆盖。
    pub fn settings() -> Settings {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "Failed to load .env file"),
        }
        Settings::from_vars(|key| env::var(key).ok())
    }

    /// 从文件加载配置载荷
    ///
    /// # 错误
    /// - `ConfigError::NotFound`: 文件不存在
    /// - `ConfigError::ParseFailed`: JSON 格式错误
    pub fn load(path: impl AsRef<Path>) -> Result<PageConfig, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to read config");
            ConfigError::from(e)
        })?;

        let config = Self::parse(&content)?;

        tracing::info!(
            path = %path.display(),
            alipay = config.alipay.is_some(),
            wechatpay = config.wechatpay.is_some(),
            tenpay = config.tenpay.is_some(),
            "Page config loaded"
        );

        Ok(config)
    }

    pub fn parse(content: &str) -> Result<PageConfig, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// 按 `PAYPAGE_CONFIG` 加载配置
    pub fn from_env() -> Result<PageConfig, ConfigError> {
        let settings = Self::settings();
        let path = settings
            .config_path
            .ok_or_else(|| ConfigError::MissingPath(CONFIG_ENV.to_string()))?;
        Self::load(path)
    }
}
