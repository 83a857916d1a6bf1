use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::channel::ChannelId;

/// 二维码合成相关错误
///
/// 只有编码失败是致命的: 载荷必须永远正确,
/// Logo 只是装饰,其失败由 [`LogoError`] 表达并在合成器内部吸收。
#[derive(Debug, Error, Serialize, Deserialize)]
#[serde(tag = "error", content = "details")]
pub enum ComposeError {
    /// 载荷无法编码为二维码矩阵
    ///
    /// 可能原因:
    /// - 载荷过长,超出H级容错的容量
    /// - 载荷为空
    #[error("二维码编码失败: {0}")]
    EncodeFailed(String),

    /// 位图无法编码为PNG
    #[error("图片编码失败: {0}")]
    ImageEncodeFailed(String),
}

/// Logo 加载相关错误
///
/// 非致命: 合成器记录警告后返回未加Logo的二维码。
#[derive(Debug, Error, Serialize, Deserialize)]
#[serde(tag = "error", content = "details")]
pub enum LogoError {
    /// 网络请求失败
    #[error("Logo下载失败: {0}")]
    FetchFailed(String),

    /// HTTP状态码错误
    #[error("Logo下载失败 HTTP {status}: {url}")]
    HttpStatus { status: u16, url: String },

    /// 本地文件读取失败
    #[error("Logo读取失败: {0}")]
    ReadFailed(String),

    /// 图片数据无法解码
    #[error("Logo解码失败: {0}")]
    DecodeFailed(String),

    /// data URL 格式无效
    #[error("无效的data URL: {0}")]
    InvalidDataUrl(String),
}

/// 弹窗控制器错误
///
/// 错误分类:
/// - `ChannelNotConfigured`: 配置中不存在该渠道,按钮本不应被绑定
/// - `MissingPayload`: 渠道没有 `url`,不能以弹窗模式打开
/// - `Compose`: 编码失败,弹窗显示错误状态而不是错误的图片
#[derive(Debug, Error, Serialize, Deserialize)]
#[serde(tag = "error", content = "details")]
pub enum DialogError {
    #[error("支付渠道未配置: {0}")]
    ChannelNotConfigured(ChannelId),

    #[error("支付渠道 {0} 缺少二维码载荷")]
    MissingPayload(ChannelId),

    #[error(transparent)]
    Compose(#[from] ComposeError),
}

/// 配置加载错误
#[derive(Debug, Error, Serialize, Deserialize)]
#[serde(tag = "error", content = "details")]
pub enum ConfigError {
    /// 配置文件不存在
    #[error("配置文件不存在: {0}")]
    NotFound(String),

    /// 文件读取失败
    #[error("配置文件读取失败: {0}")]
    IoError(String),

    /// JSON 解析失败
    #[error("配置解析失败: {0}")]
    ParseFailed(String),

    /// 未指定配置文件路径
    #[error("未指定配置文件路径 (设置 {0} 或使用 --config)")]
    MissingPath(String),
}

/// 实现从reqwest::Error到LogoError的转换
impl From<reqwest::Error> for LogoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LogoError::FetchFailed("请求超时".to_string())
        } else if err.is_connect() {
            LogoError::FetchFailed("无法连接到服务器".to_string())
        } else {
            LogoError::FetchFailed(err.to_string())
        }
    }
}

impl From<std::io::Error> for LogoError {
    fn from(err: std::io::Error) -> Self {
        LogoError::ReadFailed(err.to_string())
    }
}

impl From<image::ImageError> for LogoError {
    fn from(err: image::ImageError) -> Self {
        LogoError::DecodeFailed(err.to_string())
    }
}

impl From<qrcode::types::QrError> for ComposeError {
    fn from(err: qrcode::types::QrError) -> Self {
        ComposeError::EncodeFailed(err.to_string())
    }
}

impl From<image::ImageError> for ComposeError {
    fn from(err: image::ImageError) -> Self {
        ComposeError::ImageEncodeFailed(err.to_string())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound(err.to_string()),
            _ => ConfigError::IoError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}
