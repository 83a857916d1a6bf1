//! 数据模型模块
//!
//! 包含所有核心数据结构:
//! - errors: 错误类型定义 (合成、Logo、弹窗、配置)
//! - channel: 支付渠道与配置载荷
//! - classification: 设备分类与呈现方式决策表
//! - dialog: 弹窗状态、显示面与合成图片
//! - dialog_event: 弹窗事件 (审计追踪)

pub mod channel;
pub mod classification;
pub mod dialog;
pub mod dialog_event;
pub mod errors;

// 重导出常用类型,简化外部引用
pub use channel::{ChannelConfig, ChannelId, PageConfig, PaymentChannel};
pub use classification::{BrowserFamily, DeviceClassification, OsFamily, PresentationVariant};
pub use dialog::{
    AppSwitchLink, DialogState, DialogSurface, RenderedImage, SaveLink, DOWNLOAD_FILENAME,
};
pub use dialog_event::{DialogEvent, DialogEventType};
pub use errors::{ComposeError, ConfigError, DialogError, LogoError};
