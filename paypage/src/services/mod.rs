//! 服务层模块
//!
//! 包含所有业务逻辑服务:
//! - `device_classifier`: 解析UA得到设备分类
//! - `code_composer`: 生成二维码并叠加Logo
//! - `channel_registry`: 只读的支付渠道查询
//! - `deep_link`: 唤起原生应用
//! - `dialog_controller`: 弹窗状态机
//! - `payment_page`: 页面会话,组装以上服务
//! - `config_service`: 配置加载
//!
//! # 服务架构
//!
//! ```text
//! ┌─────────────────┐
//! │   PaymentPage   │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌──────────────────────────────────────┐
//! │  ┌────────────────┐ ┌──────────────┐ │
//! │  │DeepLinkDispatch│ │DialogControl │ │
//! │  └───────┬────────┘ └──────┬───────┘ │
//! │          │                 │         │
//! │  ┌───────▼──────┐  ┌───────▼───────┐ │
//! │  │  Navigator   │  │CodeImageCompos│ │
//! │  └──────────────┘  └───────────────┘ │
//! └──────────────────────────────────────┘
//! ```
//!
//! # 使用示例
//!
//! ```no_run
//! use paypage::models::ChannelId;
//! use paypage::services::{ConfigService, PaymentPage, RecordingNavigator};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigService::load("config.json")?;
//! let navigator = Arc::new(RecordingNavigator::new());
//! let page = PaymentPage::new(&config, "Mozilla/5.0 (X11; Linux x86_64)", navigator);
//!
//! page.on_load("open=true").await;
//! page.trigger(ChannelId::Alipay).await?;
//! let surface = page.dialog().surface().await;
//! println!("{}", surface.title);
//! # Ok(())
//! # }
//! ```

pub mod channel_registry;
pub mod code_composer;
pub mod config_service;
pub mod deep_link;
pub mod device_classifier;
pub mod dialog_controller;
pub mod payment_page;

// 重导出常用类型,简化外部引用
pub use channel_registry::ChannelRegistry;
pub use code_composer::{CodeImageComposer, LogoFetcher, LogoLoader};
pub use config_service::{ConfigService, Settings};
pub use deep_link::{DeepLinkDispatcher, DispatchOutcome, Navigator, RecordingNavigator};
pub use device_classifier::DeviceClassifier;
pub use dialog_controller::{DialogController, OpenOutcome};
pub use payment_page::{LoadOutcome, PaymentPage};
