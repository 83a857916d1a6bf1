//! 设备自适应支付页
//!
//! 根据请求设备的浏览器和系统选择弹窗呈现方式:
//! 显示带Logo的二维码、尝试唤起原生应用,或提供二维码下载。

pub mod models;
pub mod services;
pub mod utils;

pub use models::{ChannelId, DeviceClassification, DialogSurface, PageConfig, PresentationVariant};
pub use services::{DeviceClassifier, DialogController, PaymentPage};
