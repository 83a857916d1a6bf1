//! 深链分发器
//!
//! 职责: 在打开弹窗之前或同时尝试唤起原生应用。
//! - 有 `open_url` 且没有平台专属规则的渠道: 立即导航 (尽力而为)
//! - 有平台专属规则的渠道: 生成"去App扫码"按钮,仅在目标平台上显示
//!
//! 导航是发出即忘的: 原生应用是否存在对本系统不可见,也不会产生错误,
//! 弹窗始终是兜底。

use std::sync::{Arc, Mutex};

use crate::models::{
    AppSwitchLink, BrowserFamily, ChannelId, DeviceClassification, OsFamily, PaymentChannel,
};

/// 微信扫一扫
pub const WECHAT_SCAN_SCHEME: &str = "weixin://scanqrcode";

/// 手机QQ扫一扫
pub const QQ_SCAN_SCHEME: &str = "mqq://qrcode/scan_qrcode?version=1&src_type=app";

/// 页面导航
///
/// 实现方不得返回错误: 唤起失败对页面不可见。
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

/// 记录所有导航请求的实现
///
/// 命令行输出报告和测试断言都依赖它。
#[derive(Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<String> {
        self.visited
            .lock()
            .map(|visited| visited.clone())
            .unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(url.to_string());
        }
    }
}

/// 平台专属的"去App扫码"规则
#[derive(Debug, Clone, Copy)]
pub struct AppSwitchRule {
    pub scheme: &'static str,
    applies: fn(&DeviceClassification) -> bool,
}

impl AppSwitchRule {
    pub fn applies_to(&self, classification: &DeviceClassification) -> bool {
        (self.applies)(classification)
    }

    /// 渠道的内置规则
    ///
    /// - 微信支付: iOS 且不在微信内
    /// - QQ钱包: iOS 或 Android
    /// - 支付宝: 无,直接使用 `open_url`
    pub fn for_channel(id: ChannelId) -> Option<Self> {
        match id {
            ChannelId::Wechatpay => Some(Self {
                scheme: WECHAT_SCAN_SCHEME,
                applies: |c| {
                    c.os_family == OsFamily::IOS && c.browser_family != BrowserFamily::WeChat
                },
            }),
            ChannelId::Tenpay => Some(Self {
                scheme: QQ_SCAN_SCHEME,
                applies: |c| matches!(c.os_family, OsFamily::IOS | OsFamily::Android),
            }),
            ChannelId::Alipay => None,
        }
    }
}

/// 分发结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// 已发起的导航
    pub navigated: Option<String>,

    /// 需要显示的"去App扫码"按钮
    pub app_switch: Option<AppSwitchLink>,
}

pub struct DeepLinkDispatcher {
    navigator: Arc<dyn Navigator>,
}

impl DeepLinkDispatcher {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator }
    }

    /// 尽力而为的导航
    pub fn navigate(&self, url: &str) {
        crate::log_event!("NavigationDispatched", url = url);
        self.navigator.navigate(url);
    }

    pub fn dispatch(
        &self,
        channel: &PaymentChannel,
        classification: &DeviceClassification,
    ) -> DispatchOutcome {
        match AppSwitchRule::for_channel(channel.id) {
            Some(rule) => {
                let app_switch = rule.applies_to(classification).then(|| AppSwitchLink {
                    href: rule.scheme.to_string(),
                    label: channel.to_app_text.clone(),
                });

                tracing::debug!(
                    channel = %channel.id,
                    visible = app_switch.is_some(),
                    "App switch affordance resolved"
                );

                DispatchOutcome {
                    navigated: None,
                    app_switch,
                }
            }
            None => {
                let navigated = channel.native_open_url.clone();
                if let Some(url) = &navigated {
                    self.navigate(url);
                }
                DispatchOutcome {
                    navigated,
                    app_switch: None,
                }
            }
        }
    }
}
