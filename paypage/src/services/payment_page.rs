//! 支付页会话
//!
//! 把各组件组装为一次页面会话:
//! - 加载时: 初始化弹窗、处理 `open=true`、QQ提示、微信自动打开
//! - 点击渠道按钮时: 先分发深链,再打开弹窗
//!
//! 设备分类在构造时计算一次,会话期间不变。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;

use crate::models::{
    BrowserFamily, ChannelId, DeviceClassification, DialogError, PageConfig,
};
use crate::services::code_composer::{CodeImageComposer, LogoFetcher, LogoLoader};
use crate::services::{
    ChannelRegistry, DeepLinkDispatcher, DeviceClassifier, DialogController, Navigator,
    OpenOutcome,
};

/// `open=true` 查询参数 (键名不区分大小写)
static INSTANT_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(^|&)open=([^&]*)(&|$)").expect("valid regex"));

/// 页面加载的结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadOutcome {
    /// `open=true` 触发的导航
    pub instant_open: Option<String>,

    /// QQ内置浏览器提示图 (显示时为 Some)
    pub qq_tip: Option<String>,

    /// 微信中自动打开的渠道
    pub auto_opened: Option<ChannelId>,
}

pub struct PaymentPage<L = LogoFetcher> {
    registry: ChannelRegistry,
    dispatcher: DeepLinkDispatcher,
    dialog: DialogController<L>,
}

impl PaymentPage<LogoFetcher> {
    /// 使用默认Logo加载器创建页面会话
    pub fn new(config: &PageConfig, user_agent: &str, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_loader(config, user_agent, navigator, LogoFetcher::new())
    }
}

impl<L: LogoLoader> PaymentPage<L> {
    pub fn with_loader(
        config: &PageConfig,
        user_agent: &str,
        navigator: Arc<dyn Navigator>,
        loader: L,
    ) -> Self {
        let classification = DeviceClassifier::classify(user_agent);
        let registry = ChannelRegistry::from_config(config);
        let dialog = DialogController::new(
            CodeImageComposer::new(loader),
            classification,
            registry.logo().map(str::to_string),
            registry.wechat_title().map(str::to_string),
        );

        tracing::info!(
            browser = ?classification.browser_family,
            os = ?classification.os_family,
            "Payment page session created"
        );

        Self {
            registry,
            dispatcher: DeepLinkDispatcher::new(navigator),
            dialog,
        }
    }

    pub fn classification(&self) -> DeviceClassification {
        self.dialog.classification()
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    pub fn dialog(&self) -> &DialogController<L> {
        &self.dialog
    }

    /// 页面加载
    ///
    /// # 参数
    /// - `query`: 页面URL的查询串,可带或不带前导 `?`
    ///
    /// 微信自动打开失败 (如编码失败) 只记录日志,不影响加载结果。
    pub async fn on_load(&self, query: &str) -> LoadOutcome {
        let mut outcome = LoadOutcome::default();

        self.dialog.close().await;

        if instant_open_requested(query) {
            tracing::info!("Instant open requested");
            if let Some(url) = self
                .registry
                .get(ChannelId::Alipay)
                .and_then(|alipay| alipay.native_open_url.clone())
            {
                self.dispatcher.navigate(&url);
                outcome.instant_open = Some(url);
            }
        }

        let classification = self.classification();
        if classification.browser_family == BrowserFamily::QQ {
            outcome.qq_tip = Some(self.registry.qq_tip().to_string());
        }

        if classification.browser_family == BrowserFamily::WeChat
            && self.registry.contains(ChannelId::Wechatpay)
        {
            match self.trigger(ChannelId::Wechatpay).await {
                Ok(_) => outcome.auto_opened = Some(ChannelId::Wechatpay),
                Err(e) => {
                    tracing::error!(error = %e, "Automatic WeChat Pay dialog failed to open");
                }
            }
        }

        outcome
    }

    /// 点击渠道按钮
    ///
    /// 深链分发与弹窗同时进行: 导航尝试不会阻止弹窗打开。
    ///
    /// # 错误
    /// - `DialogError::ChannelNotConfigured`: 配置中没有该渠道
    /// - 其余同 [`DialogController::open`]
    pub async fn trigger(&self, id: ChannelId) -> Result<OpenOutcome, DialogError> {
        let channel = self
            .registry
            .get(id)
            .ok_or(DialogError::ChannelNotConfigured(id))?;

        let dispatched = self.dispatcher.dispatch(channel, &self.classification());
        self.dialog.open(channel, dispatched.app_switch).await
    }

    /// 关闭按钮
    ///
    /// 微信中关闭按钮被隐藏,界面无法触发;这里仍然允许程序化关闭。
    pub async fn close(&self) -> bool {
        self.dialog.close().await
    }
}

/// 查询串中是否有 `open=true`
pub fn instant_open_requested(query: &str) -> bool {
    let query = query.strip_prefix('?').unwrap_or(query);
    INSTANT_OPEN
        .captures(query)
        .and_then(|caps| caps.get(2))
        .map(|value| value.as_str() == "true")
        .unwrap_or(false)
}
