//! 支付渠道注册表
//!
//! 只读查询已配置的支付渠道。配置在启动时加载一次,之后不再变化。

use std::collections::BTreeMap;

use crate::models::{ChannelId, PageConfig, PaymentChannel};

/// QQ内置浏览器提示图 (未配置 `qq_tip` 时使用)
pub const DEFAULT_QQ_TIP: &str = "https://i.loli.net/2019/06/25/5d11d9c19065848452.png";

pub struct ChannelRegistry {
    channels: BTreeMap<ChannelId, PaymentChannel>,
    logo: Option<String>,
    wechat_title: Option<String>,
    qq_tip: String,
}

impl ChannelRegistry {
    pub fn from_config(config: &PageConfig) -> Self {
        let channels: BTreeMap<_, _> = ChannelId::ALL
            .into_iter()
            .filter_map(|id| {
                config
                    .channel_config(id)
                    .map(|entry| (id, PaymentChannel::from_config(id, entry)))
            })
            .collect();

        let wechat_title = config
            .wechatpay
            .as_ref()
            .and_then(|entry| entry.wechat_title.clone());

        tracing::info!(
            channels = ?channels.keys().collect::<Vec<_>>(),
            has_logo = config.qrlogo.is_some(),
            "Channel registry loaded"
        );

        Self {
            channels,
            logo: config.qrlogo.clone().filter(|logo| !logo.is_empty()),
            wechat_title,
            qq_tip: config
                .qq_tip
                .clone()
                .unwrap_or_else(|| DEFAULT_QQ_TIP.to_string()),
        }
    }

    pub fn get(&self, id: ChannelId) -> Option<&PaymentChannel> {
        self.channels.get(&id)
    }

    pub fn contains(&self, id: ChannelId) -> bool {
        self.channels.contains_key(&id)
    }

    /// 已配置的渠道 (按标识排序)
    pub fn channels(&self) -> impl Iterator<Item = &PaymentChannel> {
        self.channels.values()
    }

    /// 二维码中心Logo
    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref()
    }

    /// 微信内置浏览器中的弹窗标题
    pub fn wechat_title(&self) -> Option<&str> {
        self.wechat_title.as_deref()
    }

    pub fn qq_tip(&self) -> &str {
        &self.qq_tip
    }
}
