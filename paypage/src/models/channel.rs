use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 支付渠道标识
///
/// 配置载荷的顶层键名即为渠道标识,序列化为小写。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelId {
    /// 支付宝
    Alipay,

    /// 微信支付
    Wechatpay,

    /// QQ钱包
    Tenpay,
}

impl ChannelId {
    pub const ALL: [ChannelId; 3] = [ChannelId::Alipay, ChannelId::Wechatpay, ChannelId::Tenpay];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelId::Alipay => "alipay",
            ChannelId::Wechatpay => "wechatpay",
            ChannelId::Tenpay => "tenpay",
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChannelId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("未知的支付渠道: {}", s))
    }
}

/// 单个渠道的配置条目 (配置载荷的原始形态)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// 二维码载荷
    #[serde(default)]
    pub url: Option<String>,

    /// 原生应用唤起链接
    #[serde(default)]
    pub open_url: Option<String>,

    #[serde(default)]
    pub title: String,

    #[serde(default, rename = "othertitle")]
    pub other_title: String,

    #[serde(default, rename = "savetext")]
    pub save_text: String,

    #[serde(default, rename = "toapptext")]
    pub to_app_text: String,

    /// 微信内置浏览器中显示的标题 (仅 wechatpay 条目使用)
    #[serde(default, rename = "wechattitle")]
    pub wechat_title: Option<String>,
}

/// 页面配置载荷
///
/// 渠道键存在与否决定对应按钮是否被绑定。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageConfig {
    /// 二维码中心的品牌Logo (URL、data URL 或本地路径)
    #[serde(default)]
    pub qrlogo: Option<String>,

    /// QQ内置浏览器提示图
    #[serde(default)]
    pub qq_tip: Option<String>,

    #[serde(default)]
    pub alipay: Option<ChannelConfig>,

    #[serde(default)]
    pub wechatpay: Option<ChannelConfig>,

    #[serde(default)]
    pub tenpay: Option<ChannelConfig>,
}

impl PageConfig {
    pub fn channel_config(&self, id: ChannelId) -> Option<&ChannelConfig> {
        match id {
            ChannelId::Alipay => self.alipay.as_ref(),
            ChannelId::Wechatpay => self.wechatpay.as_ref(),
            ChannelId::Tenpay => self.tenpay.as_ref(),
        }
    }
}

/// 支付渠道
///
/// 从配置加载一次,会话期间不可变。
/// 不变量: 没有 `payload_url` 的渠道不能以弹窗模式打开。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentChannel {
    pub id: ChannelId,
    pub payload_url: Option<String>,
    pub native_open_url: Option<String>,
    pub title: String,
    pub other_title: String,
    pub save_text: String,
    pub to_app_text: String,
}

impl PaymentChannel {
    pub fn from_config(id: ChannelId, config: &ChannelConfig) -> Self {
        Self {
            id,
            payload_url: non_empty(config.url.as_deref()),
            native_open_url: non_empty(config.open_url.as_deref()),
            title: config.title.clone(),
            other_title: config.other_title.clone(),
            save_text: config.save_text.clone(),
            to_app_text: config.to_app_text.clone(),
        }
    }

    /// 是否可以以弹窗模式打开
    pub fn can_open_dialog(&self) -> bool {
        self.payload_url.is_some()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}
