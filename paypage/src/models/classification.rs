use serde::{Deserialize, Serialize};

/// 浏览器家族
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserFamily {
    /// 手机QQ内置浏览器
    #[serde(rename = "qq")]
    QQ,

    /// 微信内置浏览器
    #[serde(rename = "wechat")]
    WeChat,

    /// 已知会拦截下载的厂商浏览器 (MIUI/UC/夸克/百度)
    RestrictedBrowser,

    #[default]
    Generic,
}

/// 操作系统家族
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OsFamily {
    #[serde(rename = "ios")]
    IOS,

    Android,

    #[default]
    Other,
}

/// 设备分类
///
/// 每次页面加载计算一次,会话期间不可变。
/// 默认值 `{Generic, Other}` 也是无法解析的UA的兜底结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceClassification {
    pub browser_family: BrowserFamily,
    pub os_family: OsFamily,
}

impl DeviceClassification {
    pub fn new(browser_family: BrowserFamily, os_family: OsFamily) -> Self {
        Self {
            browser_family,
            os_family,
        }
    }
}

/// 弹窗呈现方式
///
/// 决策顺序 (首个命中生效):
/// 1. QQ 浏览器 -> `QQ`
/// 2. 微信浏览器 -> `WeChat`
/// 3. iOS 或受限浏览器 -> `Restricted`
/// 4. 其余 -> `Generic`
///
/// 微信在 iOS 上同样满足第3条,必须先判断第2条。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationVariant {
    #[serde(rename = "qq")]
    QQ,
    #[serde(rename = "wechat")]
    WeChat,
    Restricted,
    Generic,
}

impl PresentationVariant {
    pub fn select(classification: &DeviceClassification) -> Self {
        match (classification.browser_family, classification.os_family) {
            (BrowserFamily::QQ, _) => PresentationVariant::QQ,
            (BrowserFamily::WeChat, _) => PresentationVariant::WeChat,
            (BrowserFamily::RestrictedBrowser, _) | (_, OsFamily::IOS) => {
                PresentationVariant::Restricted
            }
            _ => PresentationVariant::Generic,
        }
    }

    /// 是否显示关闭按钮 (微信中弹窗常驻)
    pub fn shows_close(&self) -> bool {
        !matches!(self, PresentationVariant::WeChat)
    }

    /// 是否提供保存二维码按钮
    pub fn offers_download(&self) -> bool {
        matches!(self, PresentationVariant::Generic)
    }

    /// 是否显示"在浏览器中打开"提示
    pub fn shows_open_in_browser(&self) -> bool {
        matches!(self, PresentationVariant::WeChat)
    }
}
