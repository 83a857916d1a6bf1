//! 设备分类器
//!
//! 职责: 把 User-Agent 字符串解析为浏览器家族和操作系统家族。
//! 纯函数,不访问网络和页面状态;无法识别的UA一律归为 `{Generic, Other}`,
//! 分类永远不会阻塞页面。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{BrowserFamily, DeviceClassification, OsFamily};

/// 微信内置浏览器 (移动端为 MicroMessenger,桌面端带 Wechat)
static WECHAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)micromessenger|wechat").expect("valid regex"));

/// 手机QQ内置浏览器: `QQ/8.4.1`,不匹配 `MQQBrowser/` 和 `QQBrowser/`
static QQ: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bQQ/\d").expect("valid regex"));

/// 会拦截下载的厂商浏览器
static RESTRICTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)miuibrowser|ucbrowser|ucweb|\bquark/|baiduboxapp|baidubrowser|bidubrowser")
        .expect("valid regex")
});

static IOS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"iPhone|iPad|iPod|\bCPU OS \d|\biOS\b").expect("valid regex"));

static ANDROID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bandroid\b").expect("valid regex"));

/// 设备分类器
pub struct DeviceClassifier;

impl DeviceClassifier {
    /// 解析 User-Agent
    ///
    /// 浏览器家族的判断顺序: 微信 -> QQ -> 受限浏览器 -> 通用。
    /// 微信安卓版UA同时包含 `MQQBrowser`,必须先判断微信。
    pub fn classify(user_agent: &str) -> DeviceClassification {
        let browser_family = if WECHAT.is_match(user_agent) {
            BrowserFamily::WeChat
        } else if QQ.is_match(user_agent) {
            BrowserFamily::QQ
        } else if RESTRICTED.is_match(user_agent) {
            BrowserFamily::RestrictedBrowser
        } else {
            BrowserFamily::Generic
        };

        let os_family = if IOS.is_match(user_agent) {
            OsFamily::IOS
        } else if ANDROID.is_match(user_agent) {
            OsFamily::Android
        } else {
            OsFamily::Other
        };

        let classification = DeviceClassification::new(browser_family, os_family);

        tracing::debug!(
            browser = ?classification.browser_family,
            os = ?classification.os_family,
            "User agent classified"
        );

        classification
    }
}
