//! 测试公共模块
//!
//! 提供配置样例、常见UA和可控的Logo加载器,避免网络依赖。
#![allow(dead_code)]

use image::DynamicImage;
use paypage::models::{ChannelConfig, LogoError, PageConfig};
use paypage::services::LogoLoader;

pub const UA_CHROME_DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const UA_SAFARI_IOS: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Mobile/15E148 Safari/604.1";
pub const UA_WECHAT_ANDROID: &str = "Mozilla/5.0 (Linux; Android 10; V1914A Build/QP1A.190711.020; wv) AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/78.0.3904.62 XWEB/2693 MMWEBSDK/201201 Mobile Safari/537.36 MicroMessenger/8.0.1.1841(0x2800015D) NetType/WIFI Language/zh_CN";
pub const UA_WECHAT_IOS: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148 MicroMessenger/8.0.30(0x18001e31) NetType/WIFI Language/zh_CN";
pub const UA_QQ_ANDROID: &str = "Mozilla/5.0 (Linux; Android 10; SM-G9750 Build/QP1A.190711.020; wv) AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/77.0.3865.120 MQQBrowser/6.2 TBS/045223 Mobile Safari/537.36 V1_AND_SQ_8.4.1_1442_YYB_D QQ/8.4.1.4680 NetType/WIFI WebP/0.3.0 Pixel/1080";
pub const UA_QQ_IOS: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 13_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148 QQ/8.4.5.626 V1_IPH_SQ_8.4.5_1_APP_A Pixel/750 Core/WKWebView NetType/WIFI";
pub const UA_UC_ANDROID: &str = "Mozilla/5.0 (Linux; U; Android 10; zh-CN; V2001A Build/QP1A.190711.020) AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/78.0.3904.108 UCBrowser/13.4.0.1306 Mobile Safari/537.36";

pub const WECHAT_TITLE: &str = "长按识别二维码完成支付";

/// 始终失败的Logo加载器
pub struct FailingLoader;

impl LogoLoader for FailingLoader {
    async fn load(&self, source: &str) -> Result<DynamicImage, LogoError> {
        Err(LogoError::FetchFailed(format!("offline: {}", source)))
    }
}

pub fn alipay() -> ChannelConfig {
    ChannelConfig {
        url: Some("https://pay.example/abc".to_string()),
        open_url: Some("alipay://abc".to_string()),
        title: "Scan to pay".to_string(),
        other_title: "Open in browser to pay".to_string(),
        save_text: "Save QR code".to_string(),
        to_app_text: String::new(),
        wechat_title: None,
    }
}

pub fn wechatpay() -> ChannelConfig {
    ChannelConfig {
        url: Some("wxp://f2f0abcdef".to_string()),
        open_url: None,
        title: "微信扫码支付".to_string(),
        other_title: "请使用微信扫码".to_string(),
        save_text: "保存二维码".to_string(),
        to_app_text: "打开微信扫一扫".to_string(),
        wechat_title: Some(WECHAT_TITLE.to_string()),
    }
}

pub fn tenpay() -> ChannelConfig {
    ChannelConfig {
        url: Some("https://i.qianbao.qq.com/wallet/sqrcode.htm?m=tenpay&a=1".to_string()),
        open_url: None,
        title: "QQ钱包扫码支付".to_string(),
        other_title: "请使用QQ扫码".to_string(),
        save_text: "保存二维码".to_string(),
        to_app_text: "打开QQ扫一扫".to_string(),
        wechat_title: None,
    }
}

/// 三个渠道齐全、没有Logo的配置
pub fn full_config() -> PageConfig {
    PageConfig {
        qrlogo: None,
        qq_tip: None,
        alipay: Some(alipay()),
        wechatpay: Some(wechatpay()),
        tenpay: Some(tenpay()),
    }
}
