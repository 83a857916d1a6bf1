//! 支付页会话集成测试
//!
//! 覆盖页面加载、渠道点击和各呈现方式下的弹窗显示面。

mod common;

use std::sync::Arc;

use common::*;
use paypage::models::{
    BrowserFamily, ChannelId, DialogError, DialogEventType, OsFamily, PresentationVariant,
    DOWNLOAD_FILENAME,
};
use paypage::services::channel_registry::DEFAULT_QQ_TIP;
use paypage::services::deep_link::{QQ_SCAN_SCHEME, WECHAT_SCAN_SCHEME};
use paypage::services::{OpenOutcome, PaymentPage, RecordingNavigator};

fn page(user_agent: &str) -> (PaymentPage<FailingLoader>, Arc<RecordingNavigator>) {
    page_with(&full_config(), user_agent)
}

fn page_with(
    config: &paypage::PageConfig,
    user_agent: &str,
) -> (PaymentPage<FailingLoader>, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::new());
    let page = PaymentPage::with_loader(config, user_agent, navigator.clone(), FailingLoader);
    (page, navigator)
}

#[tokio::test]
async fn test_generic_browser_alipay_scenario() {
    let (page, navigator) = page(UA_CHROME_DESKTOP);
    assert_eq!(
        page.classification().browser_family,
        BrowserFamily::Generic
    );
    assert_eq!(page.classification().os_family, OsFamily::Other);

    let outcome = page.trigger(ChannelId::Alipay).await.unwrap();
    assert_eq!(outcome, OpenOutcome::Shown(PresentationVariant::Generic));

    // 深链尝试与弹窗同时发生
    assert_eq!(navigator.history(), vec!["alipay://abc".to_string()]);

    let surface = page.dialog().surface().await;
    assert!(surface.container_visible);
    assert_eq!(surface.title, "Scan to pay");
    let image = surface.image.expect("image bound");
    assert!(image.starts_with("data:image/png;base64,"));

    let save = surface.save_link.expect("save button shown");
    assert_eq!(save.label, "Save QR code");
    assert_eq!(save.download, DOWNLOAD_FILENAME);
    assert_eq!(save.href, image);
}

#[tokio::test]
async fn test_wechat_alipay_scenario() {
    let (page, _) = page(UA_WECHAT_ANDROID);
    page.trigger(ChannelId::Alipay).await.unwrap();

    let surface = page.dialog().surface().await;
    assert_eq!(surface.title, WECHAT_TITLE);
    assert!(!surface.close_visible);
    assert!(surface.open_in_browser_visible);
    assert!(surface.save_link.is_none());
}

#[tokio::test]
async fn test_wechat_hides_close_for_every_channel() {
    for ua in [UA_WECHAT_ANDROID, UA_WECHAT_IOS] {
        let (page, _) = page(ua);
        for id in ChannelId::ALL {
            page.trigger(id).await.unwrap();
            let surface = page.dialog().surface().await;
            assert!(!surface.close_visible, "{} {}", id, ua);
            assert!(surface.open_in_browser_visible, "{} {}", id, ua);
        }
    }
}

#[tokio::test]
async fn test_qq_variant_regardless_of_os() {
    for ua in [UA_QQ_ANDROID, UA_QQ_IOS] {
        let (page, _) = page(ua);
        assert_eq!(page.classification().browser_family, BrowserFamily::QQ);
        for id in ChannelId::ALL {
            let outcome = page.trigger(id).await.unwrap();
            assert_eq!(outcome, OpenOutcome::Shown(PresentationVariant::QQ));
            let surface = page.dialog().surface().await;
            assert!(surface.close_visible);
            assert!(surface.save_link.is_none());
            assert!(!surface.open_in_browser_visible);
        }
    }
}

#[tokio::test]
async fn test_restricted_browser_shows_other_title() {
    let (page, _) = page(UA_UC_ANDROID);
    page.trigger(ChannelId::Alipay).await.unwrap();

    let surface = page.dialog().surface().await;
    assert_eq!(surface.title, "Open in browser to pay");
    assert!(surface.close_visible);
    assert!(surface.save_link.is_none());
    assert!(page.dialog().download().await.is_none());
}

#[tokio::test]
async fn test_ios_safari_wechatpay_offers_app_switch() {
    let (page, navigator) = page(UA_SAFARI_IOS);
    let outcome = page.trigger(ChannelId::Wechatpay).await.unwrap();
    assert_eq!(outcome, OpenOutcome::Shown(PresentationVariant::Restricted));

    let link = page.dialog().surface().await.app_switch.unwrap();
    assert_eq!(link.href, WECHAT_SCAN_SCHEME);
    assert_eq!(link.label, "打开微信扫一扫");
    assert!(navigator.history().is_empty());

    // 下一个渠道整体替换绑定
    page.trigger(ChannelId::Tenpay).await.unwrap();
    let link = page.dialog().surface().await.app_switch.unwrap();
    assert_eq!(link.href, QQ_SCAN_SCHEME);

    page.trigger(ChannelId::Alipay).await.unwrap();
    assert!(page.dialog().surface().await.app_switch.is_none());
}

#[tokio::test]
async fn test_unconfigured_channel_is_rejected() {
    let mut config = full_config();
    config.tenpay = None;
    let (page, _) = page_with(&config, UA_CHROME_DESKTOP);

    let err = page.trigger(ChannelId::Tenpay).await.unwrap_err();
    assert!(matches!(err, DialogError::ChannelNotConfigured(ChannelId::Tenpay)));
    assert!(!page.dialog().surface().await.container_visible);
}

#[tokio::test]
async fn test_close_twice_is_noop() {
    let (page, _) = page(UA_CHROME_DESKTOP);
    page.trigger(ChannelId::Alipay).await.unwrap();

    assert!(page.close().await);
    assert!(!page.close().await);
    assert!(!page.close().await);

    let surface = page.dialog().surface().await;
    assert!(!surface.container_visible);
    assert!(surface.image.is_none());
}

#[tokio::test]
async fn test_on_load_instant_open() {
    let (page, navigator) = page(UA_CHROME_DESKTOP);
    let outcome = page.on_load("?open=true").await;

    assert_eq!(outcome.instant_open.as_deref(), Some("alipay://abc"));
    assert_eq!(navigator.history(), vec!["alipay://abc".to_string()]);
    assert!(outcome.qq_tip.is_none());
    assert!(outcome.auto_opened.is_none());
    assert!(!page.dialog().surface().await.container_visible);
}

#[tokio::test]
async fn test_on_load_instant_open_requires_alipay() {
    let mut config = full_config();
    config.alipay = None;
    let (page, navigator) = page_with(&config, UA_CHROME_DESKTOP);

    let outcome = page.on_load("open=true").await;
    assert!(outcome.instant_open.is_none());
    assert!(navigator.history().is_empty());
}

#[tokio::test]
async fn test_on_load_in_qq_shows_tip() {
    let (page, _) = page(UA_QQ_ANDROID);
    let outcome = page.on_load("").await;
    assert_eq!(outcome.qq_tip.as_deref(), Some(DEFAULT_QQ_TIP));
    assert!(outcome.auto_opened.is_none());
}

#[tokio::test]
async fn test_on_load_in_wechat_opens_wechatpay() {
    let (page, navigator) = page(UA_WECHAT_IOS);
    let outcome = page.on_load("").await;

    assert_eq!(outcome.auto_opened, Some(ChannelId::Wechatpay));
    assert!(navigator.history().is_empty());

    let surface = page.dialog().surface().await;
    assert!(surface.container_visible);
    assert_eq!(surface.title, WECHAT_TITLE);
    assert!(!surface.close_visible);
    // 已在微信内,不显示"打开微信扫一扫"
    assert!(surface.app_switch.is_none());
}

#[tokio::test]
async fn test_on_load_in_wechat_without_wechatpay() {
    let mut config = full_config();
    config.wechatpay = None;
    let (page, _) = page_with(&config, UA_WECHAT_ANDROID);

    let outcome = page.on_load("").await;
    assert!(outcome.auto_opened.is_none());
    assert!(!page.dialog().surface().await.container_visible);
}

#[tokio::test]
async fn test_failing_logo_matches_unbranded_image() {
    let (plain_page, _) = page(UA_CHROME_DESKTOP);
    plain_page.trigger(ChannelId::Alipay).await.unwrap();
    let plain = plain_page.dialog().surface().await.image;
    let plain_events = plain_page.dialog().events().await;
    assert!(plain_events
        .iter()
        .all(|e| e.event_type != DialogEventType::LogoDegraded));

    let mut config = full_config();
    config.qrlogo = Some("https://cdn.invalid/logo.png".to_string());
    let (branded_page, _) = page_with(&config, UA_CHROME_DESKTOP);
    branded_page.trigger(ChannelId::Alipay).await.unwrap();
    let degraded = branded_page.dialog().surface().await.image;

    assert!(plain.is_some());
    assert_eq!(plain, degraded);
    assert!(branded_page
        .dialog()
        .events()
        .await
        .iter()
        .any(|e| e.event_type == DialogEventType::LogoDegraded));
}

#[tokio::test]
async fn test_channel_without_payload_cannot_open() {
    let mut config = full_config();
    if let Some(alipay) = config.alipay.as_mut() {
        alipay.url = None;
    }
    let (page, navigator) = page_with(&config, UA_CHROME_DESKTOP);

    let err = page.trigger(ChannelId::Alipay).await.unwrap_err();
    assert!(matches!(err, DialogError::MissingPayload(ChannelId::Alipay)));
    // 深链仍然是尽力而为地发出
    assert_eq!(navigator.history(), vec!["alipay://abc".to_string()]);
    assert!(!page.dialog().surface().await.container_visible);
}
