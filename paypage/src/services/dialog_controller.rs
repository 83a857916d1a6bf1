//! 弹窗控制器
//!
//! 职责: 独占唯一的弹窗显示面,按设备分类选择呈现方式并绑定二维码。
//! 策略: 每次 `open` 生成新的请求ID,合成完成后只有仍是当前请求的结果会被应用,
//! 更早的结果直接丢弃,避免闪现上一个渠道的二维码。

use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{
    AppSwitchLink, DeviceClassification, DialogError, DialogEvent, DialogState, DialogSurface,
    PaymentChannel, PresentationVariant, RenderedImage, SaveLink, DOWNLOAD_FILENAME,
};
use crate::services::code_composer::{CodeImageComposer, LogoFetcher, LogoLoader};

/// `open` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "variant", rename_all = "snake_case")]
pub enum OpenOutcome {
    /// 已按该呈现方式显示
    Shown(PresentationVariant),

    /// 合成期间出现了更新的 `open` 或 `close`,结果已丢弃
    Superseded,
}

struct DialogInner {
    state: DialogState,
    surface: DialogSurface,
    events: Vec<DialogEvent>,
}

/// 弹窗控制器
///
/// 设备分类和Logo配置通过构造参数注入,会话期间不变。
pub struct DialogController<L = LogoFetcher> {
    composer: CodeImageComposer<L>,
    classification: DeviceClassification,
    logo: Option<String>,
    wechat_title: Option<String>,
    inner: Mutex<DialogInner>,
}

impl<L: LogoLoader> DialogController<L> {
    pub fn new(
        composer: CodeImageComposer<L>,
        classification: DeviceClassification,
        logo: Option<String>,
        wechat_title: Option<String>,
    ) -> Self {
        Self {
            composer,
            classification,
            logo,
            wechat_title,
            inner: Mutex::new(DialogInner {
                state: DialogState::Closed,
                surface: DialogSurface::default(),
                events: Vec::new(),
            }),
        }
    }

    pub fn classification(&self) -> DeviceClassification {
        self.classification
    }

    /// 打开弹窗
    ///
    /// 步骤: 显示容器 -> 合成二维码 -> 读取设备分类 -> 选择呈现方式 -> 绑定显示面
    ///
    /// # 参数
    /// - `channel`: 支付渠道
    /// - `app_switch`: 深链分发器给出的"去App扫码"按钮
    ///
    /// # 错误
    /// - `DialogError::MissingPayload`: 渠道没有二维码载荷,状态不变
    /// - `DialogError::Compose`: 编码失败,弹窗进入错误状态
    pub async fn open(
        &self,
        channel: &PaymentChannel,
        app_switch: Option<AppSwitchLink>,
    ) -> Result<OpenOutcome, DialogError> {
        let payload = channel.payload_url.as_deref().ok_or_else(|| {
            tracing::warn!(channel = %channel.id, "Channel has no payload, dialog not opened");
            DialogError::MissingPayload(channel.id)
        })?;

        let request_id = Uuid::new_v4();
        {
            let mut inner = self.inner.lock().await;
            if let Some(previous) = inner.state.pending_request() {
                tracing::debug!(%previous, %request_id, "Pending open request superseded");
            }
            inner.state = DialogState::Opening {
                request_id,
                channel: channel.id,
            };
            inner.surface = DialogSurface {
                container_visible: true,
                ..Default::default()
            };
            inner.events.push(DialogEvent::opening(channel.id, request_id));
        }

        let composed = self.composer.compose(payload, self.logo.as_deref()).await;
        let variant = PresentationVariant::select(&self.classification);

        let mut inner = self.inner.lock().await;
        if inner.state.pending_request() != Some(request_id) {
            let request = request_id.to_string();
            crate::log_event!(
                "OpenSuperseded",
                channel = channel.id.as_str(),
                request_id = request.as_str(),
            );
            inner.events.push(DialogEvent::superseded(channel.id, request_id));
            return Ok(OpenOutcome::Superseded);
        }

        let image = match composed {
            Ok(image) => image,
            Err(e) => {
                let reason = e.to_string();
                crate::log_error!(
                    "EncodeFailed",
                    channel = channel.id.as_str(),
                    error = reason.as_str(),
                );
                inner.surface = DialogSurface {
                    container_visible: true,
                    close_visible: true,
                    error: Some(reason.clone()),
                    ..Default::default()
                };
                inner.state = DialogState::Failed {
                    channel: channel.id,
                    reason: reason.clone(),
                };
                inner
                    .events
                    .push(DialogEvent::encode_failed(channel.id, request_id, reason));
                return Err(e.into());
            }
        };

        if self.logo.is_some() && !image.branded {
            inner
                .events
                .push(DialogEvent::logo_degraded(channel.id, request_id));
        }

        inner.surface = self.present(channel, variant, &image, app_switch);
        inner.state = DialogState::Open {
            channel: channel.id,
            variant,
            image,
        };
        inner
            .events
            .push(DialogEvent::opened(channel.id, request_id, variant));

        let variant_name = format!("{:?}", variant);
        crate::log_event!(
            "DialogOpened",
            channel = channel.id.as_str(),
            variant = variant_name.as_str(),
        );

        Ok(OpenOutcome::Shown(variant))
    }

    /// 关闭弹窗
    ///
    /// 幂等: 对已关闭的弹窗调用不做任何事。进行中的 `open` 结果会被丢弃。
    /// 返回是否发生了状态变化。
    pub async fn close(&self) -> bool {
        let mut inner = self.inner.lock().await;
        if inner.state.is_closed() && !inner.surface.container_visible {
            return false;
        }

        let channel = inner.state.channel();
        inner.surface.clear();
        inner.state = DialogState::Closed;
        inner.events.push(DialogEvent::closed(channel));

        crate::log_event!(
            "DialogClosed",
            channel = channel.map(|c| c.as_str()).unwrap_or("none"),
        );

        true
    }

    /// 当前显示面的快照
    pub async fn surface(&self) -> DialogSurface {
        self.inner.lock().await.surface.clone()
    }

    pub async fn is_open(&self) -> bool {
        matches!(self.inner.lock().await.state, DialogState::Open { .. })
    }

    pub async fn variant(&self) -> Option<PresentationVariant> {
        self.inner.lock().await.state.variant()
    }

    pub async fn events(&self) -> Vec<DialogEvent> {
        self.inner.lock().await.events.clone()
    }

    /// 可下载的 `qrcode.png` (仅通用浏览器提供)
    pub async fn download(&self) -> Option<(String, Vec<u8>)> {
        match &self.inner.lock().await.state {
            DialogState::Open {
                variant: PresentationVariant::Generic,
                image,
                ..
            } => Some((DOWNLOAD_FILENAME.to_string(), image.png.clone())),
            _ => None,
        }
    }

    /// 按呈现方式生成完整的显示面
    fn present(
        &self,
        channel: &PaymentChannel,
        variant: PresentationVariant,
        image: &RenderedImage,
        app_switch: Option<AppSwitchLink>,
    ) -> DialogSurface {
        let title = match variant {
            PresentationVariant::Generic => channel.title.clone(),
            PresentationVariant::WeChat => self
                .wechat_title
                .clone()
                .unwrap_or_else(|| channel.other_title.clone()),
            PresentationVariant::QQ | PresentationVariant::Restricted => {
                channel.other_title.clone()
            }
        };

        let save_link = variant.offers_download().then(|| SaveLink {
            label: channel.save_text.clone(),
            href: image.data_url.clone(),
            download: DOWNLOAD_FILENAME.to_string(),
        });

        DialogSurface {
            container_visible: true,
            title,
            image: Some(image.data_url.clone()),
            close_visible: variant.shows_close(),
            save_link,
            open_in_browser_visible: variant.shows_open_in_browser(),
            app_switch,
            error: None,
        }
    }
}
