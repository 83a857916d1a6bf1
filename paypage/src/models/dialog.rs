use image::RgbaImage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::channel::ChannelId;
use super::classification::PresentationVariant;

/// 下载文件名 (所有渠道共用)
pub const DOWNLOAD_FILENAME: &str = "qrcode.png";

/// 合成后的二维码图片
///
/// 每次打开弹窗都重新生成,不跨渠道缓存。
#[derive(Debug, Clone)]
pub struct RenderedImage {
    /// 位图句柄
    pub bitmap: RgbaImage,

    /// PNG 编码字节
    pub png: Vec<u8>,

    /// `data:image/png;base64,...`,可直接用于显示和下载
    pub data_url: String,

    /// 是否已叠加Logo
    pub branded: bool,
}

/// 保存二维码按钮
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveLink {
    pub label: String,
    pub href: String,
    pub download: String,
}

/// 唤起原生应用的按钮
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSwitchLink {
    pub href: String,
    pub label: String,
}

/// 弹窗显示面 (DOM 的等价物)
///
/// 只有弹窗控制器可以修改。每次 `open` 整体替换所有绑定,
/// 不会残留上一个渠道的图片或下载链接。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogSurface {
    /// 弹窗容器是否可见
    pub container_visible: bool,

    /// 标题文本
    pub title: String,

    /// 当前二维码 (data URL)
    pub image: Option<String>,

    pub close_visible: bool,

    pub save_link: Option<SaveLink>,

    /// 微信中"在浏览器中打开"提示
    pub open_in_browser_visible: bool,

    pub app_switch: Option<AppSwitchLink>,

    /// 编码失败时的错误文本
    pub error: Option<String>,
}

impl DialogSurface {
    /// 清空显示面并隐藏容器
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// 弹窗状态
///
/// 状态转换:
/// Closed -> Opening -> Open
///    ^         |          |
///    |         +-> Failed |
///    +-------------------+---- close()
///
/// 新的 `open` 会覆盖任何状态。
#[derive(Debug, Clone, Default)]
pub enum DialogState {
    #[default]
    Closed,

    /// 合成进行中,只有携带该 `request_id` 的结果会被应用
    Opening { request_id: Uuid, channel: ChannelId },

    Open {
        channel: ChannelId,
        variant: PresentationVariant,
        image: RenderedImage,
    },

    /// 编码失败,显示错误状态
    Failed { channel: ChannelId, reason: String },
}

impl DialogState {
    pub fn is_closed(&self) -> bool {
        matches!(self, DialogState::Closed)
    }

    /// 当前进行中的请求
    pub fn pending_request(&self) -> Option<Uuid> {
        match self {
            DialogState::Opening { request_id, .. } => Some(*request_id),
            _ => None,
        }
    }

    pub fn channel(&self) -> Option<ChannelId> {
        match self {
            DialogState::Closed => None,
            DialogState::Opening { channel, .. }
            | DialogState::Open { channel, .. }
            | DialogState::Failed { channel, .. } => Some(*channel),
        }
    }

    pub fn variant(&self) -> Option<PresentationVariant> {
        match self {
            DialogState::Open { variant, .. } => Some(*variant),
            _ => None,
        }
    }
}
