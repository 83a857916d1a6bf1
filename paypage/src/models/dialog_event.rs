use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::channel::ChannelId;
use super::classification::PresentationVariant;

/// 弹窗事件 (用于日志追踪和命令行报告)
///
/// 记录一次页面会话中弹窗的关键节点,按发生顺序追加。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogEvent {
    pub event_type: DialogEventType,

    pub timestamp: DateTime<Utc>,

    /// 相关渠道 (关闭事件可能没有)
    pub channel: Option<ChannelId>,

    /// 打开请求ID
    pub request_id: Option<Uuid>,

    /// 额外详情 (JSON格式,灵活扩展)
    pub details: Value,
}

/// 弹窗事件类型
///
/// - 成功路径: Opening -> Opened
/// - 降级路径: LogoDegraded (不影响打开)
/// - 失败路径: EncodeFailed
/// - 覆盖路径: Superseded (结果被更新的请求取代)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogEventType {
    Opening,
    Opened,
    Superseded,
    LogoDegraded,
    EncodeFailed,
    Closed,
}

impl DialogEvent {
    pub fn new(
        event_type: DialogEventType,
        channel: Option<ChannelId>,
        request_id: Option<Uuid>,
        details: Value,
    ) -> Self {
        Self {
            event_type,
            timestamp: Utc::now(),
            channel,
            request_id,
            details,
        }
    }

    pub fn opening(channel: ChannelId, request_id: Uuid) -> Self {
        Self::new(
            DialogEventType::Opening,
            Some(channel),
            Some(request_id),
            Value::Null,
        )
    }

    pub fn opened(channel: ChannelId, request_id: Uuid, variant: PresentationVariant) -> Self {
        Self::new(
            DialogEventType::Opened,
            Some(channel),
            Some(request_id),
            serde_json::json!({ "variant": variant }),
        )
    }

    pub fn superseded(channel: ChannelId, request_id: Uuid) -> Self {
        Self::new(
            DialogEventType::Superseded,
            Some(channel),
            Some(request_id),
            Value::Null,
        )
    }

    pub fn logo_degraded(channel: ChannelId, request_id: Uuid) -> Self {
        Self::new(
            DialogEventType::LogoDegraded,
            Some(channel),
            Some(request_id),
            Value::Null,
        )
    }

    pub fn encode_failed(channel: ChannelId, request_id: Uuid, reason: String) -> Self {
        Self::new(
            DialogEventType::EncodeFailed,
            Some(channel),
            Some(request_id),
            serde_json::json!({ "reason": reason }),
        )
    }

    pub fn closed(channel: Option<ChannelId>) -> Self {
        Self::new(DialogEventType::Closed, channel, None, Value::Null)
    }
}
