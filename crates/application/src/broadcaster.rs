use async_trait::async_trait;
use domain::Message;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast::{self, error::RecvError};

/// 新消息写入成功后广播的事件名
pub const MESSAGE_UPDATE_EVENT: &str = "messageUpdate";

/// 推送给所有订阅者的事件：事件名 + 任意 JSON 负载。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastEvent {
    pub event: String,
    pub payload: serde_json::Value,
}

impl BroadcastEvent {
    pub fn new(event: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            event: event.into(),
            payload,
        }
    }

    /// `messageUpdate` 事件，负载为 `{ "msg": <message> }`
    pub fn message_update(message: &Message) -> Self {
        Self::new(MESSAGE_UPDATE_EVENT, serde_json::json!({ "msg": message }))
    }
}

#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("broadcast failed: {0}")]
    Failed(String),
}

impl BroadcastError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// 实时广播器：没有确认通道，也不保证送达。
#[async_trait]
pub trait MessageBroadcaster: Send + Sync {
    async fn broadcast(&self, event: BroadcastEvent) -> Result<(), BroadcastError>;

    /// 订阅此后发布的全部事件
    fn subscribe(&self) -> MessageStream;
}

/// 单个订阅者的事件流
pub struct MessageStream {
    receiver: broadcast::Receiver<BroadcastEvent>,
}

impl MessageStream {
    pub fn new(receiver: broadcast::Receiver<BroadcastEvent>) -> Self {
        Self { receiver }
    }

    /// 等待下一个事件；广播端关闭后返回 `None`。
    /// 订阅者落后时跳过丢失的事件继续接收。
    pub async fn recv(&mut self) -> Option<BroadcastEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "subscriber lagged behind, events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
