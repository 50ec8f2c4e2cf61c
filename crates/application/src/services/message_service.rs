use std::sync::Arc;

use domain::{Message, MessageRepository, NewMessage};

use crate::error::ApplicationError;

pub struct MessageServiceDependencies {
    pub message_repository: Arc<dyn MessageRepository>,
}

/// 消息用例。输入校验在 HTTP 层完成，这里按原样持久化。
pub struct MessageService {
    deps: MessageServiceDependencies,
}

impl MessageService {
    pub fn new(deps: MessageServiceDependencies) -> Self {
        Self { deps }
    }

    pub async fn create(&self, message: NewMessage) -> Result<Message, ApplicationError> {
        self.deps
            .message_repository
            .create(message)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "failed to save message");
                ApplicationError::persistence("Error saving message", err)
            })
    }

    /// 按时间升序返回全部消息；存储失败时降级为空列表。
    pub async fn list_all(&self) -> Vec<Message> {
        match self.deps.message_repository.list_all().await {
            Ok(mut messages) => {
                // 稳定排序，相同时间保持存储返回的顺序
                messages.sort_by(|a, b| a.msg_date_time.cmp(&b.msg_date_time));
                messages
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to list messages, returning empty list");
                Vec::new()
            }
        }
    }
}
