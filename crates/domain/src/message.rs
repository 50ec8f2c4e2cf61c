use crate::value_objects::{MessageContent, MessageId, SenderName, Timestamp};

/// 已持久化的聊天消息，创建后不可变。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub msg: MessageContent,
    pub msg_from: SenderName,
    pub msg_date_time: Timestamp,
}

/// 待插入的消息，`id` 由存储层分配。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub msg: MessageContent,
    pub msg_from: SenderName,
    pub msg_date_time: Timestamp,
}

impl NewMessage {
    pub fn into_message(self, id: MessageId) -> Message {
        Message {
            id,
            msg: self.msg,
            msg_from: self.msg_from,
            msg_date_time: self.msg_date_time,
        }
    }
}
