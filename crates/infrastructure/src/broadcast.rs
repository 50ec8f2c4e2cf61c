use application::{BroadcastError, BroadcastEvent, MessageBroadcaster, MessageStream};
use async_trait::async_trait;
use tokio::sync::broadcast;

/// 进程内广播，所有 WebSocket 连接共享同一个发送端。
#[derive(Clone)]
pub struct LocalMessageBroadcaster {
    sender: broadcast::Sender<BroadcastEvent>,
}

impl LocalMessageBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[async_trait]
impl MessageBroadcaster for LocalMessageBroadcaster {
    async fn broadcast(&self, event: BroadcastEvent) -> Result<(), BroadcastError> {
        // 没有订阅者时 send 会报错，这里视为成功
        if self.sender.receiver_count() == 0 {
            return Ok(());
        }
        self.sender
            .send(event)
            .map_err(|err| BroadcastError::failed(err.to_string()))?;
        Ok(())
    }

    fn subscribe(&self) -> MessageStream {
        MessageStream::new(self.sender.subscribe())
    }
}
