use std::sync::Arc;

use application::{MessageBroadcaster, MessageService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub message_service: Arc<MessageService>,
    pub broadcaster: Arc<dyn MessageBroadcaster>,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        message_service: Arc<MessageService>,
        broadcaster: Arc<dyn MessageBroadcaster>,
    ) -> Self {
        Self {
            user_service,
            message_service,
            broadcaster,
        }
    }
}
