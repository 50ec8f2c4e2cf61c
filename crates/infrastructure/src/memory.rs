//! 内存存储，用于本地开发和测试，进程退出即丢失。

use async_trait::async_trait;
use domain::{
    Message, MessageId, MessageRepository, NewMessage, NewUser, RepositoryError,
    RepositoryResult, User, UserId, UserRepository, UserUpdate,
};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> RepositoryResult<User> {
        let mut guard = self.users.write().await;
        if guard
            .iter()
            .any(|existing| existing.username == user.username)
        {
            return Err(RepositoryError::Conflict);
        }

        let stored = User {
            id: UserId::from(Uuid::new_v4()),
            username: user.username,
            password: user.password,
            date_joined: user.date_joined,
        };
        guard.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let guard = self.users.read().await;
        Ok(guard
            .iter()
            .find(|user| user.username.as_str() == username)
            .cloned())
    }

    async fn update_by_username(
        &self,
        username: &str,
        update: UserUpdate,
    ) -> RepositoryResult<Option<User>> {
        let mut guard = self.users.write().await;
        let Some(user) = guard
            .iter_mut()
            .find(|user| user.username.as_str() == username)
        else {
            return Ok(None);
        };
        update.apply_to(user);
        Ok(Some(user.clone()))
    }

    async fn delete_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let mut guard = self.users.write().await;
        let position = guard
            .iter()
            .position(|user| user.username.as_str() == username);
        Ok(position.map(|index| guard.remove(index)))
    }
}

#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: RwLock<Vec<Message>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create(&self, message: NewMessage) -> RepositoryResult<Message> {
        let stored = message.into_message(MessageId::from(Uuid::new_v4()));
        self.messages.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Message>> {
        let mut messages = self.messages.read().await.clone();
        messages.sort_by(|a, b| a.msg_date_time.cmp(&b.msg_date_time));
        Ok(messages)
    }
}
