//! 存储接口定义
//!
//! 领域层只定义接口，具体的 Postgres / 内存实现位于基础设施层，
//! 通过 `Arc<dyn ...>` 注入到应用服务中。

use async_trait::async_trait;

use crate::errors::RepositoryError;
use crate::message::{Message, NewMessage};
use crate::user::{NewUser, User, UserUpdate};

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// 用户存储，以用户名为唯一键。
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 插入新用户；用户名已存在时返回 `RepositoryError::Conflict`
    async fn create(&self, user: NewUser) -> RepositoryResult<User>;

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;

    /// 合并部分字段并返回更新后的记录，用户不存在时返回 `None`
    async fn update_by_username(
        &self,
        username: &str,
        update: UserUpdate,
    ) -> RepositoryResult<Option<User>>;

    /// 删除并返回被删除的记录，用户不存在时返回 `None`
    async fn delete_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
}

/// 消息存储。
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: NewMessage) -> RepositoryResult<Message>;

    /// 按 `msg_date_time` 升序返回全部消息
    async fn list_all(&self) -> RepositoryResult<Vec<Message>>;
}
