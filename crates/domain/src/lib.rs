//! 聊天后端核心领域模型
//!
//! 包含用户、消息实体，经过验证的值对象，以及存储层需要实现的仓储接口。

pub mod errors;
pub mod message;
pub mod repository;
pub mod user;
pub mod value_objects;

// 重新导出常用类型
pub use errors::*;
pub use message::{Message, NewMessage};
pub use repository::{MessageRepository, RepositoryResult, UserRepository};
pub use user::{NewUser, SafeUser, User, UserUpdate};
pub use value_objects::*;

#[cfg(feature = "testing")]
pub use repository::{MockMessageRepository, MockUserRepository};
