//! 应用层实现。
//!
//! 这里提供围绕领域模型的用例服务，把存储层错误转换为调用方可区分的错误类型，
//! 并抽象外部适配器（例如密码哈希、消息广播、时钟）。

pub mod broadcaster;
pub mod clock;
pub mod error;
pub mod password;
pub mod services;

pub use broadcaster::{
    BroadcastError, BroadcastEvent, MessageBroadcaster, MessageStream, MESSAGE_UPDATE_EVENT,
};
pub use clock::{Clock, SystemClock};
pub use error::{ApplicationError, ApplicationResult};
pub use password::{PasswordHasher, PasswordHasherError};
pub use services::{
    Credentials, MessageService, MessageServiceDependencies, UserChanges, UserService,
    UserServiceDependencies,
};
