use domain::RepositoryError;
use thiserror::Error;

use crate::password::PasswordHasherError;

/// 服务层返回给调用方的错误。
///
/// 显示文本即对外的错误信息，HTTP 层只按变体选择状态码。
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("User not found")]
    NotFound,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Username already exists")]
    DuplicateUsername,
    #[error("{operation}")]
    Persistence {
        operation: &'static str,
        #[source]
        source: RepositoryError,
    },
    #[error("Error processing password")]
    Password(#[from] PasswordHasherError),
}

impl ApplicationError {
    /// 创建存储失败错误，`operation` 会作为对外错误信息
    pub fn persistence(operation: &'static str, source: RepositoryError) -> Self {
        ApplicationError::Persistence { operation, source }
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
