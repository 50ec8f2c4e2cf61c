use std::sync::Arc;

use domain::{NewUser, Password, RepositoryError, SafeUser, UserRepository, UserUpdate, Username};

use crate::{clock::Clock, error::ApplicationError, password::PasswordHasher};

/// 注册与登录共用的已验证凭据
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: Username,
    pub password: Password,
}

/// 用户可修改的字段，`None` 表示不修改
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub password: Option<Password>,
}

pub struct UserServiceDependencies {
    pub user_repository: Arc<dyn UserRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub clock: Arc<dyn Clock>,
}

/// 用户账户用例。每个操作只访问存储一次，返回值一律是去掉密码的安全投影。
pub struct UserService {
    deps: UserServiceDependencies,
}

impl UserService {
    pub fn new(deps: UserServiceDependencies) -> Self {
        Self { deps }
    }

    /// 创建新用户。用户名唯一性完全依赖存储层的唯一约束，不做预查询。
    pub async fn register(&self, credentials: Credentials) -> Result<SafeUser, ApplicationError> {
        let password = self.deps.password_hasher.hash(&credentials.password).await?;
        let new_user = NewUser {
            username: credentials.username,
            password,
            date_joined: self.deps.clock.now(),
        };

        match self.deps.user_repository.create(new_user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, username = %user.username, "user registered");
                Ok(user.into_safe())
            }
            Err(RepositoryError::Conflict) => Err(ApplicationError::DuplicateUsername),
            Err(err) => {
                tracing::warn!(error = %err, "failed to save user");
                Err(ApplicationError::persistence("Error when saving user", err))
            }
        }
    }

    /// 校验用户名和密码。用户不存在与密码错误返回同一个错误。
    pub async fn authenticate(
        &self,
        credentials: Credentials,
    ) -> Result<SafeUser, ApplicationError> {
        let user = self
            .deps
            .user_repository
            .find_by_username(credentials.username.as_str())
            .await
            .map_err(|err| ApplicationError::persistence("Error during login", err))?
            .ok_or(ApplicationError::InvalidCredentials)?;

        let password_ok = self
            .deps
            .password_hasher
            .verify(&credentials.password, &user.password)
            .await?;
        if !password_ok {
            return Err(ApplicationError::InvalidCredentials);
        }

        Ok(user.into_safe())
    }

    pub async fn get_by_username(&self, username: &str) -> Result<SafeUser, ApplicationError> {
        self.deps
            .user_repository
            .find_by_username(username)
            .await
            .map_err(|err| ApplicationError::persistence("Error retrieving user", err))?
            .map(SafeUser::from)
            .ok_or(ApplicationError::NotFound)
    }

    pub async fn delete_by_username(&self, username: &str) -> Result<SafeUser, ApplicationError> {
        let deleted = self
            .deps
            .user_repository
            .delete_by_username(username)
            .await
            .map_err(|err| ApplicationError::persistence("Error deleting user", err))?
            .ok_or(ApplicationError::NotFound)?;

        tracing::info!(user_id = %deleted.id, "user deleted");
        Ok(deleted.into_safe())
    }

    /// 部分更新：只修改 `changes` 中给出的字段
    pub async fn update(
        &self,
        username: &str,
        changes: UserChanges,
    ) -> Result<SafeUser, ApplicationError> {
        let password = match changes.password {
            Some(password) => Some(self.deps.password_hasher.hash(&password).await?),
            None => None,
        };

        self.deps
            .user_repository
            .update_by_username(username, UserUpdate { password })
            .await
            .map_err(|err| ApplicationError::persistence("Error updating user", err))?
            .map(SafeUser::from)
            .ok_or(ApplicationError::NotFound)
    }
}
