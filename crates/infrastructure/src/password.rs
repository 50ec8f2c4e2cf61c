use application::{PasswordHasher, PasswordHasherError};
use async_trait::async_trait;
use bcrypt::{hash, verify, DEFAULT_COST};
use domain::{Password, PasswordHash};

/// 原样存储密码，登录时逐字比较。与已有明文数据保持兼容。
#[derive(Clone, Default)]
pub struct PlaintextPasswordHasher;

#[async_trait]
impl PasswordHasher for PlaintextPasswordHasher {
    async fn hash(&self, plaintext: &Password) -> Result<PasswordHash, PasswordHasherError> {
        PasswordHash::new(plaintext.as_str())
            .map_err(|err| PasswordHasherError::hash_error(err.to_string()))
    }

    async fn verify(
        &self,
        plaintext: &Password,
        stored: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        Ok(plaintext.as_str() == stored.as_str())
    }
}

#[derive(Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: Option<u32>) -> Self {
        Self {
            cost: cost.unwrap_or(DEFAULT_COST),
        }
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, plaintext: &Password) -> Result<PasswordHash, PasswordHasherError> {
        let cost = self.cost;
        let plaintext = plaintext.as_str().to_owned();
        let hashed = tokio::task::spawn_blocking(move || hash(plaintext, cost))
            .await
            .map_err(|err| PasswordHasherError::hash_error(err.to_string()))
            .and_then(|res| res.map_err(|err| PasswordHasherError::hash_error(err.to_string())))?;

        PasswordHash::new(hashed).map_err(|err| PasswordHasherError::hash_error(err.to_string()))
    }

    async fn verify(
        &self,
        plaintext: &Password,
        stored: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let plaintext = plaintext.as_str().to_owned();
        let stored = stored.as_str().to_owned();
        let result = tokio::task::spawn_blocking(move || verify(plaintext, &stored))
            .await
            .map_err(|err| PasswordHasherError::verify_error(err.to_string()))?;

        // 库中残留的非 bcrypt 格式值按不匹配处理
        match result {
            Ok(matched) => Ok(matched),
            Err(bcrypt::BcryptError::InvalidHash(_))
            | Err(bcrypt::BcryptError::InvalidPrefix(_)) => Ok(false),
            Err(err) => Err(PasswordHasherError::verify_error(err.to_string())),
        }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(Some(DEFAULT_COST))
    }
}
