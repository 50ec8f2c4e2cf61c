use std::sync::Arc;

use application::{MessageBroadcaster, PasswordHasher};
use config::{AppConfig, PasswordScheme, StorageBackend};
use domain::{MessageRepository, UserRepository};
use thiserror::Error;

use crate::{
    broadcast::LocalMessageBroadcaster,
    memory::{InMemoryMessageRepository, InMemoryUserRepository},
    migrations::MIGRATOR,
    password::{BcryptPasswordHasher, PlaintextPasswordHasher},
    repository::{create_pg_pool, PgStorage},
};

#[derive(Debug, Error)]
pub enum InfrastructureError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// 按配置装配好的适配器集合
#[derive(Clone)]
pub struct Infrastructure {
    pub user_repository: Arc<dyn UserRepository>,
    pub message_repository: Arc<dyn MessageRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub broadcaster: Arc<LocalMessageBroadcaster>,
}

impl Infrastructure {
    /// Postgres 后端会先建立连接池并执行迁移
    pub async fn from_config(config: &AppConfig) -> Result<Self, InfrastructureError> {
        let (user_repository, message_repository): (
            Arc<dyn UserRepository>,
            Arc<dyn MessageRepository>,
        ) = match config.storage.backend {
            StorageBackend::Postgres => {
                let pool =
                    create_pg_pool(&config.database.url, config.database.max_connections).await?;
                MIGRATOR.run(&pool).await?;
                tracing::info!("database migrations applied");

                let storage = PgStorage::new(pool);
                let users: Arc<dyn UserRepository> = storage.user_repository;
                let messages: Arc<dyn MessageRepository> = storage.message_repository;
                (users, messages)
            }
            StorageBackend::Memory => {
                tracing::warn!("using in-memory storage, data is lost on shutdown");
                (
                    Arc::new(InMemoryUserRepository::new()),
                    Arc::new(InMemoryMessageRepository::new()),
                )
            }
        };

        Ok(Self {
            user_repository,
            message_repository,
            password_hasher: password_hasher(config),
            broadcaster: Arc::new(LocalMessageBroadcaster::new(config.broadcast.capacity)),
        })
    }

    pub fn broadcaster_trait(&self) -> Arc<dyn MessageBroadcaster> {
        self.broadcaster.clone()
    }
}

pub fn password_hasher(config: &AppConfig) -> Arc<dyn PasswordHasher> {
    match config.auth.password_scheme {
        PasswordScheme::Plaintext => Arc::new(PlaintextPasswordHasher),
        PasswordScheme::Bcrypt => Arc::new(BcryptPasswordHasher::new(config.auth.bcrypt_cost)),
    }
}
