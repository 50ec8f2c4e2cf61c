pub mod broadcast;
pub mod builder;
pub mod memory;
pub mod migrations;
pub mod password;
pub mod repository;

pub use broadcast::LocalMessageBroadcaster;
pub use builder::{password_hasher, Infrastructure, InfrastructureError};
pub use memory::{InMemoryMessageRepository, InMemoryUserRepository};
pub use migrations::MIGRATOR;
pub use password::{BcryptPasswordHasher, PlaintextPasswordHasher};
pub use repository::{create_pg_pool, PgMessageRepository, PgStorage, PgUserRepository};
