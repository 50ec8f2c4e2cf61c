use sqlx::migrate::Migrator;

/// 启动时执行的内嵌迁移
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
