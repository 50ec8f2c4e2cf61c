//! Web API 层。
//!
//! 提供 Axum 路由，校验请求体后委托给应用层的用户与消息服务，
//! 并通过 WebSocket 推送广播事件。

mod error;
mod message_routes;
mod routes;
mod state;
mod user_routes;
mod validation;
mod websocket;

pub use error::{ApiError, ErrorBody};
pub use routes::{cors_layer, router};
pub use state::AppState;
pub use validation::parse_instant;
