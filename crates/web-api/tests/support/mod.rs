#![allow(dead_code)]

use std::sync::Arc;

use application::{
    BroadcastError, BroadcastEvent, MessageBroadcaster, MessageService,
    MessageServiceDependencies, MessageStream, SystemClock, UserService, UserServiceDependencies,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use domain::{
    Message, MessageRepository, NewMessage, NewUser, RepositoryError, RepositoryResult, User,
    UserRepository, UserUpdate,
};
use infrastructure::{
    InMemoryMessageRepository, InMemoryUserRepository, LocalMessageBroadcaster,
    PlaintextPasswordHasher,
};
use serde_json::Value;
use tokio::sync::broadcast;
use tower::ServiceExt;
use web_api::{router, AppState};

pub struct TestApp {
    pub router: Router,
    pub broadcaster: Arc<LocalMessageBroadcaster>,
    pub messages: Arc<InMemoryMessageRepository>,
}

pub fn build_app() -> TestApp {
    let users = Arc::new(InMemoryUserRepository::new());
    let messages = Arc::new(InMemoryMessageRepository::new());
    let broadcaster = Arc::new(LocalMessageBroadcaster::new(16));

    let router = build_router(users, messages.clone(), broadcaster.clone());
    TestApp {
        router,
        broadcaster,
        messages,
    }
}

pub fn build_router(
    user_repository: Arc<dyn UserRepository>,
    message_repository: Arc<dyn MessageRepository>,
    broadcaster: Arc<dyn MessageBroadcaster>,
) -> Router {
    let user_service = UserService::new(UserServiceDependencies {
        user_repository,
        password_hasher: Arc::new(PlaintextPasswordHasher),
        clock: Arc::new(SystemClock),
    });
    let message_service = MessageService::new(MessageServiceDependencies { message_repository });

    router(AppState::new(
        Arc::new(user_service),
        Arc::new(message_service),
        broadcaster,
    ))
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should succeed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

/// 所有操作都返回存储错误
pub struct FailingStore;

#[async_trait]
impl UserRepository for FailingStore {
    async fn create(&self, _user: NewUser) -> RepositoryResult<User> {
        Err(RepositoryError::storage("store unavailable"))
    }

    async fn find_by_username(&self, _username: &str) -> RepositoryResult<Option<User>> {
        Err(RepositoryError::storage("store unavailable"))
    }

    async fn update_by_username(
        &self,
        _username: &str,
        _update: UserUpdate,
    ) -> RepositoryResult<Option<User>> {
        Err(RepositoryError::storage("store unavailable"))
    }

    async fn delete_by_username(&self, _username: &str) -> RepositoryResult<Option<User>> {
        Err(RepositoryError::storage("store unavailable"))
    }
}

#[async_trait]
impl MessageRepository for FailingStore {
    async fn create(&self, _message: NewMessage) -> RepositoryResult<Message> {
        Err(RepositoryError::storage("store unavailable"))
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Message>> {
        Err(RepositoryError::storage("store unavailable"))
    }
}

/// 发布总是失败的广播器
pub struct FailingBroadcaster {
    sender: broadcast::Sender<BroadcastEvent>,
}

impl FailingBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self { sender }
    }
}

#[async_trait]
impl MessageBroadcaster for FailingBroadcaster {
    async fn broadcast(&self, _event: BroadcastEvent) -> Result<(), BroadcastError> {
        Err(BroadcastError::failed("broadcaster offline"))
    }

    fn subscribe(&self) -> MessageStream {
        MessageStream::new(self.sender.subscribe())
    }
}
