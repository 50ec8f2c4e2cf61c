//! 用户服务单元测试
//!
//! 用 mockall 生成的仓储替身验证错误映射、密码剥离和部分更新。

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use domain::{
    MockUserRepository, Password, PasswordHash, RepositoryError, User, UserId, UserUpdate,
    Username,
};
use uuid::Uuid;

use crate::{
    clock::Clock,
    error::ApplicationError,
    password::{PasswordHasher, PasswordHasherError},
    services::{Credentials, UserChanges, UserService, UserServiceDependencies},
};

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 明文比较的测试用哈希器
struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
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

fn date_joined() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 3, 0, 0, 0).unwrap()
}

fn stored_user(username: &str, password: &str) -> User {
    User {
        id: UserId::from(Uuid::new_v4()),
        username: Username::parse(username).unwrap(),
        password: PasswordHash::new(password).unwrap(),
        date_joined: date_joined(),
    }
}

fn credentials(username: &str, password: &str) -> Credentials {
    Credentials {
        username: Username::parse(username).unwrap(),
        password: Password::parse(password).unwrap(),
    }
}

fn service(repository: MockUserRepository) -> UserService {
    UserService::new(UserServiceDependencies {
        user_repository: Arc::new(repository),
        password_hasher: Arc::new(PlainPasswordHasher),
        clock: Arc::new(FixedClock(date_joined())),
    })
}

#[tokio::test]
async fn register_returns_safe_user_with_clock_timestamp() {
    let mut repository = MockUserRepository::new();
    repository
        .expect_create()
        .withf(|user| {
            user.username.as_str() == "user1"
                && user.password.as_str() == "password"
                && user.date_joined == date_joined()
        })
        .times(1)
        .returning(|user| {
            Ok(User {
                id: UserId::from(Uuid::new_v4()),
                username: user.username,
                password: user.password,
                date_joined: user.date_joined,
            })
        });

    let safe = service(repository)
        .register(credentials("user1", "password"))
        .await
        .expect("register");

    assert_eq!(safe.username.as_str(), "user1");
    assert_eq!(safe.date_joined, date_joined());
    let json = serde_json::to_value(&safe).unwrap();
    assert!(json.get("password").is_none());
}

#[tokio::test]
async fn register_maps_store_conflict_to_duplicate_username() {
    let mut repository = MockUserRepository::new();
    repository
        .expect_create()
        .times(1)
        .returning(|_| Err(RepositoryError::Conflict));

    let result = service(repository)
        .register(credentials("user1", "password"))
        .await;

    assert!(matches!(result, Err(ApplicationError::DuplicateUsername)));
}

#[tokio::test]
async fn register_maps_other_store_failures_to_persistence() {
    let mut repository = MockUserRepository::new();
    repository
        .expect_create()
        .returning(|_| Err(RepositoryError::storage("connection reset")));

    let err = service(repository)
        .register(credentials("user1", "password"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Persistence { .. }));
    assert_eq!(err.to_string(), "Error when saving user");
}

#[tokio::test]
async fn authenticate_succeeds_with_matching_password() {
    let mut repository = MockUserRepository::new();
    repository
        .expect_find_by_username()
        .withf(|username: &str| username == "user1")
        .returning(|_| Ok(Some(stored_user("user1", "password"))));

    let safe = service(repository)
        .authenticate(credentials("user1", "password"))
        .await
        .expect("login");

    assert_eq!(safe.username.as_str(), "user1");
    assert_eq!(safe.date_joined, date_joined());
}

#[tokio::test]
async fn authenticate_unknown_user_and_wrong_password_are_indistinguishable() {
    let mut missing = MockUserRepository::new();
    missing
        .expect_find_by_username()
        .returning(|_| Ok(None));
    let missing_err = service(missing)
        .authenticate(credentials("user1", "password"))
        .await
        .unwrap_err();

    let mut mismatched = MockUserRepository::new();
    mismatched
        .expect_find_by_username()
        .returning(|_| Ok(Some(stored_user("user1", "differentPassword"))));
    let mismatch_err = service(mismatched)
        .authenticate(credentials("user1", "wrongPassword"))
        .await
        .unwrap_err();

    assert!(matches!(missing_err, ApplicationError::InvalidCredentials));
    assert!(matches!(mismatch_err, ApplicationError::InvalidCredentials));
    assert_eq!(missing_err.to_string(), "Invalid username or password");
    assert_eq!(missing_err.to_string(), mismatch_err.to_string());
}

#[tokio::test]
async fn authenticate_store_failure_is_persistence_error() {
    let mut repository = MockUserRepository::new();
    repository
        .expect_find_by_username()
        .returning(|_| Err(RepositoryError::storage("timeout")));

    let err = service(repository)
        .authenticate(credentials("user1", "password"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Error during login");
}

#[tokio::test]
async fn get_by_username_distinguishes_missing_from_store_failure() {
    let mut found = MockUserRepository::new();
    found
        .expect_find_by_username()
        .returning(|_| Ok(Some(stored_user("user1", "password"))));
    let safe = service(found).get_by_username("user1").await.unwrap();
    assert_eq!(safe.username.as_str(), "user1");

    let mut missing = MockUserRepository::new();
    missing.expect_find_by_username().returning(|_| Ok(None));
    let err = service(missing).get_by_username("ghost").await.unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound));
    assert_eq!(err.to_string(), "User not found");

    let mut failing = MockUserRepository::new();
    failing
        .expect_find_by_username()
        .returning(|_| Err(RepositoryError::storage("down")));
    let err = service(failing).get_by_username("user1").await.unwrap_err();
    assert!(matches!(err, ApplicationError::Persistence { .. }));
}

#[tokio::test]
async fn delete_returns_removed_user_or_not_found() {
    let mut repository = MockUserRepository::new();
    repository
        .expect_delete_by_username()
        .withf(|username: &str| username == "user1")
        .times(1)
        .returning(|_| Ok(Some(stored_user("user1", "password"))));
    let deleted = service(repository)
        .delete_by_username("user1")
        .await
        .unwrap();
    assert_eq!(deleted.username.as_str(), "user1");

    let mut missing = MockUserRepository::new();
    missing.expect_delete_by_username().returning(|_| Ok(None));
    let err = service(missing).delete_by_username("user1").await.unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound));
}

#[tokio::test]
async fn update_sends_only_the_password_field() {
    let mut repository = MockUserRepository::new();
    repository
        .expect_update_by_username()
        .withf(|username: &str, update: &UserUpdate| {
            username == "user1"
                && update
                    .password
                    .as_ref()
                    .is_some_and(|hash| hash.as_str() == "newPassword")
        })
        .times(1)
        .returning(|_, update| {
            let mut user = stored_user("user1", "password");
            update.apply_to(&mut user);
            Ok(Some(user))
        });

    let safe = service(repository)
        .update(
            "user1",
            UserChanges {
                password: Some(Password::parse("newPassword").unwrap()),
            },
        )
        .await
        .unwrap();

    assert_eq!(safe.username.as_str(), "user1");
    assert_eq!(safe.date_joined, date_joined());
}

#[tokio::test]
async fn update_missing_user_is_not_found() {
    let mut repository = MockUserRepository::new();
    repository
        .expect_update_by_username()
        .returning(|_, _| Ok(None));

    let err = service(repository)
        .update(
            "nonexistentuser",
            UserChanges {
                password: Some(Password::parse("newPassword").unwrap()),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::NotFound));
}
