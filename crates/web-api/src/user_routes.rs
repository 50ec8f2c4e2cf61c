use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, patch, post, MethodRouter},
    Json, Router,
};
use application::UserChanges;
use domain::SafeUser;

use crate::{
    error::ApiError,
    state::AppState,
    validation::{self, UserPayload},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user).merge(named_user("register")))
        .route("/login", post(login_user).merge(named_user("login")))
        .route(
            "/reset-password",
            patch(reset_password).merge(named_user("reset-password")),
        )
        .route("/{username}", get(get_user).delete(delete_user))
}

// 静态路由优先于 `/{username}`，同名用户的查询和删除在这里补上
fn named_user(username: &'static str) -> MethodRouter<AppState> {
    get(move |State(state): State<AppState>| async move { find_user(&state, username).await })
        .delete(move |State(state): State<AppState>| async move {
            remove_user(&state, username).await
        })
}

async fn register_user(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<SafeUser>), ApiError> {
    let credentials = validation::credentials(payload)?;
    let user = state.user_service.register(credentials).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

async fn login_user(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Json<SafeUser>, ApiError> {
    let credentials = validation::credentials(payload)?;
    let user = state.user_service.authenticate(credentials).await?;

    Ok(Json(user))
}

async fn reset_password(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Json<SafeUser>, ApiError> {
    let credentials = validation::credentials(payload)?;
    let user = state
        .user_service
        .update(
            credentials.username.as_str(),
            UserChanges {
                password: Some(credentials.password),
            },
        )
        .await?;

    Ok(Json(user))
}

async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<SafeUser>, ApiError> {
    find_user(&state, &username).await
}

async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<SafeUser>, ApiError> {
    remove_user(&state, &username).await
}

async fn find_user(state: &AppState, username: &str) -> Result<Json<SafeUser>, ApiError> {
    let user = state.user_service.get_by_username(username).await?;
    Ok(Json(user))
}

async fn remove_user(state: &AppState, username: &str) -> Result<Json<SafeUser>, ApiError> {
    let user = state.user_service.delete_by_username(username).await?;
    Ok(Json(user))
}
