//! 请求体形状校验
//!
//! 先由 serde 反序列化为带类型的载荷（缺字段、类型不对都会被拒绝），
//! 再转换为领域值对象（拒绝空白字符串）。任何失败都直接返回 400，不会调用服务。

use application::Credentials;
use axum::{extract::rejection::JsonRejection, Json};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use domain::{MessageContent, NewMessage, Password, SenderName, Username};
use serde::Deserialize;

use crate::error::ApiError;

pub const INVALID_USER_BODY: &str = "Invalid user body";
pub const INVALID_MESSAGE_REQUEST: &str = "Invalid message request";

// Postgres TIMESTAMPTZ 可存的年份范围（公元前 4713 年记为 -4712）
const STORABLE_YEARS: std::ops::RangeInclusive<i32> = -4712..=294275;

#[derive(Deserialize)]
pub struct UserPayload {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMessagePayload {
    message_to_add: MessageFields,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageFields {
    msg: String,
    msg_from: String,
    msg_date_time: InstantInput,
}

/// 时间字段可以是字符串，也可以是毫秒时间戳
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstantInput {
    Millis(i64),
    Text(String),
}

pub fn credentials(
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Credentials, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(%rejection, "rejected user payload");
        ApiError::bad_request(INVALID_USER_BODY)
    })?;

    let username = Username::parse(payload.username);
    let password = Password::parse(payload.password);
    match (username, password) {
        (Ok(username), Ok(password)) => Ok(Credentials { username, password }),
        _ => {
            tracing::debug!("rejected user payload with blank field");
            Err(ApiError::bad_request(INVALID_USER_BODY))
        }
    }
}

pub fn new_message(
    payload: Result<Json<AddMessagePayload>, JsonRejection>,
) -> Result<NewMessage, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(%rejection, "rejected message payload");
        ApiError::bad_request(INVALID_MESSAGE_REQUEST)
    })?;
    let fields = payload.message_to_add;

    let msg_date_time = match fields.msg_date_time {
        InstantInput::Millis(millis) => DateTime::from_timestamp_millis(millis),
        InstantInput::Text(text) => parse_instant(&text),
    }
    .filter(|instant| STORABLE_YEARS.contains(&instant.year()));

    match (
        MessageContent::new(fields.msg),
        SenderName::new(fields.msg_from),
        msg_date_time,
    ) {
        (Ok(msg), Ok(msg_from), Some(msg_date_time)) => Ok(NewMessage {
            msg,
            msg_from,
            msg_date_time,
        }),
        _ => {
            tracing::debug!("rejected message payload with invalid field");
            Err(ApiError::bad_request(INVALID_MESSAGE_REQUEST))
        }
    }
}

/// 解析时间字符串：RFC 3339、不带时区的日期时间（按 UTC）、或纯日期（UTC 零点）。
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|parsed| parsed.and_utc())
}
