use crate::value_objects::{PasswordHash, Timestamp, UserId, Username};

/// 存储中的完整用户记录，包含凭据字段，不直接返回给调用方。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: Username,
    #[serde(skip_serializing)] // 密码字段不暴露给客户端
    pub password: PasswordHash,
    pub date_joined: Timestamp,
}

impl User {
    /// 去掉密码字段后的安全投影
    pub fn into_safe(self) -> SafeUser {
        SafeUser {
            id: self.id,
            username: self.username,
            date_joined: self.date_joined,
        }
    }
}

/// 用户的安全投影：除密码外的全部字段。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeUser {
    pub id: UserId,
    pub username: Username,
    pub date_joined: Timestamp,
}

impl From<User> for SafeUser {
    fn from(user: User) -> Self {
        user.into_safe()
    }
}

/// 待插入的用户，`id` 由存储层分配。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub password: PasswordHash,
    pub date_joined: Timestamp,
}

/// 部分字段更新，`None` 表示保持原值。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub password: Option<PasswordHash>,
}

impl UserUpdate {
    /// 将更新合并到已有记录上
    pub fn apply_to(self, user: &mut User) {
        if let Some(password) = self.password {
            user.password = password;
        }
    }
}
