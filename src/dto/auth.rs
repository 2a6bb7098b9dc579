use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::fields::{filled, opt_i32},
    error::{AppError, AppResult},
    models::User,
};

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct RegisterRequest {
    pub user_id: Option<String>,
    pub user_pass: Option<String>,
    pub user_department: Option<String>,
    pub user_type: Option<String>,
    /// 0 or 1.
    #[serde(default, deserialize_with = "opt_i32")]
    pub user_status: Option<i32>,
}

/// Validated account fields.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_id: String,
    pub password: String,
    pub department: String,
    pub user_type: String,
    pub status: i32,
}

impl RegisterRequest {
    pub fn validate(self) -> AppResult<NewUser> {
        let missing =
            || AppError::MissingFields("Missing required fields for user creation.".into());
        let user = NewUser {
            user_id: filled(self.user_id).ok_or_else(missing)?,
            password: filled(self.user_pass).ok_or_else(missing)?,
            department: filled(self.user_department).ok_or_else(missing)?,
            user_type: filled(self.user_type).ok_or_else(missing)?,
            status: self.user_status.ok_or_else(missing)?,
        };
        if !matches!(user.status, 0 | 1) {
            return Err(AppError::BadRequest("user_status must be 0 or 1.".into()));
        }
        Ok(user)
    }
}

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct LoginRequest {
    pub user_id: Option<String>,
    pub user_pass: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(self) -> AppResult<Credentials> {
        let missing = || AppError::MissingFields("Missing user ID or password for login.".into());
        Ok(Credentials {
            user_id: filled(self.user_id).ok_or_else(missing)?,
            password: filled(self.user_pass).ok_or_else(missing)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}
