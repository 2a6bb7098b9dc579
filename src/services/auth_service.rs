use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    dto::auth::{Claims, Credentials, LoginResponse, NewUser},
    entity::{Users, users},
    error::{AppError, AppResult},
    models::User,
    response::ApiResponse,
    state::AppState,
};

const TOKEN_TTL_HOURS: i64 = 24;

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid user ID or password.".into())
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub async fn register_user(state: &AppState, payload: NewUser) -> AppResult<ApiResponse<User>> {
    let NewUser {
        user_id,
        password,
        department,
        user_type,
        status,
    } = payload;

    let exist = Users::find_by_id(user_id.clone()).one(&state.orm).await?;
    if exist.is_some() {
        return Err(AppError::Conflict("User ID already exists.".into()));
    }

    let password_hash = hash_password(&password)?;

    let user = users::ActiveModel {
        user_id: Set(user_id),
        password_hash: Set(password_hash),
        department: Set(department),
        user_type: Set(user_type),
        status: Set(status),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(user_id = %user.user_id, user_type = %user.user_type, "user created");
    Ok(ApiResponse::success("User created successfully.", User::from(user)))
}

pub async fn login_user(
    state: &AppState,
    credentials: Credentials,
) -> AppResult<ApiResponse<LoginResponse>> {
    let Credentials { user_id, password } = credentials;
    let user = match Users::find_by_id(user_id.clone()).one(&state.orm).await? {
        Some(u) => u,
        None => {
            tracing::warn!(user_id = %user_id, "login for unknown user");
            return Err(invalid_credentials());
        }
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        tracing::warn!(user_id = %user_id, "login with wrong password");
        return Err(invalid_credentials());
    }

    if user.status == 0 {
        tracing::warn!(user_id = %user_id, "login for inactive account");
        return Err(AppError::Unauthorized("User account is inactive.".into()));
    }

    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.user_id.clone(),
        role: user.user_type.clone(),
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    tracing::info!(user_id = %user.user_id, "user logged in");
    let resp = LoginResponse {
        user: User::from(user),
        token: format!("Bearer {}", token),
    };

    Ok(ApiResponse::success("Login successful.", resp))
}
