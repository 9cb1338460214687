//! `/api/auth/*`: registration, login, demo login and the current account.

use super::{ApiError, ApiJson, AppState, Authenticated};
use crate::auth::Principal;
use crate::clients::Registration;
use crate::model::{Role, User, UserId};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DemoLoginRequest {
    pub role: Option<String>,
}

/// `{message, token, user}` as returned by both login flavours.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub user: Value,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_role(raw: &str) -> Result<Role, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::InvalidArgument("Invalid role".into()))
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (Some(username), Some(password), Some(role)) = (
        non_empty(body.username),
        non_empty(body.password),
        non_empty(body.role),
    ) else {
        return Err(ApiError::InvalidArgument("Missing required fields".into()));
    };

    let user = state
        .users
        .register(Registration {
            username,
            password,
            email: body.email,
            role: parse_role(&role)?,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully", "user": user })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (Some(username), Some(password)) = (non_empty(body.username), non_empty(body.password))
    else {
        return Err(ApiError::InvalidArgument(
            "Username and password required".into(),
        ));
    };

    let user: User = state.users.verify_credentials(&username, &password).await?;
    let token = state.tokens.issue(&Principal::from(&user))?;
    info!(id = %user.id, role = %user.role, "Login");

    Ok(Json(LoginResponse {
        message: "Login successful",
        token,
        user: json!(user),
    }))
}

/// Issues a token for the shared demo account without touching the users table.
pub async fn demo_login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<DemoLoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let raw = non_empty(body.role).ok_or_else(|| ApiError::InvalidArgument("Role required".into()))?;
    let role = parse_role(&raw)?;

    let principal = Principal {
        id: UserId(1),
        username: "demo_user".into(),
        role,
    };
    let token = state.tokens.issue(&principal)?;
    info!(%role, "Demo login");

    Ok(Json(LoginResponse {
        message: "Demo login successful",
        token,
        user: json!({
            "id": principal.id,
            "username": principal.username,
            "email": "demo@example.com",
            "role": role,
        }),
    }))
}

pub async fn me(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.current_user(&principal).await?))
}
