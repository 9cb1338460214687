//! HTTP error responses.

use crate::auth::AuthError;
use crate::menu_actor::MenuError;
use crate::order_actor::OrderError;
use crate::payment_actor::PaymentError;
use crate::stock_actor::StockError;
use crate::user_actor::UserError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Every failure a handler can return. The body is always `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Store or runtime failure. The detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            Self::Internal(detail) => {
                error!(%detail, "Request failed");
                "Internal server error".to_string()
            }
            other => {
                warn!(status = status.as_u16(), error = %other, "Request rejected");
                other.to_string()
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Unauthenticated(reason) => Self::Unauthenticated(reason),
            forbidden @ AuthError::Forbidden { .. } => Self::Forbidden(forbidden.to_string()),
            AuthError::TokenIssue(detail) => Self::Internal(detail),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(_) => Self::NotFound(e.to_string()),
            // Registration reports a taken username as a plain bad request.
            UserError::AlreadyExists(_) => Self::InvalidArgument(e.to_string()),
            UserError::ValidationError(msg) => Self::InvalidArgument(msg),
            UserError::InvalidCredentials => Self::Unauthenticated(e.to_string()),
            UserError::Auth(auth) => auth.into(),
            UserError::ActorCommunicationError(detail) => Self::Internal(detail),
        }
    }
}

impl From<MenuError> for ApiError {
    fn from(e: MenuError) -> Self {
        match e {
            MenuError::NotFound(_) => Self::NotFound(e.to_string()),
            MenuError::ValidationError(msg) => Self::InvalidArgument(msg),
            MenuError::Auth(auth) => auth.into(),
            MenuError::ActorCommunicationError(detail) => Self::Internal(detail),
        }
    }
}

impl From<StockError> for ApiError {
    fn from(e: StockError) -> Self {
        match e {
            StockError::NotFound(_) => Self::NotFound(e.to_string()),
            StockError::InvalidArgument(msg) => Self::InvalidArgument(msg),
            StockError::Auth(auth) => auth.into(),
            StockError::ActorCommunicationError(detail) => Self::Internal(detail),
        }
    }
}

impl From<PaymentError> for ApiError {
    fn from(e: PaymentError) -> Self {
        match e {
            PaymentError::NotFound(_) => Self::NotFound(e.to_string()),
            PaymentError::ValidationError(msg) => Self::InvalidArgument(msg),
            PaymentError::CascadeIncomplete { .. } => Self::Internal(e.to_string()),
            PaymentError::ActorCommunicationError(detail) => Self::Internal(detail),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(_) => Self::NotFound(e.to_string()),
            OrderError::ValidationError(msg) => Self::InvalidArgument(msg),
            OrderError::Conflict(_) => Self::Conflict(e.to_string()),
            OrderError::Auth(auth) => auth.into(),
            OrderError::Payment(payment) => payment.into(),
            OrderError::ActorCommunicationError(detail) => Self::Internal(detail),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidArgument(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidArgument(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::from(AuthError::Unauthenticated("No token provided".into())), 401),
            (ApiError::from(AuthError::Forbidden { role: Role::Student }), 403),
            (ApiError::from(StockError::InvalidArgument("Quantity must be positive".into())), 400),
            (ApiError::from(MenuError::NotFound("9".into())), 404),
            (ApiError::from(OrderError::Conflict("ORD-1".into())), 409),
            (ApiError::from(UserError::AlreadyExists("alice".into())), 400),
            (ApiError::from(UserError::InvalidCredentials), 401),
            (ApiError::from(OrderError::ActorCommunicationError("Actor closed".into())), 500),
        ];
        for (error, status) in cases {
            assert_eq!(error.status_code().as_u16(), status, "{error:?}");
        }
    }

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            ApiError::from(MenuError::NotFound("9".into())).to_string(),
            "Menu item not found"
        );
        assert_eq!(
            ApiError::from(UserError::AlreadyExists("alice".into())).to_string(),
            "User already exists"
        );
        assert_eq!(
            ApiError::from(AuthError::Forbidden { role: Role::Kitchen }).to_string(),
            "Access denied for role kitchen"
        );
    }

    #[tokio::test]
    async fn test_internal_detail_is_not_leaked() {
        let response = ApiError::Internal("Actor closed".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }
}
