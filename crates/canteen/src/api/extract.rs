//! Request extractors that reject with [`ApiError`] instead of axum's plain-text rejections.

use super::{ApiError, AppState};
use crate::auth::{policy, Principal, RoleSet};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// JSON body; malformed or mistyped bodies are a 400 `{"error": ...}`.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Path parameters; an unparsable id is a 400 rather than a 404.
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// The token from `Authorization: Bearer <token>`, if any. Never rejects.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    /// The header token, or `fallback` (a token carried in the body) when there is none.
    pub fn or(self, fallback: Option<String>) -> Option<String> {
        self.0.or(fallback)
    }
}

fn bearer(parts: &Parts) -> Option<String> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim().to_string())
        .filter(|t| !t.is_empty())
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(bearer(parts)))
    }
}

/// A principal authenticated from the bearer header. Role checks happen downstream.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Principal);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer(parts);
        let principal = state.gate.authenticate(token.as_deref())?;
        Ok(Self(principal))
    }
}

/// The role set a route admits. Implemented by the marker types below.
pub trait RouteRoles: Send + Sync + 'static {
    const ROLES: RoleSet;
}

macro_rules! route_roles {
    ($($name:ident => $set:ident),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name;

            impl RouteRoles for $name {
                const ROLES: RoleSet = policy::$set;
            }
        )*
    };
}

route_roles! {
    MenuWrite => MENU_WRITE,
    MenuAvailability => MENU_AVAILABILITY,
    MenuStaff => MENU_STAFF,
    StockManage => STOCK_MANAGE,
    StockAdjust => STOCK_ADJUST,
    StockStaff => STOCK_STAFF,
    OrderStaff => ORDER_STAFF,
    OrderDelete => ORDER_DELETE,
    PaymentRecord => PAYMENT_RECORD,
    PaymentView => PAYMENT_VIEW,
    UserAdmin => USER_ADMIN,
}

/// A bearer-authenticated principal whose role is in `R::ROLES`.
///
/// Place it before any path or body extractor: a role outside the set is a 403 whatever
/// the rest of the request looks like.
#[derive(Debug, Clone)]
pub struct Authorized<R>(pub Principal, pub PhantomData<R>);

impl<R: RouteRoles> FromRequestParts<AppState> for Authorized<R> {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer(parts);
        let principal = state.gate.authorize(token.as_deref(), R::ROLES)?;
        Ok(Self(principal, PhantomData))
    }
}
