use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity forwarded by the hosted auth layer. Session verification happens
/// upstream; this service only needs the owning user id for row scoping.
pub struct AuthUser(pub Uuid);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized("Authentication required"))?;

        let user_id = value
            .parse::<Uuid>()
            .map_err(|_| ApiError::Unauthorized("Invalid user id"))?;

        Ok(AuthUser(user_id))
    }
}
