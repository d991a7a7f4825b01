use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use kernel::model::id::UserId;
use shared::error::AppError;

/// Identifies the calling user from the `x-user-id` header. Authentication
/// proper happens upstream; permission checks against the stored role are
/// done by the services.
pub struct Requester(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for Requester
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get("x-user-id")
            .ok_or_else(|| AppError::InvalidRequest("x-user-id header is required".into()))?;
        value
            .to_str()
            .ok()
            .and_then(|raw| raw.parse::<UserId>().ok())
            .map(Self)
            .ok_or_else(|| AppError::InvalidRequest("x-user-id header must be a UUID".into()))
    }
}
