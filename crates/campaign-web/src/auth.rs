//! Request identity.
//!
//! Sessions are handled by the fronting proxy, which forwards the signed-in
//! user as `x-user-id` and `x-user-email` headers.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use campaign_core::Owner;

use crate::error::WebError;

/// Header carrying the user's opaque identifier.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the user's email address.
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// The authenticated user. Rejects with 401 when either header is missing.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Owner);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        match (header(USER_ID_HEADER), header(USER_EMAIL_HEADER)) {
            (Some(id), Some(email)) => Ok(CurrentUser(Owner::new(id, email))),
            _ => Err(WebError::Unauthorized),
        }
    }
}
