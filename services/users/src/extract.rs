//! Resolution of the `{id}` path segment into a stored user

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::{error::ApiError, models::User, state::AppState};

/// The user addressed by the `{id}` path segment
///
/// Rejects with the 404 envelope when the segment is not an integer or no
/// such user exists, before the handler body runs.
#[derive(Debug)]
pub struct ResolvedUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for ResolvedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;

        state
            .user_repository
            .find(id)
            .await?
            .map(ResolvedUser)
            .ok_or(ApiError::NotFound)
    }
}
