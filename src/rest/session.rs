use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::{models::ErrorResponse, AppState};
use crate::{auth::bearer_token, types::SessionUser};

/// Where an unauthenticated caller is sent to sign in.
pub const SIGN_IN_PATH: &str = "/";

/// The signed-in user of the current request. Rejects with 401 otherwise.
pub struct CurrentUser(pub SessionUser);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token);

        match state.auth.authenticate(bearer) {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                log::debug!("Rejecting unauthenticated request to {}", parts.uri.path());
                Err((
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse {
                        message: "sign in required".to_string(),
                        sign_in: Some(SIGN_IN_PATH.to_string()),
                    }),
                )
                    .into_response())
            }
        }
    }
}
