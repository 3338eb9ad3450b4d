/// Request authentication for Axum
///
/// [`authenticate`] turns the `Authorization: Bearer <token>` header into an
/// [`AuthContext`]. The API's login layer calls it and stores the context in
/// the request extensions; handlers then take `AuthContext` as an extractor.
///
/// # Example
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use lodge_shared::auth::middleware::AuthContext;
///
/// async fn me(auth: AuthContext) -> String {
///     format!("Hello, {}!", auth.username)
/// }
///
/// let app: Router = Router::new().route("/me", get(me));
/// ```

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::jwt::{validate_token, JwtError};
use crate::models::user::UserRole;

/// Identity of the logged-in user for one request
///
/// Built once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
}

/// Error type for request authentication
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    #[error("Login required")]
    MissingCredentials,

    /// Header present but not `Bearer <token>`
    #[error("{0}")]
    InvalidFormat(String),

    #[error("{0}")]
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": "unauthorized",
            "message": self.to_string(),
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// Validates the bearer token in `headers`
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat("Authorization header is not valid text".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_token(token, secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
        other => AuthError::InvalidToken(format!("Invalid token: {}", other)),
    })?;

    Ok(AuthContext {
        user_id: claims.sub,
        username: claims.username,
        role: claims.role,
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AuthError::MissingCredentials)
    }
}
