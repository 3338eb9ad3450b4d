/// JWT access tokens
///
/// Login hands out an HS256 token; protected routes validate it on every
/// request. Tokens are stateless, so there is no server-side logout.
///
/// # Claims
///
/// - `sub`: user ID
/// - `username`, `role`: copied from the user row at login
/// - `iss`: always `"lodge"`
/// - `iat` / `nbf` / `exp`: Unix timestamps, 24 hours validity by default
///
/// # Example
///
/// ```
/// use lodge_shared::auth::jwt::{create_token, validate_token, Claims};
/// use lodge_shared::models::user::UserRole;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-secret-that-is-at-least-32-bytes";
/// let claims = Claims::new(42, "mkamara".to_string(), UserRole::Guest);
/// let token = create_token(&claims, secret)?;
///
/// let validated = validate_token(&token, secret)?;
/// assert_eq!(validated.sub, 42);
/// assert_eq!(validated.username, "mkamara");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::user::UserRole;

pub const ISSUER: &str = "lodge";

/// Default token lifetime in hours
pub const DEFAULT_EXPIRATION_HOURS: i64 = 24;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to create token: {0}")]
    CreateError(String),

    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    #[error("Token has expired")]
    Expired,

    #[error("Invalid issuer")]
    InvalidIssuer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: i64,
    pub username: String,
    pub role: UserRole,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub nbf: i64,
}

impl Claims {
    /// Claims valid for [`DEFAULT_EXPIRATION_HOURS`]
    pub fn new(user_id: i64, username: String, role: UserRole) -> Self {
        Self::with_expiration(user_id, username, role, Duration::hours(DEFAULT_EXPIRATION_HOURS))
    }

    /// Claims valid for `expires_in` from now
    ///
    /// A negative duration produces an already expired token, which is
    /// useful in tests.
    pub fn with_expiration(user_id: i64, username: String, role: UserRole, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            username,
            role,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
            nbf: now.timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs `claims` with HS256
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::new(Algorithm::HS256), claims, &key)
        .map_err(|e| JwtError::CreateError(e.to_string()))
}

/// Verifies signature, issuer, `exp` and `nbf`, then returns the claims
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.leeway = 0;

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
            _ => JwtError::ValidationError(e.to_string()),
        })
}
