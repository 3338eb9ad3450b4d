/// Authentication endpoints
///
/// - `POST /v1/auth/signup` - Create a guest account
/// - `POST /v1/auth/login` - Exchange username and password for an access token
/// - `GET /v1/users/me` - Profile of the logged-in user
///
/// Tokens are stateless; logging out is the client dropping its token.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDateTime;
use lodge_shared::{
    auth::{
        jwt,
        middleware::AuthContext,
        password::{self, PasswordError},
    },
    catalog::summary::encode_blob,
    models::user::{CreateUser, User, UserRole},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup form
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub fullname: String,

    #[validate(length(min = 7, max = 20, message = "Phone number must be 7-20 characters"))]
    pub phone_number: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    /// Checked against the strength rules after field validation
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: i64,
    pub username: String,
    pub role: UserRole,
    pub access_token: String,
    pub token_type: String,

    /// Seconds until the token expires
    pub expires_in: i64,
}

/// Public view of a user
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: i64,
    pub role: String,
    pub fullname: String,
    pub phone_number: String,
    pub email: String,
    pub username: String,

    /// Profile picture as base64
    pub profile_picture: Option<String>,

    pub time_created: NaiveDateTime,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            profile_picture: encode_blob(user.profile_picture.as_deref()),
            role: user.role,
            fullname: user.fullname,
            phone_number: user.phone_number,
            email: user.email,
            username: user.username,
            time_created: user.time_created,
        }
    }
}

/// Creates a guest account
///
/// ```text
/// POST /v1/auth/signup
/// Content-Type: application/json
///
/// {
///   "fullname": "Jartu Kollie",
///   "phone_number": "0770123456",
///   "email": "jartu@example.com",
///   "username": "jkollie",
///   "password": "Monrovia2024"
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: email or username already taken
/// - `422 Unprocessable Entity`: validation failed
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<SignupResponse>)> {
    req.validate()?;

    password::validate_password_strength(&req.password)
        .map_err(|e| ApiError::invalid("password", e))?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            role: UserRole::Guest,
            fullname: req.fullname.trim().to_string(),
            phone_number: req.phone_number.trim().to_string(),
            email: req.email.trim().to_lowercase(),
            username: req.username.trim().to_string(),
            password_hash,
            profile_picture: None,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user_id: user.id,
            username: user.username,
            role: UserRole::Guest,
        }),
    ))
}

/// Verifies credentials and issues an access token
///
/// Unknown usernames and wrong passwords get the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let invalid = || ApiError::Unauthorized("Invalid username or password".to_string());

    let user = User::find_by_username(&state.db, req.username.trim())
        .await?
        .ok_or_else(invalid)?;

    let verified = match password::verify_password(&req.password, &user.password_hash) {
        Ok(verified) => verified,
        Err(PasswordError::InvalidHash(e)) => {
            tracing::warn!(user_id = user.id, error = %e, "Stored password hash is unusable");
            false
        }
        Err(e) => return Err(e.into()),
    };

    if !verified {
        tracing::debug!(username = %user.username, "Rejected login");
        return Err(invalid());
    }

    let role = user.user_role().unwrap_or(UserRole::Guest);
    let claims = jwt::Claims::new(user.id, user.username.clone(), role);
    let access_token = jwt::create_token(&claims, state.jwt_secret())?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        user_id: user.id,
        username: user.username,
        role,
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: claims.exp - claims.iat,
    }))
}

/// Profile of the caller
pub async fn me(State(state): State<AppState>, auth: AuthContext) -> ApiResult<Json<ProfileResponse>> {
    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".to_string()))?;

    Ok(Json(user.into()))
}
