/// Authentication primitives
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and strength rules
/// - [`jwt`]: HS256 access tokens carrying user id, username and role
/// - [`middleware`]: per-request `AuthContext` from the bearer header
///
/// # Example
///
/// ```no_run
/// use lodge_shared::auth::password::{hash_password, verify_password};
/// use lodge_shared::auth::jwt::{create_token, validate_token, Claims};
/// use lodge_shared::models::user::UserRole;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("Kpelle#2024")?;
/// assert!(verify_password("Kpelle#2024", &hash)?);
///
/// let claims = Claims::new(7, "jkollie".to_string(), UserRole::Guest);
/// let token = create_token(&claims, "a-secret-that-is-at-least-32-bytes")?;
/// let validated = validate_token(&token, "a-secret-that-is-at-least-32-bytes")?;
/// assert_eq!(validated.sub, 7);
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
