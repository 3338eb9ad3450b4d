/// User model and database operations
///
/// Users sign up as guests; hosts are users who own listings.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     role TEXT NOT NULL DEFAULT 'guest',
///     fullname TEXT NOT NULL,
///     phone_number TEXT NOT NULL,
///     email TEXT NOT NULL UNIQUE,
///     username TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL,
///     profile_picture BLOB,
///     time_created TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use lodge_shared::models::user::{CreateUser, User, UserRole};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// let user = User::create(
///     &pool,
///     CreateUser {
///         role: UserRole::Guest,
///         fullname: "Jane Doe".to_string(),
///         phone_number: "0770000000".to_string(),
///         email: "jane@example.com".to_string(),
///         username: "jane".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         profile_picture: None,
///     },
/// )
/// .await?;
///
/// let found = User::find_by_username(&pool, "jane").await?;
/// # Ok(())
/// # }
/// ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::fmt;
use std::str::FromStr;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Books places
    Guest,

    /// Lists places
    Host,
}

impl UserRole {
    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Guest => "guest",
            UserRole::Host => "host",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" => Ok(UserRole::Guest),
            "host" => Ok(UserRole::Host),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// User account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Row ID
    pub id: i64,

    /// Stored role label (see [`UserRole`])
    pub role: String,

    /// Display name
    pub fullname: String,

    /// Contact phone number, kept as text to preserve leading zeros
    pub phone_number: String,

    /// Email address, unique across users
    pub email: String,

    /// Login name, unique across users
    pub username: String,

    /// Argon2id password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Optional profile picture bytes
    #[serde(skip)]
    pub profile_picture: Option<Vec<u8>>,

    /// When the account was created
    pub time_created: NaiveDateTime,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub role: UserRole,
    pub fullname: String,
    pub phone_number: String,
    pub email: String,
    pub username: String,

    /// Argon2id password hash (NOT plaintext password!)
    pub password_hash: String,

    pub profile_picture: Option<Vec<u8>>,
}

const USER_COLUMNS: &str = "id, role, fullname, phone_number, email, username, password_hash, profile_picture, time_created";

impl User {
    /// Parsed role, or `None` if the stored label is unknown
    pub fn user_role(&self) -> Option<UserRole> {
        self.role.parse().ok()
    }

    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns a database error if the email or username is already taken
    /// (unique constraint) or the store is unreachable.
    pub async fn create(pool: &SqlitePool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO users (role, fullname, phone_number, email, username, password_hash, profile_picture)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(data.role.as_str())
            .bind(data.fullname)
            .bind(data.phone_number)
            .bind(data.email)
            .bind(data.username)
            .bind(data.password_hash)
            .bind(data.profile_picture)
            .fetch_one(pool)
            .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);

        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Finds a user by login name
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS);

        sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_label() {
        assert_eq!("guest".parse::<UserRole>().unwrap(), UserRole::Guest);
        assert_eq!("host".parse::<UserRole>().unwrap(), UserRole::Host);
        assert_eq!(UserRole::Host.to_string(), "host");
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User {
            id: 1,
            role: "guest".to_string(),
            fullname: "Jane Doe".to_string(),
            phone_number: "0770000000".to_string(),
            email: "jane@example.com".to_string(),
            username: "jane".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            profile_picture: Some(vec![1, 2, 3]),
            time_created: chrono::Utc::now().naive_utc(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("profile_picture").is_none());
        assert_eq!(json["username"], "jane");
        assert_eq!(user.user_role(), Some(UserRole::Guest));
    }
}
