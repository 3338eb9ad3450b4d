/// Listing model and database operations
///
/// A listing is a bookable property owned by exactly one host. Listings are
/// read-only from the browsing paths; `create` exists for host onboarding
/// tooling and fixtures.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE host_listings (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     user_id INTEGER NOT NULL REFERENCES users(id),
///     title TEXT NOT NULL,
///     description TEXT,
///     detail_description TEXT,
///     location TEXT NOT NULL,
///     county TEXT NOT NULL,
///     city TEXT NOT NULL,
///     price_per_night REAL NOT NULL,
///     max_guests INTEGER,
///     amenities TEXT,
///     available_from TEXT,
///     available_to TEXT,
///     property_type TEXT NOT NULL,
///     min_stay_days INTEGER,
///     images BLOB,
///     created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
/// );
/// ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::fmt;
use std::str::FromStr;

/// Kind of property being offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Apartment,
    House,
    #[serde(rename = "Guest House")]
    GuestHouse,
    Room,
    Experience,
}

/// Error returned for an unrecognised property type label
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown property type: {0}")]
pub struct UnknownPropertyType(pub String);

impl PropertyType {
    /// Every property type, in landing-page order
    pub const ALL: [PropertyType; 5] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::GuestHouse,
        PropertyType::Room,
        PropertyType::Experience,
    ];

    /// Label stored in `host_listings.property_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "House",
            PropertyType::GuestHouse => "Guest House",
            PropertyType::Room => "Room",
            PropertyType::Experience => "Experience",
        }
    }

    /// Parses a search-form selector
    ///
    /// The search form's placeholder option ("Property"), an empty value and
    /// "Any" all mean "no type filter" and yield `Ok(None)`.
    ///
    /// # Example
    ///
    /// ```
    /// use lodge_shared::models::listing::PropertyType;
    ///
    /// assert_eq!(PropertyType::parse_selector("Property").unwrap(), None);
    /// assert_eq!(
    ///     PropertyType::parse_selector("Guest House").unwrap(),
    ///     Some(PropertyType::GuestHouse)
    /// );
    /// ```
    pub fn parse_selector(selector: &str) -> Result<Option<Self>, UnknownPropertyType> {
        let trimmed = selector.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("property")
            || trimmed.eq_ignore_ascii_case("any")
        {
            return Ok(None);
        }

        trimmed.parse().map(Some)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = UnknownPropertyType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownPropertyType(s.to_string()))
    }
}

/// Listing record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: i64,

    /// Owning host
    pub user_id: i64,

    pub title: String,
    pub description: Option<String>,
    pub detail_description: Option<String>,

    /// Street or area
    pub location: String,
    pub county: String,
    pub city: String,

    pub price_per_night: f64,
    pub max_guests: Option<i64>,
    pub amenities: Option<String>,

    /// Availability window (inclusive)
    pub available_from: Option<NaiveDate>,
    pub available_to: Option<NaiveDate>,

    /// Stored label (see [`PropertyType`])
    pub property_type: String,

    pub min_stay_days: Option<i64>,

    /// Primary image bytes
    #[serde(skip)]
    pub images: Option<Vec<u8>>,
}

/// Input for creating a listing
#[derive(Debug, Clone)]
pub struct CreateListing {
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub detail_description: Option<String>,
    pub location: String,
    pub county: String,
    pub city: String,
    pub price_per_night: f64,
    pub max_guests: Option<i64>,
    pub amenities: Option<String>,
    pub available_from: Option<NaiveDate>,
    pub available_to: Option<NaiveDate>,
    pub property_type: PropertyType,
    pub min_stay_days: Option<i64>,
    pub primary_image: Option<Vec<u8>>,
}

const LISTING_COLUMNS: &str = "id, user_id, title, description, detail_description, location, county, city, \
     price_per_night, max_guests, amenities, available_from, available_to, property_type, \
     min_stay_days, images";

impl Listing {
    /// Creates a listing owned by `data.user_id`
    ///
    /// # Errors
    ///
    /// Returns a foreign key violation if the owning user does not exist.
    pub async fn create(pool: &SqlitePool, data: CreateListing) -> Result<Self, sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO host_listings (
                user_id, title, description, detail_description, location, county, city,
                price_per_night, max_guests, amenities, available_from, available_to,
                property_type, min_stay_days, images
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            LISTING_COLUMNS
        );

        sqlx::query_as::<_, Listing>(&sql)
            .bind(data.user_id)
            .bind(data.title)
            .bind(data.description)
            .bind(data.detail_description)
            .bind(data.location)
            .bind(data.county)
            .bind(data.city)
            .bind(data.price_per_night)
            .bind(data.max_guests)
            .bind(data.amenities)
            .bind(data.available_from)
            .bind(data.available_to)
            .bind(data.property_type.as_str())
            .bind(data.min_stay_days)
            .bind(data.primary_image)
            .fetch_one(pool)
            .await
    }

    /// Finds a listing by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {} FROM host_listings WHERE id = ?", LISTING_COLUMNS);

        sqlx::query_as::<_, Listing>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
