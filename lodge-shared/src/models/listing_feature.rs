/// Features attached to a listing ("Wifi", "Pool", ...)
///
/// # Schema
///
/// ```sql
/// CREATE TABLE host_places_features (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     place_id INTEGER NOT NULL REFERENCES host_listings(id),
///     feature TEXT NOT NULL,
///     feature_type TEXT,
///     feature_description TEXT
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::{Executor, Sqlite, SqlitePool};

/// Feature row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ListingFeature {
    pub id: i64,
    pub place_id: i64,
    pub feature: String,
    pub feature_type: Option<String>,
    pub feature_description: Option<String>,
}

/// Input for attaching a feature
#[derive(Debug, Clone)]
pub struct CreateListingFeature {
    pub place_id: i64,
    pub feature: String,
    pub feature_type: Option<String>,
    pub feature_description: Option<String>,
}

impl ListingFeature {
    pub async fn create(
        pool: &SqlitePool,
        data: CreateListingFeature,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, ListingFeature>(
            r#"
            INSERT INTO host_places_features (place_id, feature, feature_type, feature_description)
            VALUES (?, ?, ?, ?)
            RETURNING id, place_id, feature, feature_type, feature_description
            "#,
        )
        .bind(data.place_id)
        .bind(data.feature)
        .bind(data.feature_type)
        .bind(data.feature_description)
        .fetch_one(pool)
        .await
    }

    /// Feature names for a listing in insertion order
    pub async fn list_names<'e, E>(executor: E, listing_id: i64) -> Result<Vec<String>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar::<_, String>(
            "SELECT feature FROM host_places_features WHERE place_id = ? ORDER BY id",
        )
        .bind(listing_id)
        .fetch_all(executor)
        .await
    }
}
