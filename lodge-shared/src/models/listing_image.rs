/// Gallery images attached to a listing
///
/// # Schema
///
/// ```sql
/// CREATE TABLE host_images (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     host_listing_id INTEGER NOT NULL REFERENCES host_listings(id),
///     image_data BLOB
/// );
/// ```

use sqlx::{Executor, Sqlite, SqlitePool};

/// Image row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ListingImage {
    pub id: i64,
    pub host_listing_id: i64,

    /// Raw image bytes; rows may exist without data
    pub image_data: Option<Vec<u8>>,
}

impl ListingImage {
    /// Attaches an image to a listing
    pub async fn create(
        pool: &SqlitePool,
        listing_id: i64,
        image_data: Option<Vec<u8>>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, ListingImage>(
            r#"
            INSERT INTO host_images (host_listing_id, image_data)
            VALUES (?, ?)
            RETURNING id, host_listing_id, image_data
            "#,
        )
        .bind(listing_id)
        .bind(image_data)
        .fetch_one(pool)
        .await
    }

    /// Image blobs for a listing in insertion order
    ///
    /// Rows without data are kept as `None` so positions are preserved.
    pub async fn list_for_listing<'e, E>(
        executor: E,
        listing_id: i64,
    ) -> Result<Vec<Option<Vec<u8>>>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar::<_, Option<Vec<u8>>>(
            "SELECT image_data FROM host_images WHERE host_listing_id = ? ORDER BY id",
        )
        .bind(listing_id)
        .fetch_all(executor)
        .await
    }
}
