/// Database models for LodgeLiberia
///
/// # Models
///
/// - `user`: Guest and host accounts
/// - `listing`: Bookable properties and the `PropertyType` enum
/// - `listing_image`: Gallery images per listing
/// - `listing_feature`: Named features per listing
///
/// # Example
///
/// ```no_run
/// use lodge_shared::models::listing::Listing;
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), sqlx::Error> {
/// if let Some(listing) = Listing::find_by_id(&pool, 1).await? {
///     println!("{} in {}", listing.title, listing.city);
/// }
/// # Ok(())
/// # }
/// ```

pub mod listing;
pub mod listing_feature;
pub mod listing_image;
pub mod user;
