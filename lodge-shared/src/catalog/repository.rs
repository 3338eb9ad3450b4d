/// Read access to listings for the browsing pages
///
/// Every operation that issues more than one statement runs them inside a
/// single read transaction, so the pieces of one response always come from
/// the same snapshot of the store.
///
/// # Example
///
/// ```no_run
/// use lodge_shared::catalog::{ListingRepository, SearchFilter};
/// use sqlx::SqlitePool;
///
/// # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
/// let repo = ListingRepository::new(pool);
///
/// let landing = repo.list_all().await?;
/// let found = repo
///     .search(&SearchFilter {
///         location: Some("Monrovia".to_string()),
///         ..Default::default()
///     })
///     .await?;
///
/// assert!(found.total_count as usize <= landing.all_places.len());
/// # Ok(())
/// # }
/// ```

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::aggregate::{LandingBuckets, ListingAggregator};
use super::detail::{DetailRow, PlaceDetail, PlaceDetailAssembler};
use super::search::{bind_params, SearchFilter, SearchFilterBuilder, SearchResults};
use super::summary::{ListingSummary, SummaryRow};
use super::CatalogError;
use crate::models::listing::PropertyType;
use crate::models::listing_feature::ListingFeature;
use crate::models::listing_image::ListingImage;

const DETAIL_SELECT: &str = r#"
    SELECT
        users.fullname AS host_name,
        users.profile_picture AS host_picture,
        host_listings.id AS property_id,
        host_listings.title AS property_title,
        host_listings.description AS property_description,
        host_listings.detail_description AS property_detail_description,
        host_listings.price_per_night AS property_price_per_night,
        host_listings.location AS property_location,
        host_listings.county AS property_county,
        host_listings.city AS property_city,
        host_listings.property_type AS property_type,
        host_listings.amenities AS amenities,
        host_listings.min_stay_days AS minimum_host_days,
        host_listings.max_guests AS max_guest_count,
        host_listings.available_from AS available_from,
        host_listings.available_to AS available_to
    FROM users
    JOIN host_listings ON users.id = host_listings.user_id
    WHERE host_listings.id = ?
"#;

/// Listing queries over the shared pool
#[derive(Debug, Clone)]
pub struct ListingRepository {
    pool: SqlitePool,
}

impl ListingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Listing summaries, optionally restricted to one property type
    ///
    /// `None` returns every listing.
    #[instrument(skip(self))]
    pub async fn fetch_by_type(
        &self,
        kind: Option<PropertyType>,
    ) -> Result<Vec<ListingSummary>, sqlx::Error> {
        let query = SearchFilterBuilder::new().property_type(kind).build();

        let rows = bind_params(sqlx::query_as::<_, SummaryRow>(&query.listing_sql), &query.params)
            .fetch_all(&self.pool)
            .await?;

        debug!(rows = rows.len(), "Fetched listing summaries");
        Ok(rows.into_iter().map(ListingSummary::from).collect())
    }

    /// All listings grouped into landing-page buckets from one read
    pub async fn list_all(&self) -> Result<LandingBuckets, sqlx::Error> {
        let listings = self.fetch_by_type(None).await?;
        Ok(ListingAggregator::partition(listings))
    }

    /// Filtered listings plus the total number of matches
    ///
    /// The listing and count statements share one transaction and one
    /// parameter list.
    #[instrument(skip(self))]
    pub async fn search(&self, filter: &SearchFilter) -> Result<SearchResults, sqlx::Error> {
        let query = SearchFilterBuilder::from_filter(filter).build();
        debug!(filters_applied = query.filters_applied, "Running listing search");

        let mut tx = self.pool.begin().await?;

        let rows = bind_params(sqlx::query_as::<_, SummaryRow>(&query.listing_sql), &query.params)
            .fetch_all(&mut *tx)
            .await?;

        let (total_count,): (i64,) = bind_params(sqlx::query_as(&query.count_sql), &query.params)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(SearchResults {
            results: rows.into_iter().map(ListingSummary::from).collect(),
            total_count,
        })
    }

    /// Full detail for one listing
    ///
    /// `listing_id` comes straight from the URL; anything that is not the ID
    /// of an existing listing is reported as `CatalogError::NotFound`.
    #[instrument(skip(self))]
    pub async fn fetch_detail(&self, listing_id: &str) -> Result<PlaceDetail, CatalogError> {
        let not_found = || CatalogError::NotFound(listing_id.to_string());

        let id: i64 = listing_id.trim().parse().map_err(|_| not_found())?;

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, DetailRow>(DETAIL_SELECT)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(not_found)?;

        let images = ListingImage::list_for_listing(&mut *tx, id).await?;
        let features = ListingFeature::list_names(&mut *tx, id).await?;

        tx.commit().await?;

        debug!(
            listing_id = id,
            images = images.len(),
            features = features.len(),
            "Assembled place detail"
        );

        Ok(PlaceDetailAssembler::assemble(row, images, features))
    }

    /// Gallery images for a listing as base64, in storage order
    pub async fn images_for(&self, listing_id: i64) -> Result<Vec<Option<String>>, sqlx::Error> {
        let blobs = ListingImage::list_for_listing(&self.pool, listing_id).await?;

        Ok(blobs
            .iter()
            .map(|blob| super::summary::encode_blob(blob.as_deref()))
            .collect())
    }
}
