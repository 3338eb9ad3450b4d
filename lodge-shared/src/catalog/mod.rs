/// Listing browsing pipeline
///
/// - [`summary`]: listing card shape, month mapping, base64 images
/// - [`search`]: search filter builder (listing + count statements)
/// - [`aggregate`]: landing-page buckets by property type
/// - [`detail`]: place detail composition
/// - [`repository`]: store access tying the above together

pub mod aggregate;
pub mod detail;
pub mod repository;
pub mod search;
pub mod summary;

pub use aggregate::{LandingBuckets, ListingAggregator};
pub use detail::{PlaceDetail, PlaceDetailAssembler};
pub use repository::ListingRepository;
pub use search::{SearchFilter, SearchFilterBuilder, SearchResults};
pub use summary::{Availability, ListingSummary};

/// Error type for catalog lookups
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No listing with this identifier
    #[error("Place not found: {0}")]
    NotFound(String),

    /// Store query failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
