/// Listing browsing endpoints
///
/// - `GET /v1/places` - every listing plus one bucket per property type
/// - `GET /v1/places/search?place_location=&place_price=&search_dropdown=` - filtered listings
/// - `GET /v1/places/:id` - full detail for one listing
///
/// Search parameters are all optional. Empty values are treated as absent,
/// and the search form's "Property" placeholder means any type.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use lodge_shared::{
    catalog::{LandingBuckets, PlaceDetail, SearchFilter, SearchResults},
    models::listing::PropertyType,
};
use serde::Deserialize;

/// Raw search form fields
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub place_location: Option<String>,
    pub place_price: Option<String>,
    pub search_dropdown: Option<String>,
}

impl SearchParams {
    /// Validates the form into a typed filter
    pub fn into_filter(self) -> ApiResult<SearchFilter> {
        let location = self
            .place_location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        let max_price = match self.place_price.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let price = raw.parse::<f64>().ok().filter(|p| p.is_finite()).ok_or_else(|| {
                    ApiError::invalid("place_price", format!("Invalid price: {:?}", raw))
                })?;
                Some(price)
            }
        };

        let property_type = match self.search_dropdown.as_deref() {
            Some(selector) => PropertyType::parse_selector(selector)?,
            None => None,
        };

        Ok(SearchFilter {
            location,
            max_price,
            property_type,
        })
    }
}

pub async fn list_all(State(state): State<AppState>) -> ApiResult<Json<LandingBuckets>> {
    let buckets = state.listings.list_all().await?;

    tracing::debug!(listings = buckets.all_places.len(), "Loaded landing buckets");
    Ok(Json(buckets))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<SearchResults>> {
    let filter = params.into_filter()?;
    let results = state.listings.search(&filter).await?;

    tracing::info!(
        location = ?filter.location,
        max_price = ?filter.max_price,
        property_type = ?filter.property_type,
        total_count = results.total_count,
        "Search completed"
    );

    Ok(Json(results))
}

/// `id` is taken as text; anything that is not a known listing ID is a 404
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PlaceDetail>> {
    Ok(Json(state.listings.fetch_detail(&id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(location: Option<&str>, price: Option<&str>, kind: Option<&str>) -> SearchParams {
        SearchParams {
            place_location: location.map(String::from),
            place_price: price.map(String::from),
            search_dropdown: kind.map(String::from),
        }
    }

    #[test]
    fn test_empty_form_is_unfiltered() {
        let filter = params(Some(""), Some(" "), Some("Property")).into_filter().unwrap();
        assert_eq!(filter, SearchFilter::default());

        let filter = SearchParams::default().into_filter().unwrap();
        assert_eq!(filter, SearchFilter::default());
    }

    #[test]
    fn test_full_form() {
        let filter = params(Some(" Monrovia "), Some("100"), Some("Guest House"))
            .into_filter()
            .unwrap();

        assert_eq!(filter.location.as_deref(), Some("Monrovia"));
        assert_eq!(filter.max_price, Some(100.0));
        assert_eq!(filter.property_type, Some(PropertyType::GuestHouse));
    }

    #[test]
    fn test_bad_price_is_rejected() {
        for raw in ["cheap", "NaN", "inf"] {
            assert!(matches!(
                params(None, Some(raw), None).into_filter(),
                Err(ApiError::ValidationError(_))
            ));
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(matches!(
            params(None, None, Some("Castle")).into_filter(),
            Err(ApiError::ValidationError(_))
        ));
    }
}
