/// Place detail composition
///
/// Joins one listing row with its gallery images and feature names into the
/// record rendered on the place detail page.

use serde::{Deserialize, Serialize};

use super::summary::{encode_blob, Availability};

/// Listing row joined with its host
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DetailRow {
    pub host_name: String,
    pub host_picture: Option<Vec<u8>>,
    pub property_id: i64,
    pub property_title: String,
    pub property_description: Option<String>,
    pub property_detail_description: Option<String>,
    pub property_price_per_night: f64,
    pub property_location: String,
    pub property_county: String,
    pub property_city: String,
    pub property_type: String,
    pub amenities: Option<String>,
    pub minimum_host_days: Option<i64>,
    pub max_guest_count: Option<i64>,
    pub available_from: Option<String>,
    pub available_to: Option<String>,
}

/// Everything the detail page shows for one listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    pub selected_place: i64,
    pub host_name: String,

    /// Host profile picture as base64
    pub host_picture: Option<String>,

    pub property_title: String,
    pub property_description: Option<String>,
    pub property_detail_description: Option<String>,
    pub property_price_per_night: f64,
    pub property_location: String,
    pub property_county: String,
    pub property_city: String,
    pub property_type: String,
    pub amenities: Option<String>,
    pub minimum_host_days: Option<i64>,
    pub max_guest_count: Option<i64>,
    pub available_to: Option<String>,

    #[serde(flatten)]
    pub availability: Availability,

    /// Gallery images as base64, in storage order; `None` where a row has no data
    pub images: Vec<Option<String>>,

    pub features: Vec<String>,
    pub feature_count: usize,
}

pub struct PlaceDetailAssembler;

impl PlaceDetailAssembler {
    pub fn assemble(
        row: DetailRow,
        images: Vec<Option<Vec<u8>>>,
        features: Vec<String>,
    ) -> PlaceDetail {
        PlaceDetail {
            selected_place: row.property_id,
            host_name: row.host_name,
            host_picture: encode_blob(row.host_picture.as_deref()),
            property_title: row.property_title,
            property_description: row.property_description,
            property_detail_description: row.property_detail_description,
            property_price_per_night: row.property_price_per_night,
            property_location: row.property_location,
            property_county: row.property_county,
            property_city: row.property_city,
            property_type: row.property_type,
            amenities: row.amenities,
            minimum_host_days: row.minimum_host_days,
            max_guest_count: row.max_guest_count,
            availability: Availability::from_stored(row.available_from.as_deref()),
            available_to: row.available_to,
            images: images
                .iter()
                .map(|blob| encode_blob(blob.as_deref()))
                .collect(),
            feature_count: features.len(),
            features,
        }
    }
}
