/// Payment page endpoint (login required)
///
/// ```text
/// GET /v1/payment?selected_place_id=3&selected_place_title=Sinkor%20Flat
///     &grand_total=164.99&start-date=2024-01-01&end-date=2024-01-04
/// ```
///
/// Rounds the grand total up, renders both mobile-money QR codes for that
/// amount and echoes the booking back with the listing's gallery images.
/// Unknown listings and listings without gallery images are answered with
/// 404. A missing title falls back to the stored listing title.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Query, State},
    Json,
};
use lodge_shared::{
    auth::middleware::AuthContext,
    models::listing::Listing,
    payment::{PaymentQrCodes, PaymentQrGenerator},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PaymentParams {
    pub selected_place_id: Option<String>,
    pub selected_place_title: Option<String>,
    pub grand_total: Option<String>,

    #[serde(rename = "start-date")]
    pub start_date: Option<String>,

    #[serde(rename = "end-date")]
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub selected_place_id: i64,
    pub selected_place_title: Option<String>,
    pub checkin: Option<String>,
    pub checkout: Option<String>,
    pub rounded_cost: i64,

    /// Gallery images as base64, in storage order
    pub images: Vec<Option<String>>,

    pub qr_codes: PaymentQrCodes,
}

pub async fn payment(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(params): Query<PaymentParams>,
) -> ApiResult<Json<PaymentResponse>> {
    let no_images = || ApiError::NotFound("No images found for this listing.".to_string());

    let raw_total = required(params.grand_total.as_deref(), "grand_total")?;
    let grand_total = raw_total
        .parse::<f64>()
        .map_err(|_| ApiError::invalid("grand_total", format!("Invalid amount: {:?}", raw_total)))?;
    let rounded_cost = PaymentQrGenerator::rounded_cost(grand_total)?;

    let raw_id = required(params.selected_place_id.as_deref(), "selected_place_id")?;
    let listing_id = raw_id.parse::<i64>().map_err(|_| no_images())?;

    let listing = Listing::find_by_id(&state.db, listing_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Place not found: {}", listing_id)))?;

    let images = state.listings.images_for(listing_id).await?;
    if images.is_empty() {
        return Err(no_images());
    }

    let qr_codes = state.payments.build(rounded_cost).await?;

    tracing::info!(
        user_id = auth.user_id,
        listing_id,
        rounded_cost,
        "Payment codes issued"
    );

    Ok(Json(PaymentResponse {
        selected_place_id: listing_id,
        selected_place_title: params.selected_place_title.or(Some(listing.title)),
        checkin: params.start_date,
        checkout: params.end_date,
        rounded_cost,
        images,
        qr_codes,
    }))
}

/// Trimmed value of a required query field
fn required<'a>(value: Option<&'a str>, field: &str) -> ApiResult<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::invalid(field, format!("{} is required", field)))
}
