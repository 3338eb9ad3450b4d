/// Stay price endpoint
///
/// ```text
/// POST /v1/pricing/calculate
/// Content-Type: application/json
///
/// { "startDate": "2024-01-01", "endDate": "2024-01-04", "propertyPricePerNight": 50 }
/// ```
///
/// ```json
/// { "nights": 3, "total": 150.0, "commission": 15.0, "grand_total": 165.0 }
/// ```
///
/// The booking form posts the rate either as a number or as the text of a
/// form field; both are accepted. Snake-case field names work too.

use crate::error::ApiResult;
use axum::Json;
use lodge_shared::pricing::{compute_price, parse_rate, PriceError, PriceQuote};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PriceRequest {
    #[serde(alias = "startDate")]
    pub start_date: String,

    #[serde(alias = "endDate")]
    pub end_date: String,

    #[serde(alias = "propertyPricePerNight")]
    pub property_price_per_night: NightlyRate,
}

/// Nightly rate as sent by the client
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NightlyRate {
    Number(f64),
    Text(String),
}

impl NightlyRate {
    pub fn value(&self) -> Result<f64, PriceError> {
        match self {
            NightlyRate::Number(rate) => Ok(*rate),
            NightlyRate::Text(raw) => parse_rate(raw),
        }
    }
}

pub async fn calculate(Json(req): Json<PriceRequest>) -> ApiResult<Json<PriceQuote>> {
    let rate = req.property_price_per_night.value()?;
    let quote = compute_price(&req.start_date, &req.end_date, rate)?;

    tracing::debug!(
        nights = quote.nights,
        grand_total = quote.grand_total,
        "Computed stay price"
    );

    Ok(Json(quote))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_accepts_number_or_text() {
        let req: PriceRequest = serde_json::from_str(
            r#"{"startDate":"2024-01-01","endDate":"2024-01-04","propertyPricePerNight":"50"}"#,
        )
        .unwrap();
        assert_eq!(req.property_price_per_night.value().unwrap(), 50.0);

        let req: PriceRequest = serde_json::from_str(
            r#"{"start_date":"2024-01-01","end_date":"2024-01-04","property_price_per_night":42.5}"#,
        )
        .unwrap();
        assert_eq!(req.property_price_per_night.value().unwrap(), 42.5);
    }

    #[test]
    fn test_text_rate_must_be_numeric() {
        assert!(NightlyRate::Text("fifty".to_string()).value().is_err());
    }
}
