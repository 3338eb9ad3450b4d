/// Stay price calculation
///
/// Turns a check-in date, a check-out date and a nightly rate into the
/// amounts shown on the booking form: the nightly total, the platform
/// commission (10%) and the grand total. No rounding is applied here; the
/// payment step rounds the grand total up.
///
/// # Example
///
/// ```
/// use lodge_shared::pricing::compute_price;
///
/// let quote = compute_price("2024-01-01", "2024-01-04", 50.0).unwrap();
/// assert_eq!(quote.nights, 3);
/// assert_eq!(quote.total, 150.0);
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Share of the nightly total kept by the platform
pub const COMMISSION_RATE: f64 = 0.10;

const MILLIS_PER_DAY: i64 = 1000 * 3600 * 24;

/// Error type for price calculation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PriceError {
    /// Date string could not be parsed
    #[error("Invalid {field}: {value:?}")]
    InvalidDate { field: &'static str, value: String },

    /// Nightly rate is not a finite, non-negative number
    #[error("Invalid nightly rate: {0}")]
    InvalidRate(String),
}

/// Computed stay price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Whole nights between the two dates (0 when the range is reversed)
    pub nights: i64,

    /// nights × nightly rate
    pub total: f64,

    /// Platform commission on `total`
    pub commission: f64,

    /// `total + commission`
    pub grand_total: f64,
}

impl PriceQuote {
    fn zero() -> Self {
        Self {
            nights: 0,
            total: 0.0,
            commission: 0.0,
            grand_total: 0.0,
        }
    }
}

/// Parses a booking date
///
/// Accepts a plain calendar date (`2024-01-01`, read as UTC midnight) or a
/// full RFC 3339 timestamp.
pub fn parse_booking_date(field: &'static str, value: &str) -> Result<DateTime<Utc>, PriceError> {
    let trimmed = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| PriceError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

/// Parses a nightly rate supplied as text
pub fn parse_rate(value: &str) -> Result<f64, PriceError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| PriceError::InvalidRate(value.to_string()))
}

/// Computes the price of a stay
///
/// Whole days are the floor of the millisecond difference divided by one
/// day. A check-out before check-in yields an all-zero quote rather than an
/// error, as does a same-day booking.
///
/// # Errors
///
/// Returns `PriceError` when either date is malformed or the rate is
/// negative or not finite.
pub fn compute_price(
    start_date: &str,
    end_date: &str,
    nightly_rate: f64,
) -> Result<PriceQuote, PriceError> {
    let start = parse_booking_date("start_date", start_date)?;
    let end = parse_booking_date("end_date", end_date)?;

    if !nightly_rate.is_finite() || nightly_rate < 0.0 {
        return Err(PriceError::InvalidRate(nightly_rate.to_string()));
    }

    let nights = (end - start).num_milliseconds().div_euclid(MILLIS_PER_DAY);
    if nights < 0 {
        return Ok(PriceQuote::zero());
    }

    let total = nights as f64 * nightly_rate;
    let commission = COMMISSION_RATE * total;

    Ok(PriceQuote {
        nights,
        total,
        commission,
        grand_total: total + commission,
    })
}
