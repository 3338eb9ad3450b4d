/// Listing summary shape shared by the landing page and search results
///
/// Rows come straight from the listing/host join; this module turns them
/// into the display shape: the primary image as base64 and the
/// availability start date broken into month name, day and year.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Maps a two-digit month number ("01".."12") to its English name
///
/// Anything outside the twelve known values yields `None`.
///
/// # Example
///
/// ```
/// use lodge_shared::catalog::summary::month_name;
///
/// assert_eq!(month_name("03"), Some("March"));
/// assert_eq!(month_name("3"), None);
/// assert_eq!(month_name("13"), None);
/// ```
pub fn month_name(month: &str) -> Option<&'static str> {
    if month.len() != 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match month.parse::<usize>() {
        Ok(n @ 1..=12) => Some(MONTH_NAMES[n - 1]),
        _ => None,
    }
}

/// Encodes an optional blob as standard base64
///
/// An absent blob stays absent; an empty blob encodes to an empty string.
pub fn encode_blob(blob: Option<&[u8]>) -> Option<String> {
    blob.map(|bytes| STANDARD.encode(bytes))
}

/// Calendar breakdown of a listing's availability start date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// Month name ("January".."December")
    pub available_month: Option<String>,

    /// Zero-padded day of month ("01".."31")
    pub available_day: Option<String>,

    /// Four-digit year
    pub available_year: Option<String>,
}

impl Availability {
    /// Breaks down a stored `available_from` value
    ///
    /// The value is read as `YYYY-MM-DD`, optionally followed by a time part.
    /// Missing or unparseable values produce an empty breakdown.
    pub fn from_stored(raw: Option<&str>) -> Self {
        let Some(date) = raw.and_then(parse_stored_date) else {
            return Self::default();
        };

        let month = format!("{:02}", date.month());

        Self {
            available_month: month_name(&month).map(str::to_string),
            available_day: Some(format!("{:02}", date.day())),
            available_year: Some(format!("{:04}", date.year())),
        }
    }
}

fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10)?;

    // Anything after the date must be a time separator
    match trimmed.as_bytes().get(10) {
        None | Some(b' ') | Some(b'T') => {}
        Some(_) => return None,
    }

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Raw row of the listing/host join
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SummaryRow {
    pub host_name: String,
    pub property_id: i64,
    pub property_title: String,
    pub property_description: Option<String>,
    pub property_price_per_night: f64,
    pub property_type: String,
    pub images: Option<Vec<u8>>,
    pub available_from: Option<String>,
}

/// Listing card shown on the landing page and in search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSummary {
    pub host_name: String,
    pub host_place_id: i64,
    pub property_title: String,
    pub property_description: Option<String>,
    pub property_price_per_night: f64,
    pub property_type: String,

    #[serde(flatten)]
    pub availability: Availability,

    /// Primary image as base64, if the listing has one
    pub base64_image: Option<String>,
}

impl From<SummaryRow> for ListingSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            availability: Availability::from_stored(row.available_from.as_deref()),
            base64_image: encode_blob(row.images.as_deref()),
            host_name: row.host_name,
            host_place_id: row.property_id,
            property_title: row.property_title,
            property_description: row.property_description,
            property_price_per_night: row.property_price_per_night,
            property_type: row.property_type,
        }
    }
}
