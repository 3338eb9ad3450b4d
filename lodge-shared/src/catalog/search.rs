/// Search filter composition
///
/// Builds the listing query and its matching count query from the three
/// optional search inputs. Every condition is appended to both statements
/// and its parameters are pushed once into a shared list, so binding the
/// same list to both keeps the count equal to the number of rows returned.
///
/// # Example
///
/// ```
/// use lodge_shared::catalog::search::SearchFilterBuilder;
/// use lodge_shared::models::listing::PropertyType;
///
/// let query = SearchFilterBuilder::new()
///     .location(Some("Monrovia"))
///     .max_price(Some(100.0))
///     .property_type(Some(PropertyType::Apartment))
///     .build();
///
/// assert_eq!(query.filters_applied, 3);
/// assert_eq!(query.params.len(), 5);
/// ```

use crate::models::listing::PropertyType;
use serde::{Deserialize, Serialize};
use sqlx::{query::QueryAs, sqlite::SqliteArguments, Sqlite};

use super::summary::ListingSummary;

const SUMMARY_SELECT: &str = r#"
    SELECT
        users.fullname AS host_name,
        host_listings.id AS property_id,
        host_listings.title AS property_title,
        host_listings.description AS property_description,
        host_listings.price_per_night AS property_price_per_night,
        host_listings.property_type AS property_type,
        host_listings.images AS images,
        host_listings.available_from AS available_from
    FROM users
    JOIN host_listings ON users.id = host_listings.user_id
    WHERE 1=1"#;

const COUNT_SELECT: &str = r#"
    SELECT COUNT(*)
    FROM users
    JOIN host_listings ON users.id = host_listings.user_id
    WHERE 1=1"#;

const LOCATION_CONDITION: &str = r#"
    AND (
        host_listings.location LIKE ? ESCAPE '\'
        OR host_listings.county LIKE ? ESCAPE '\'
        OR host_listings.city LIKE ? ESCAPE '\'
    )"#;

/// Search inputs; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Substring matched against location, county and city
    pub location: Option<String>,

    /// Inclusive upper bound on the nightly price
    pub max_price: Option<f64>,

    /// Exact property type
    pub property_type: Option<PropertyType>,
}

/// Bound parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum FilterParam {
    Text(String),
    Real(f64),
}

/// Finished pair of statements plus their shared parameters
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub listing_sql: String,
    pub count_sql: String,
    pub params: Vec<FilterParam>,
    pub filters_applied: usize,
}

/// Search results with the total match count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub results: Vec<ListingSummary>,
    pub total_count: i64,
}

/// Incrementally composes the listing and count queries
#[derive(Debug, Clone, Default)]
pub struct SearchFilterBuilder {
    conditions: String,
    params: Vec<FilterParam>,
    filters_applied: usize,
}

impl SearchFilterBuilder {
    /// Starts from the unfiltered base predicate
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-loaded with every field of `filter`
    pub fn from_filter(filter: &SearchFilter) -> Self {
        Self::new()
            .location(filter.location.as_deref())
            .max_price(filter.max_price)
            .property_type(filter.property_type)
    }

    /// Case-insensitive substring match on location, county or city
    ///
    /// Blank terms are ignored. `%` and `_` in the term match literally.
    pub fn location(mut self, term: Option<&str>) -> Self {
        let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
            return self;
        };

        let pattern = format!("%{}%", escape_like(term));
        self.conditions.push_str(LOCATION_CONDITION);
        for _ in 0..3 {
            self.params.push(FilterParam::Text(pattern.clone()));
        }
        self.filters_applied += 1;
        self
    }

    /// Inclusive ceiling on `price_per_night`
    pub fn max_price(mut self, price: Option<f64>) -> Self {
        if let Some(price) = price {
            self.conditions
                .push_str("\n    AND host_listings.price_per_night <= ?");
            self.params.push(FilterParam::Real(price));
            self.filters_applied += 1;
        }
        self
    }

    /// Exact property type match
    pub fn property_type(mut self, kind: Option<PropertyType>) -> Self {
        if let Some(kind) = kind {
            self.conditions
                .push_str("\n    AND host_listings.property_type = ?");
            self.params.push(FilterParam::Text(kind.as_str().to_string()));
            self.filters_applied += 1;
        }
        self
    }

    pub fn build(self) -> SearchQuery {
        SearchQuery {
            listing_sql: format!(
                "{}{}\n    ORDER BY host_listings.id",
                SUMMARY_SELECT, self.conditions
            ),
            count_sql: format!("{}{}", COUNT_SELECT, self.conditions),
            params: self.params,
            filters_applied: self.filters_applied,
        }
    }
}

/// Binds `params` in order onto a prepared query
pub(crate) fn bind_params<'q, O>(
    mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    params: &'q [FilterParam],
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            FilterParam::Text(value) => query.bind(value.as_str()),
            FilterParam::Real(value) => query.bind(*value),
        };
    }
    query
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
