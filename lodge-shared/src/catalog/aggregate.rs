/// Landing-page buckets
///
/// The landing page shows every listing plus one row per property type.
/// All six buckets are cut from a single read so a listing created mid-way
/// can never show up in one bucket and be missing from another.

use crate::models::listing::PropertyType;
use serde::{Deserialize, Serialize};

use super::summary::ListingSummary;

/// Listings grouped for the landing page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LandingBuckets {
    pub all_places: Vec<ListingSummary>,
    pub apartments: Vec<ListingSummary>,
    pub houses: Vec<ListingSummary>,
    pub guest_houses: Vec<ListingSummary>,
    pub rooms: Vec<ListingSummary>,
    pub experiences: Vec<ListingSummary>,
}

impl LandingBuckets {
    /// Bucket holding listings of `kind`
    pub fn bucket(&self, kind: PropertyType) -> &[ListingSummary] {
        match kind {
            PropertyType::Apartment => &self.apartments,
            PropertyType::House => &self.houses,
            PropertyType::GuestHouse => &self.guest_houses,
            PropertyType::Room => &self.rooms,
            PropertyType::Experience => &self.experiences,
        }
    }

    fn bucket_mut(&mut self, kind: PropertyType) -> &mut Vec<ListingSummary> {
        match kind {
            PropertyType::Apartment => &mut self.apartments,
            PropertyType::House => &mut self.houses,
            PropertyType::GuestHouse => &mut self.guest_houses,
            PropertyType::Room => &mut self.rooms,
            PropertyType::Experience => &mut self.experiences,
        }
    }
}

/// Partitions one unfiltered listing set into landing buckets
pub struct ListingAggregator;

impl ListingAggregator {
    /// Splits `listings` by property type
    ///
    /// `all_places` keeps every listing in input order. A listing whose
    /// stored type matches no known label appears only in `all_places`.
    pub fn partition(listings: Vec<ListingSummary>) -> LandingBuckets {
        let mut buckets = LandingBuckets::default();

        for listing in &listings {
            if let Ok(kind) = listing.property_type.parse::<PropertyType>() {
                buckets.bucket_mut(kind).push(listing.clone());
            }
        }

        buckets.all_places = listings;
        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::summary::Availability;

    fn summary(id: i64, kind: &str) -> ListingSummary {
        ListingSummary {
            host_name: "Host".to_string(),
            host_place_id: id,
            property_title: format!("Place {}", id),
            property_description: None,
            property_price_per_night: 10.0 * id as f64,
            property_type: kind.to_string(),
            availability: Availability::default(),
            base64_image: None,
        }
    }

    fn ids(items: &[ListingSummary]) -> Vec<i64> {
        items.iter().map(|s| s.host_place_id).collect()
    }

    #[test]
    fn test_partition_by_type() {
        let buckets = ListingAggregator::partition(vec![
            summary(1, "Apartment"),
            summary(2, "House"),
            summary(3, "Guest House"),
            summary(4, "Apartment"),
            summary(5, "Experience"),
        ]);

        assert_eq!(buckets.all_places.len(), 5);
        assert_eq!(ids(&buckets.apartments), vec![1, 4]);
        assert_eq!(ids(&buckets.houses), vec![2]);
        assert_eq!(ids(&buckets.guest_houses), vec![3]);
        assert!(buckets.rooms.is_empty());
        assert_eq!(ids(buckets.bucket(PropertyType::Experience)), vec![5]);
    }

    #[test]
    fn test_typed_buckets_cover_all_places() {
        let buckets = ListingAggregator::partition(vec![
            summary(1, "Room"),
            summary(2, "Room"),
            summary(3, "House"),
        ]);

        let typed: usize = PropertyType::ALL
            .iter()
            .map(|kind| buckets.bucket(*kind).len())
            .sum();
        assert_eq!(typed, buckets.all_places.len());
    }

    #[test]
    fn test_empty_input() {
        let buckets = ListingAggregator::partition(Vec::new());
        assert!(buckets.all_places.is_empty());
        assert!(buckets.apartments.is_empty());
    }
}
