//! Shared fixtures for lodge-shared integration tests
//!
//! Every test gets its own in-memory database with the schema applied, plus
//! helpers to seed hosts, listings, images and features.

#![allow(dead_code)]

use chrono::NaiveDate;
use lodge_shared::db::migrations::run_migrations;
use lodge_shared::db::pool::{create_pool, DatabaseConfig};
use lodge_shared::models::listing::{CreateListing, Listing, PropertyType};
use lodge_shared::models::listing_feature::{CreateListingFeature, ListingFeature};
use lodge_shared::models::listing_image::ListingImage;
use lodge_shared::models::user::{CreateUser, User, UserRole};
use sqlx::SqlitePool;

/// Fresh in-memory store with migrations applied
pub async fn setup_pool() -> SqlitePool {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("in-memory pool");
    run_migrations(&pool).await.expect("migrations");
    pool
}

pub async fn create_host(pool: &SqlitePool, username: &str, fullname: &str) -> User {
    User::create(
        pool,
        CreateUser {
            role: UserRole::Host,
            fullname: fullname.to_string(),
            phone_number: "0770000000".to_string(),
            email: format!("{}@example.com", username),
            username: username.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            profile_picture: None,
        },
    )
    .await
    .expect("create host")
}

/// Listing fields tests usually care about
pub struct ListingSeed<'a> {
    pub title: &'a str,
    pub kind: PropertyType,
    pub price: f64,
    pub location: &'a str,
    pub county: &'a str,
    pub city: &'a str,
    pub available_from: Option<NaiveDate>,
    pub primary_image: Option<Vec<u8>>,
}

impl Default for ListingSeed<'_> {
    fn default() -> Self {
        Self {
            title: "Listing",
            kind: PropertyType::Apartment,
            price: 50.0,
            location: "Sinkor",
            county: "Montserrado",
            city: "Monrovia",
            available_from: NaiveDate::from_ymd_opt(2024, 3, 15),
            primary_image: None,
        }
    }
}

pub async fn create_listing(pool: &SqlitePool, host: &User, seed: ListingSeed<'_>) -> Listing {
    Listing::create(
        pool,
        CreateListing {
            user_id: host.id,
            title: seed.title.to_string(),
            description: Some(format!("{} description", seed.title)),
            detail_description: None,
            location: seed.location.to_string(),
            county: seed.county.to_string(),
            city: seed.city.to_string(),
            price_per_night: seed.price,
            max_guests: Some(4),
            amenities: Some("Generator, Water".to_string()),
            available_from: seed.available_from,
            available_to: NaiveDate::from_ymd_opt(2024, 12, 31),
            property_type: seed.kind,
            min_stay_days: Some(1),
            primary_image: seed.primary_image,
        },
    )
    .await
    .expect("create listing")
}

pub async fn add_image(pool: &SqlitePool, listing: &Listing, data: Option<&[u8]>) {
    ListingImage::create(pool, listing.id, data.map(<[u8]>::to_vec))
        .await
        .expect("add image");
}

pub async fn add_feature(pool: &SqlitePool, listing: &Listing, feature: &str) {
    ListingFeature::create(
        pool,
        CreateListingFeature {
            place_id: listing.id,
            feature: feature.to_string(),
            feature_type: Some("amenity".to_string()),
            feature_description: None,
        },
    )
    .await
    .expect("add feature");
}

/// Seeds a small catalog covering every property type
///
/// | title              | type        | price | location    | city       |
/// |--------------------|-------------|-------|-------------|------------|
/// | Sinkor Apartment   | Apartment   | 60    | Sinkor      | Monrovia   |
/// | Congo Town House   | House       | 150   | Congo Town  | Monrovia   |
/// | Kakata Guest House | Guest House | 35    | Kakata      | Kakata     |
/// | Buchanan Room      | Room        | 20    | Buchanan    | Buchanan   |
/// | Robertsport Surf   | Experience  | 100   | Robertsport | Robertsport|
pub async fn seed_catalog(pool: &SqlitePool) -> Vec<Listing> {
    let host = create_host(pool, "kmensah", "Kwame Mensah").await;

    let seeds = [
        ("Sinkor Apartment", PropertyType::Apartment, 60.0, "Sinkor", "Montserrado", "Monrovia"),
        ("Congo Town House", PropertyType::House, 150.0, "Congo Town", "Montserrado", "Monrovia"),
        ("Kakata Guest House", PropertyType::GuestHouse, 35.0, "Kakata", "Margibi", "Kakata"),
        ("Buchanan Room", PropertyType::Room, 20.0, "Buchanan", "Grand Bassa", "Buchanan"),
        ("Robertsport Surf", PropertyType::Experience, 100.0, "Robertsport", "Grand Cape Mount", "Robertsport"),
    ];

    let mut listings = Vec::new();
    for (title, kind, price, location, county, city) in seeds {
        listings.push(
            create_listing(
                pool,
                &host,
                ListingSeed {
                    title,
                    kind,
                    price,
                    location,
                    county,
                    city,
                    ..Default::default()
                },
            )
            .await,
        );
    }
    listings
}
