//! Common test utilities for API integration tests
//!
//! - In-memory database with migrations applied
//! - A logged-in guest user and its access token
//! - Listing seed helpers and a request helper returning parsed JSON

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use lodge_api::app::{build_router, AppState};
use lodge_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig, PaymentConfig};
use lodge_shared::auth::jwt::{create_token, Claims};
use lodge_shared::auth::password::hash_password;
use lodge_shared::db::migrations::run_migrations;
use lodge_shared::db::pool::{create_pool, DatabaseConfig as PoolConfig};
use lodge_shared::models::listing::{CreateListing, Listing, PropertyType};
use lodge_shared::models::listing_feature::{CreateListingFeature, ListingFeature};
use lodge_shared::models::listing_image::ListingImage;
use lodge_shared::models::user::{CreateUser, User, UserRole};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::Service as _;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";
pub const TEST_PASSWORD: &str = "Monrovia2024";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
    pub config: Config,
    pub user: User,
    pub jwt_token: String,
}

impl TestContext {
    /// Fresh database, app and logged-in guest
    pub async fn new() -> anyhow::Result<Self> {
        let config = test_config();

        let db = create_pool(PoolConfig::in_memory()).await?;
        run_migrations(&db).await?;

        let user = User::create(
            &db,
            CreateUser {
                role: UserRole::Guest,
                fullname: "Test Guest".to_string(),
                phone_number: "0770000001".to_string(),
                email: "guest@example.com".to_string(),
                username: "guest".to_string(),
                password_hash: hash_password(TEST_PASSWORD)?,
                profile_picture: None,
            },
        )
        .await?;

        let claims = Claims::new(user.id, user.username.clone(), UserRole::Guest);
        let jwt_token = create_token(&claims, &config.jwt.secret)?;

        let app = build_router(AppState::new(db.clone(), config.clone()));

        Ok(TestContext {
            db,
            app,
            config,
            user,
            jwt_token,
        })
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Sends a request and returns the status plus the JSON body
    ///
    /// An empty or non-JSON body comes back as `Value::Null`.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn get_authed(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri(uri)
                .header("authorization", self.auth_header())
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Host account owning seeded listings
    pub async fn create_host(&self, username: &str) -> User {
        User::create(
            &self.db,
            CreateUser {
                role: UserRole::Host,
                fullname: format!("Host {}", username),
                phone_number: "0880000000".to_string(),
                email: format!("{}@hosts.example.com", username),
                username: username.to_string(),
                password_hash: hash_password(TEST_PASSWORD).unwrap(),
                profile_picture: Some(b"face".to_vec()),
            },
        )
        .await
        .unwrap()
    }

    pub async fn create_listing(
        &self,
        host: &User,
        title: &str,
        kind: PropertyType,
        price: f64,
        city: &str,
    ) -> Listing {
        Listing::create(
            &self.db,
            CreateListing {
                user_id: host.id,
                title: title.to_string(),
                description: Some(format!("{} description", title)),
                detail_description: Some("Close to the beach".to_string()),
                location: format!("{} Central", city),
                county: "Montserrado".to_string(),
                city: city.to_string(),
                price_per_night: price,
                max_guests: Some(2),
                amenities: Some("Wifi".to_string()),
                available_from: NaiveDate::from_ymd_opt(2024, 7, 4),
                available_to: NaiveDate::from_ymd_opt(2024, 9, 30),
                property_type: kind,
                min_stay_days: Some(2),
                primary_image: Some(b"cover".to_vec()),
            },
        )
        .await
        .unwrap()
    }

    pub async fn add_image(&self, listing: &Listing, data: Option<&[u8]>) {
        ListingImage::create(&self.db, listing.id, data.map(<[u8]>::to_vec))
            .await
            .unwrap();
    }

    pub async fn add_feature(&self, listing: &Listing, feature: &str) {
        ListingFeature::create(
            &self.db,
            CreateListingFeature {
                place_id: listing.id,
                feature: feature.to_string(),
                feature_type: None,
                feature_description: None,
            },
        )
        .await
        .unwrap();
    }
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 5600,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
        payment: PaymentConfig::default(),
    }
}
