//! # Lodge Shared Library
//!
//! Domain types, storage access and booking pipelines used by the Lodge
//! API server.
//!
//! ## Module Organization
//!
//! - `db`: SQLite pool and embedded migrations
//! - `models`: users, listings, listing images and features
//! - `auth`: password hashing, access tokens, request auth context
//! - `catalog`: landing buckets, search, place detail
//! - `pricing`: stay price calculation
//! - `payment`: mobile-money QR codes

pub mod auth;
pub mod catalog;
pub mod db;
pub mod models;
pub mod payment;
pub mod pricing;

/// Current version of the Lodge shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
