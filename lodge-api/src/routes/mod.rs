/// API route handlers
///
/// - `health`: health check endpoint
/// - `auth`: signup, login and the current user
/// - `pricing`: stay price calculation
/// - `places`: landing buckets, search and place detail
/// - `payment`: payment QR codes for a booking

pub mod auth;
pub mod health;
pub mod payment;
pub mod places;
pub mod pricing;
