/// Middleware modules for the API server
///
/// - `security`: hardening headers on every response
///
/// The login check lives next to the router in `app`, since it needs the
/// application state.

pub mod security;
