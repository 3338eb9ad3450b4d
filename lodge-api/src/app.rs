/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use lodge_api::{app::{build_router, AppState}, config::Config};
/// use lodge_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     ..Default::default()
/// })
/// .await?;
///
/// let app = build_router(AppState::new(pool, config));
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:5600").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use lodge_shared::{auth::middleware::authenticate, catalog::ListingRepository, payment::PaymentQrGenerator};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler through Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
    pub listings: ListingRepository,
    pub payments: PaymentQrGenerator,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Config) -> Self {
        let payments = PaymentQrGenerator::new(
            config.payment.orange_money_number.clone(),
            config.payment.mobile_money_number.clone(),
        );

        Self {
            listings: ListingRepository::new(db.clone()),
            db,
            config: Arc::new(config),
            payments,
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET /health
/// └── /v1/
///     ├── POST /auth/signup
///     ├── POST /auth/login
///     ├── GET  /users/me            (login required)
///     ├── POST /pricing/calculate
///     ├── GET  /places
///     ├── GET  /places/search
///     ├── GET  /places/:id
///     └── GET  /payment             (login required)
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let auth_routes = Router::new()
        .route("/signup", post(routes::auth::signup))
        .route("/login", post(routes::auth::login));

    let place_routes = Router::new()
        .route("/", get(routes::places::list_all))
        .route("/search", get(routes::places::search))
        .route("/:id", get(routes::places::detail));

    let protected_routes = Router::new()
        .route("/users/me", get(routes::auth::me))
        .route("/payment", get(routes::payment::payment))
        .layer(axum::middleware::from_fn_with_state(state.clone(), require_login));

    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/places", place_routes)
        .route("/pricing/calculate", post(routes::pricing::calculate))
        .merge(protected_routes);

    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// Rejects requests without a valid access token
///
/// On success the caller's `AuthContext` is stored in the request
/// extensions for handlers to extract.
async fn require_login(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let context = authenticate(req.headers(), state.jwt_secret())?;

    tracing::debug!(user_id = context.user_id, "Authenticated request");
    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}
