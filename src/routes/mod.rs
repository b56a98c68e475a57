pub mod favorites;
pub mod home;
pub mod people;
pub mod planets;
pub mod users;

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Every route the API serves, as `(method, path)`. Rendered by the sitemap at `/`.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("GET", "/"),
    ("GET", "/users"),
    ("POST", "/users"),
    ("GET", "/users/favorites/{user_id}"),
    ("GET", "/planets"),
    ("PUT", "/planets"),
    ("GET", "/planets/{id}"),
    ("DELETE", "/planets/{id}"),
    ("GET", "/people"),
    ("GET", "/people/{id}"),
    ("POST", "/favorite/planet/{id}"),
    ("DELETE", "/favorite/planet/{id}"),
    ("POST", "/favorite/people/{id}"),
    ("DELETE", "/favorite/people/{id}"),
];

/// The full application: all resource routers plus tracing and CORS.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::sitemap))
        .merge(users::router())
        .merge(planets::router())
        .merge(people::router())
        .merge(favorites::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
