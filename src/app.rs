use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::AppConfig;
use crate::routes::{system_routes, user_routes};
use crate::state::users::UserStore;

/// Build the complete Axum application:
/// - /users    (user records)
/// - /system   (alive + version)
pub fn build_app(store: UserStore, cfg: AppConfig) -> Router {
    Router::new()
        .nest("/users", user_routes::routes(store))
        .nest("/system", system_routes::routes(cfg))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
