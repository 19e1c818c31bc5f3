/// HTTP routing
use crate::{api, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router with tracing and permissive CORS
pub fn create_router(app_state: AppState) -> Router {
    let games = get(api::games::list_games).post(api::games::create_game);

    Router::new()
        .route("/", get(api::health::root))
        .route("/health", get(api::health::health))
        // Catalog
        .route("/games", games.clone())
        .route("/games/", games)
        .route(
            "/games/:id",
            get(api::games::get_game)
                .put(api::games::update_game)
                .delete(api::games::delete_game),
        )
        .route("/games/stats/summary", get(api::games::stats))
        // Providers
        .route(
            "/games/search/:provider",
            get(api::games::search_provider),
        )
        .route(
            "/games/import/:provider/:external_id",
            post(api::games::import_game),
        )
        .route(
            "/games/reference/:provider/:kind",
            get(api::games::reference_list),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
