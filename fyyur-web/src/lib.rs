//! fyyur-web library - venue/artist/show booking service
//!
//! Routes return JSON payloads; mutating routes run in a single database
//! transaction per request.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod extract;
pub mod forms;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let venues = Router::new()
        .route("/venues", get(api::list_venues))
        .route("/venues/search", post(api::search_venues))
        .route(
            "/venues/create",
            get(api::create_venue_form).post(api::create_venue_submission),
        )
        .route("/venues/:id", get(api::show_venue).delete(api::delete_venue))
        .route(
            "/venues/:id/edit",
            get(api::edit_venue_form).post(api::edit_venue_submission),
        );

    let artists = Router::new()
        .route("/artists", get(api::list_artists))
        .route("/artists/search", post(api::search_artists))
        .route(
            "/artists/create",
            get(api::create_artist_form).post(api::create_artist_submission),
        )
        .route("/artists/:id", get(api::show_artist))
        .route(
            "/artists/:id/edit",
            get(api::edit_artist_form).post(api::edit_artist_submission),
        );

    let shows = Router::new()
        .route("/shows", get(api::list_shows))
        .route(
            "/shows/create",
            get(api::create_show_form).post(api::create_show_submission),
        );

    let public = Router::new()
        .route("/", get(api::serve_home))
        .merge(api::status_routes());

    Router::new()
        .merge(venues)
        .merge(artists)
        .merge(shows)
        .merge(public)
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
