//! Artist routes

use axum::{
    extract::State,
    http::StatusCode,
    response::{Redirect, Response},
    Json,
};
use fyyur_common::db::{Artist, EntityRef};
use fyyur_common::time::{self, partition_by_start_time};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{error, info, warn};

use super::response::ActionResponse;
use super::search::{SearchForm, SearchResponse};
use crate::db::artists::{self, ArtistShow};
use crate::error::{ApiError, ApiResult};
use crate::extract::{FormBody, RecordId};
use crate::forms::{ArtistForm, FormPage, FormPairs};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ArtistListResponse {
    pub artists: Vec<EntityRef>,
}

/// Artist with its shows split around the current time
#[derive(Debug, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// GET /artists
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Json<ArtistListResponse>> {
    let artists = artists::list_all(&state.db).await?;
    Ok(Json(ArtistListResponse { artists }))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    FormBody(form): FormBody<SearchForm>,
) -> ApiResult<Json<SearchResponse>> {
    let data = artists::search_by_name(&state.db, &form.search_term).await?;
    Ok(Json(SearchResponse::new(form.search_term, data)))
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
) -> ApiResult<Json<ArtistDetail>> {
    let artist = artists::find_by_id(&state.db, artist_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Artist {} not found", artist_id)))?;

    let shows = artists::shows_for_artist(&state.db, artist_id).await?;
    let (past_shows, upcoming_shows) =
        partition_by_start_time(shows, &time::now(), |show| &show.start_time);

    Ok(Json(ArtistDetail {
        artist,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

/// GET /artists/create
pub async fn create_artist_form() -> Json<FormPage<Artist>> {
    Json(FormPage::artist("/artists/create".to_string(), None))
}

/// POST /artists/create
pub async fn create_artist_submission(
    State(state): State<AppState>,
    FormBody(pairs): FormBody<FormPairs>,
) -> ApiResult<Response> {
    let form = ArtistForm::from_pairs(&pairs)?;

    match insert_artist(&state.db, &form).await {
        Ok(id) => {
            info!("Artist '{}' listed with id {}", form.name, id);
            Ok(ActionResponse::created(
                format!("Artist {} was successfully listed!", form.name),
                id,
            ))
        }
        Err(e) => {
            error!("Failed to list artist '{}': {}", form.name, e);
            Ok(ActionResponse::failed(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: Artist {} was not successfully listed!", form.name),
            ))
        }
    }
}

async fn insert_artist(pool: &SqlitePool, form: &ArtistForm) -> fyyur_common::Result<i64> {
    let mut tx = pool.begin().await?;
    let id = artists::insert(&mut *tx, form).await?;
    tx.commit().await?;
    Ok(id)
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
) -> ApiResult<Json<FormPage<Artist>>> {
    let artist = artists::find_by_id(&state.db, artist_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Artist {} not found", artist_id)))?;

    Ok(Json(FormPage::artist(
        format!("/artists/{}/edit", artist_id),
        Some(artist),
    )))
}

/// POST /artists/:id/edit
///
/// Always redirects to the detail page; failures are only logged.
pub async fn edit_artist_submission(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
    FormBody(pairs): FormBody<FormPairs>,
) -> Redirect {
    match ArtistForm::from_pairs(&pairs) {
        Ok(form) => match update_artist(&state.db, artist_id, &form).await {
            Ok(()) => info!("Artist {} updated", artist_id),
            Err(e) => warn!("Artist {} not updated: {}", artist_id, e),
        },
        Err(e) => warn!("Artist {} not updated: {}", artist_id, e),
    }

    Redirect::to(&format!("/artists/{}", artist_id))
}

async fn update_artist(pool: &SqlitePool, artist_id: i64, form: &ArtistForm) -> fyyur_common::Result<()> {
    let mut tx = pool.begin().await?;
    if !artists::update(&mut *tx, artist_id, form).await? {
        return Err(fyyur_common::Error::artist_not_found(artist_id));
    }
    tx.commit().await?;
    Ok(())
}
