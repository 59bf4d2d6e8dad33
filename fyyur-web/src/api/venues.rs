//! Venue routes
//!
//! Listing grouped by area, search, detail with past/upcoming shows,
//! create, edit and delete.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Redirect, Response},
    Json,
};
use fyyur_common::db::Venue;
use fyyur_common::time::{self, partition_by_start_time};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{error, info, warn};

use super::response::ActionResponse;
use super::search::{SearchForm, SearchResponse};
use crate::db::venues::{self, VenueShow, VenueSummary};
use crate::error::{ApiError, ApiResult};
use crate::extract::{FormBody, RecordId};
use crate::forms::{FormPage, FormPairs, VenueForm};
use crate::AppState;

/// Venues sharing one (city, state) pair
#[derive(Debug, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Serialize)]
pub struct VenueListResponse {
    pub areas: Vec<Area>,
}

/// Venue with its shows split around the current time
#[derive(Debug, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// GET /venues
pub async fn list_venues(State(state): State<AppState>) -> ApiResult<Json<VenueListResponse>> {
    let now = time::now();
    let mut areas = Vec::new();

    for (city, area_state) in venues::list_areas(&state.db).await? {
        let area_venues = venues::list_in_area(&state.db, &city, &area_state, &now).await?;
        areas.push(Area {
            city,
            state: area_state,
            venues: area_venues,
        });
    }

    Ok(Json(VenueListResponse { areas }))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    FormBody(form): FormBody<SearchForm>,
) -> ApiResult<Json<SearchResponse>> {
    let data = venues::search_by_name(&state.db, &form.search_term).await?;
    Ok(Json(SearchResponse::new(form.search_term, data)))
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
) -> ApiResult<Json<VenueDetail>> {
    let venue = venues::find_by_id(&state.db, venue_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Venue {} not found", venue_id)))?;

    let shows = venues::shows_for_venue(&state.db, venue_id).await?;
    let (past_shows, upcoming_shows) =
        partition_by_start_time(shows, &time::now(), |show| &show.start_time);

    Ok(Json(VenueDetail {
        venue,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

/// GET /venues/create
pub async fn create_venue_form() -> Json<FormPage<Venue>> {
    Json(FormPage::venue("/venues/create".to_string(), None))
}

/// POST /venues/create
///
/// 201 with the new id, or 500 after rolling back.
pub async fn create_venue_submission(
    State(state): State<AppState>,
    FormBody(pairs): FormBody<FormPairs>,
) -> ApiResult<Response> {
    let form = VenueForm::from_pairs(&pairs)?;

    match insert_venue(&state.db, &form).await {
        Ok(id) => {
            info!("Venue '{}' listed with id {}", form.name, id);
            Ok(ActionResponse::created(
                format!("Venue {} was successfully listed!", form.name),
                id,
            ))
        }
        Err(e) => {
            error!("Failed to list venue '{}': {}", form.name, e);
            Ok(ActionResponse::failed(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: Venue {} was not successfully listed!", form.name),
            ))
        }
    }
}

async fn insert_venue(pool: &SqlitePool, form: &VenueForm) -> fyyur_common::Result<i64> {
    let mut tx = pool.begin().await?;
    let id = venues::insert(&mut *tx, form).await?;
    tx.commit().await?;
    Ok(id)
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
) -> ApiResult<Json<FormPage<Venue>>> {
    let venue = venues::find_by_id(&state.db, venue_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Venue {} not found", venue_id)))?;

    Ok(Json(FormPage::venue(
        format!("/venues/{}/edit", venue_id),
        Some(venue),
    )))
}

/// POST /venues/:id/edit
///
/// Always redirects to the detail page; failures are only logged.
pub async fn edit_venue_submission(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
    FormBody(pairs): FormBody<FormPairs>,
) -> Redirect {
    match VenueForm::from_pairs(&pairs) {
        Ok(form) => match update_venue(&state.db, venue_id, &form).await {
            Ok(()) => info!("Venue {} updated", venue_id),
            Err(e) => warn!("Venue {} not updated: {}", venue_id, e),
        },
        Err(e) => warn!("Venue {} not updated: {}", venue_id, e),
    }

    Redirect::to(&format!("/venues/{}", venue_id))
}

async fn update_venue(pool: &SqlitePool, venue_id: i64, form: &VenueForm) -> fyyur_common::Result<()> {
    let mut tx = pool.begin().await?;
    if !venues::update(&mut *tx, venue_id, form).await? {
        return Err(fyyur_common::Error::venue_not_found(venue_id));
    }
    tx.commit().await?;
    Ok(())
}

/// DELETE /venues/:id
pub async fn delete_venue(State(state): State<AppState>, RecordId(venue_id): RecordId) -> Response {
    match remove_venue(&state.db, venue_id).await {
        Ok(Some(name)) => {
            info!("Venue {} ('{}') deleted", venue_id, name);
            ActionResponse::deleted(format!("Venue {} was successfully deleted!", name), "/venues")
        }
        Ok(None) => ActionResponse::failed(
            StatusCode::NOT_FOUND,
            format!("Venue {} was not found", venue_id),
        ),
        Err(e) => {
            error!("Failed to delete venue {}: {}", venue_id, e);
            ActionResponse::failed(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Venue {} was NOT successfully deleted!", venue_id),
            )
        }
    }
}

/// Returns the deleted venue's name, or `None` when it did not exist
async fn remove_venue(pool: &SqlitePool, venue_id: i64) -> fyyur_common::Result<Option<String>> {
    let mut tx = pool.begin().await?;
    let Some(venue) = venues::find_by_id(&mut *tx, venue_id).await? else {
        return Ok(None);
    };
    venues::delete(&mut *tx, venue_id).await?;
    tx.commit().await?;
    Ok(Some(venue.name))
}
