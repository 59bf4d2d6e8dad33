//! Show routes

use axum::{extract::State, http::StatusCode, response::Response, Json};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{error, info, warn};

use super::response::ActionResponse;
use crate::db::shows::{self, ShowListing};
use crate::error::ApiResult;
use crate::extract::FormBody;
use crate::forms::{FormPage, FormPairs, ShowForm};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ShowListResponse {
    pub shows: Vec<ShowListing>,
}

/// GET /shows
pub async fn list_shows(State(state): State<AppState>) -> ApiResult<Json<ShowListResponse>> {
    let shows = shows::list_all(&state.db).await?;
    Ok(Json(ShowListResponse { shows }))
}

/// GET /shows/create
pub async fn create_show_form() -> Json<FormPage<()>> {
    Json(FormPage::show("/shows/create".to_string()))
}

/// POST /shows/create
///
/// Artist and venue ids are not looked up first: an unknown id is rejected
/// by the foreign key constraint and reported as a failed listing.
pub async fn create_show_submission(
    State(state): State<AppState>,
    FormBody(pairs): FormBody<FormPairs>,
) -> ApiResult<Response> {
    let form = ShowForm::from_pairs(&pairs)?;

    match insert_show(&state.db, &form).await {
        Ok(id) => {
            info!(
                "Show {} listed (artist {}, venue {})",
                id, form.artist_id, form.venue_id
            );
            Ok(ActionResponse::created("Show was successfully listed!".to_string(), id))
        }
        Err(e) => {
            if e.is_constraint_violation() {
                warn!(
                    "Show rejected: artist {} or venue {} does not exist ({})",
                    form.artist_id, form.venue_id, e
                );
            } else {
                error!(
                    "Failed to list show (artist {}, venue {}): {}",
                    form.artist_id, form.venue_id, e
                );
            }
            Ok(ActionResponse::failed(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error: Show was NOT successfully listed!".to_string(),
            ))
        }
    }
}

async fn insert_show(pool: &SqlitePool, form: &ShowForm) -> fyyur_common::Result<i64> {
    let mut tx = pool.begin().await?;
    let id = shows::insert(&mut *tx, form).await?;
    tx.commit().await?;
    Ok(id)
}
