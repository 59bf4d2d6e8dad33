//! Show queries

use chrono::NaiveDateTime;
use fyyur_common::time::format_start_time;
use fyyur_common::Result;
use serde::Serialize;
use sqlx::{FromRow, SqliteConnection, SqlitePool};

use crate::forms::ShowForm;

/// Row of the show listing: show joined with its venue and artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    #[serde(serialize_with = "fyyur_common::time::serialize_start_time")]
    pub start_time: NaiveDateTime,
}

/// Every show with its venue and artist (inner join, unfiltered)
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let shows = sqlx::query_as::<_, ShowListing>(
        r#"
        SELECT v.id AS venue_id, v.name AS venue_name,
               a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
               s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        JOIN artists a ON a.id = s.artist_id
        ORDER BY s.id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(shows)
}

/// Insert a show, returning its new id
///
/// Unknown artist or venue ids fail with a foreign key violation.
pub async fn insert(conn: &mut SqliteConnection, form: &ShowForm) -> Result<i64> {
    let result = sqlx::query("INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?, ?, ?)")
        .bind(form.artist_id)
        .bind(form.venue_id)
        .bind(format_start_time(&form.start_time))
        .execute(conn)
        .await?;

    Ok(result.last_insert_rowid())
}
