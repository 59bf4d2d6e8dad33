//! Venue queries

use chrono::NaiveDateTime;
use fyyur_common::db::{encode_genres, EntityRef, Venue};
use fyyur_common::time::format_start_time;
use fyyur_common::Result;
use serde::Serialize;
use sqlx::{Executor, FromRow, Sqlite, SqliteConnection, SqlitePool};

use crate::forms::VenueForm;

/// Venue line in the grouped listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// A show at a venue, joined with the performing artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    #[serde(serialize_with = "fyyur_common::time::serialize_start_time")]
    pub start_time: NaiveDateTime,
}

/// Distinct (city, state) pairs that have at least one venue
pub async fn list_areas(pool: &SqlitePool) -> Result<Vec<(String, String)>> {
    let areas = sqlx::query_as::<_, (String, String)>("SELECT DISTINCT city, state FROM venues")
        .fetch_all(pool)
        .await?;
    Ok(areas)
}

/// Venues in one area with their upcoming show counts
pub async fn list_in_area(
    pool: &SqlitePool,
    city: &str,
    state: &str,
    now: &NaiveDateTime,
) -> Result<Vec<VenueSummary>> {
    let venues = sqlx::query_as::<_, VenueSummary>(
        r#"
        SELECT v.id, v.name,
               (SELECT COUNT(*) FROM shows s
                 WHERE s.venue_id = v.id AND s.start_time >= ?) AS num_upcoming_shows
        FROM venues v
        WHERE v.city = ? AND v.state = ?
        ORDER BY v.id
        "#,
    )
    .bind(format_start_time(now))
    .bind(city)
    .bind(state)
    .fetch_all(pool)
    .await?;
    Ok(venues)
}

/// Case-insensitive substring search on venue name
pub async fn search_by_name(pool: &SqlitePool, term: &str) -> Result<Vec<EntityRef>> {
    // SQLite's LIKE only folds ASCII case, so matching happens in Rust
    let candidates =
        sqlx::query_as::<_, EntityRef>("SELECT id, name FROM venues ORDER BY id")
            .fetch_all(pool)
            .await?;
    Ok(super::filter_by_name(candidates, term))
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Venue>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let venue = sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(venue)
}

/// All shows at a venue, in insertion order
pub async fn shows_for_venue(pool: &SqlitePool, venue_id: i64) -> Result<Vec<VenueShow>> {
    let shows = sqlx::query_as::<_, VenueShow>(
        r#"
        SELECT s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link, s.start_time
        FROM shows s
        JOIN artists a ON a.id = s.artist_id
        WHERE s.venue_id = ?
        ORDER BY s.id
        "#,
    )
    .bind(venue_id)
    .fetch_all(pool)
    .await?;
    Ok(shows)
}

/// Insert a venue, returning its new id
pub async fn insert(conn: &mut SqliteConnection, form: &VenueForm) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO venues (name, city, state, address, phone, website, facebook_link,
                            genres, image_link, seeking_talent, seeking_description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&form.name)
    .bind(&form.city)
    .bind(&form.state)
    .bind(&form.address)
    .bind(&form.phone)
    .bind(&form.website)
    .bind(&form.facebook_link)
    .bind(encode_genres(&form.genres)?)
    .bind(&form.image_link)
    .bind(form.seeking_talent)
    .bind(&form.seeking_description)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Overwrite every editable field; returns false when no venue has `id`
pub async fn update(conn: &mut SqliteConnection, id: i64, form: &VenueForm) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE venues
        SET name = ?, city = ?, state = ?, address = ?, phone = ?, website = ?,
            facebook_link = ?, genres = ?, image_link = ?, seeking_talent = ?,
            seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&form.name)
    .bind(&form.city)
    .bind(&form.state)
    .bind(&form.address)
    .bind(&form.phone)
    .bind(&form.website)
    .bind(&form.facebook_link)
    .bind(encode_genres(&form.genres)?)
    .bind(&form.image_link)
    .bind(form.seeking_talent)
    .bind(&form.seeking_description)
    .bind(id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a venue (its shows cascade); returns false when absent
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}
