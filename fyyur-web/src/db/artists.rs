//! Artist queries

use chrono::NaiveDateTime;
use fyyur_common::db::{encode_genres, Artist, EntityRef};
use fyyur_common::Result;
use serde::Serialize;
use sqlx::{Executor, FromRow, Sqlite, SqliteConnection, SqlitePool};

use crate::forms::ArtistForm;

/// A show by an artist, joined with the hosting venue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    #[serde(serialize_with = "fyyur_common::time::serialize_start_time")]
    pub start_time: NaiveDateTime,
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<EntityRef>> {
    let artists = sqlx::query_as::<_, EntityRef>("SELECT id, name FROM artists ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(artists)
}

/// Case-insensitive substring search on artist name
pub async fn search_by_name(pool: &SqlitePool, term: &str) -> Result<Vec<EntityRef>> {
    // SQLite's LIKE only folds ASCII case, so matching happens in Rust
    let candidates =
        sqlx::query_as::<_, EntityRef>("SELECT id, name FROM artists ORDER BY id")
            .fetch_all(pool)
            .await?;
    Ok(super::filter_by_name(candidates, term))
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Artist>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let artist = sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(artist)
}

/// All shows by an artist, in insertion order
pub async fn shows_for_artist(pool: &SqlitePool, artist_id: i64) -> Result<Vec<ArtistShow>> {
    let shows = sqlx::query_as::<_, ArtistShow>(
        r#"
        SELECT s.venue_id, v.name AS venue_name, v.image_link AS venue_image_link, s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        WHERE s.artist_id = ?
        ORDER BY s.id
        "#,
    )
    .bind(artist_id)
    .fetch_all(pool)
    .await?;
    Ok(shows)
}

/// Insert an artist, returning its new id
pub async fn insert(conn: &mut SqliteConnection, form: &ArtistForm) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO artists (name, city, state, phone, website, facebook_link,
                             genres, image_link, seeking_venue, seeking_description)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&form.name)
    .bind(&form.city)
    .bind(&form.state)
    .bind(&form.phone)
    .bind(&form.website)
    .bind(&form.facebook_link)
    .bind(encode_genres(&form.genres)?)
    .bind(&form.image_link)
    .bind(form.seeking_venue)
    .bind(&form.seeking_description)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Overwrite every editable field; returns false when no artist has `id`
pub async fn update(conn: &mut SqliteConnection, id: i64, form: &ArtistForm) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE artists
        SET name = ?, city = ?, state = ?, phone = ?, website = ?, facebook_link = ?,
            genres = ?, image_link = ?, seeking_venue = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&form.name)
    .bind(&form.city)
    .bind(&form.state)
    .bind(&form.phone)
    .bind(&form.website)
    .bind(&form.facebook_link)
    .bind(encode_genres(&form.genres)?)
    .bind(&form.image_link)
    .bind(form.seeking_venue)
    .bind(&form.seeking_description)
    .bind(id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}
