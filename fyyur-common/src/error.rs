//! Error type shared by the Fyyur crates

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The `genres` column held (or would hold) something other than a JSON string array
    #[error("Genre list encoding error: {0}")]
    Genres(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// No venue, artist or show with this id
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Submitted value rejected before reaching the database
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub fn venue_not_found(id: i64) -> Self {
        Error::NotFound { entity: "Venue", id }
    }

    pub fn artist_not_found(id: i64) -> Self {
        Error::NotFound { entity: "Artist", id }
    }

    /// True when a foreign key or other constraint rejected a write
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Error::Database(sqlx::Error::Database(db_err))
                if !matches!(db_err.kind(), sqlx::error::ErrorKind::Other)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity() {
        assert_eq!(Error::venue_not_found(7).to_string(), "Venue 7 not found");
        assert_eq!(Error::artist_not_found(3).to_string(), "Artist 3 not found");
    }

    #[test]
    fn test_non_database_error_is_not_constraint_violation() {
        assert!(!Error::Config("x".to_string()).is_constraint_violation());
        assert!(!Error::Database(sqlx::Error::RowNotFound).is_constraint_violation());
    }
}
