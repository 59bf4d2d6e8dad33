//! Typed request bodies for form submissions
//!
//! Browsers submit `application/x-www-form-urlencoded` bodies where
//! multi-select fields repeat their key (`genres=Jazz&genres=Blues`).
//! Handlers extract the raw pairs with `Form<Vec<(String, String)>>` and
//! convert them into the DTOs below.

use chrono::NaiveDateTime;
use fyyur_common::time::parse_start_time;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};

/// Raw submitted key/value pairs, in submission order
pub type FormPairs = Vec<(String, String)>;

/// Genres offered by the venue and artist forms
pub const GENRE_CHOICES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// US state codes offered by the venue and artist forms
pub const STATE_CHOICES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Lookup helper over submitted pairs
struct FormFields<'a> {
    pairs: &'a [(String, String)],
}

impl<'a> FormFields<'a> {
    fn new(pairs: &'a [(String, String)]) -> Self {
        Self { pairs }
    }

    fn first(&self, key: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Trimmed, non-blank value or 400
    fn required(&self, key: &str) -> ApiResult<String> {
        self.optional(key)
            .ok_or_else(|| ApiError::BadRequest(format!("Missing required field: {}", key)))
    }

    /// Trimmed value, `None` when absent or blank
    fn optional(&self, key: &str) -> Option<String> {
        self.first(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// Checkbox semantics: absent means false
    fn flag(&self, key: &str) -> bool {
        matches!(
            self.first(key).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
            Some("y" | "yes" | "on" | "true" | "1")
        )
    }

    fn id(&self, key: &str) -> ApiResult<i64> {
        let raw = self.required(key)?;
        raw.parse()
            .map_err(|_| ApiError::BadRequest(format!("Field {} must be an integer: {}", key, raw)))
    }

    fn state(&self) -> ApiResult<String> {
        let state = self.required("state")?.to_ascii_uppercase();
        if STATE_CHOICES.contains(&state.as_str()) {
            Ok(state)
        } else {
            Err(ApiError::BadRequest(format!("Unknown state: {}", state)))
        }
    }

    /// Selected genres, deduplicated, each one of [`GENRE_CHOICES`]
    fn genres(&self) -> ApiResult<Vec<String>> {
        let mut genres: Vec<String> = Vec::new();
        for genre in self.all("genres") {
            if !GENRE_CHOICES.contains(&genre.as_str()) {
                return Err(ApiError::BadRequest(format!("Unknown genre: {}", genre)));
            }
            if !genres.contains(&genre) {
                genres.push(genre);
            }
        }
        Ok(genres)
    }
}

/// Editable venue fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn from_pairs(pairs: &[(String, String)]) -> ApiResult<Self> {
        let fields = FormFields::new(pairs);
        Ok(Self {
            name: fields.required("name")?,
            city: fields.required("city")?,
            state: fields.state()?,
            address: fields.required("address")?,
            phone: fields.optional("phone"),
            website: fields.optional("website"),
            facebook_link: fields.optional("facebook_link"),
            genres: fields.genres()?,
            image_link: fields.optional("image_link"),
            seeking_talent: fields.flag("seeking_talent"),
            seeking_description: fields.optional("seeking_description"),
        })
    }
}

/// Editable artist fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn from_pairs(pairs: &[(String, String)]) -> ApiResult<Self> {
        let fields = FormFields::new(pairs);
        Ok(Self {
            name: fields.required("name")?,
            city: fields.required("city")?,
            state: fields.state()?,
            phone: fields.optional("phone"),
            website: fields.optional("website"),
            facebook_link: fields.optional("facebook_link"),
            genres: fields.genres()?,
            image_link: fields.optional("image_link"),
            seeking_venue: fields.flag("seeking_venue"),
            seeking_description: fields.optional("seeking_description"),
        })
    }
}

/// New show submission
///
/// The referenced ids are not checked here; the database rejects unknown ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowForm {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: NaiveDateTime,
}

impl ShowForm {
    pub fn from_pairs(pairs: &[(String, String)]) -> ApiResult<Self> {
        let fields = FormFields::new(pairs);
        Ok(Self {
            artist_id: fields.id("artist_id")?,
            venue_id: fields.id("venue_id")?,
            start_time: parse_start_time(&fields.required("start_time")?)?,
        })
    }
}

/// One input on a form page
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: &'static str,
    pub required: bool,
}

const fn field(name: &'static str, kind: &'static str, required: bool) -> FieldDescriptor {
    FieldDescriptor { name, kind, required }
}

/// Payload for GET form pages; `record` is set on edit pages
#[derive(Debug, Clone, Serialize)]
pub struct FormPage<T: Serialize> {
    pub form: &'static str,
    pub action: String,
    pub fields: Vec<FieldDescriptor>,
    pub genre_choices: &'static [&'static str],
    pub state_choices: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<T>,
}

impl<T: Serialize> FormPage<T> {
    pub fn venue(action: String, record: Option<T>) -> Self {
        Self {
            form: "venue",
            action,
            fields: vec![
                field("name", "text", true),
                field("city", "text", true),
                field("state", "select", true),
                field("address", "text", true),
                field("phone", "text", false),
                field("website", "text", false),
                field("facebook_link", "text", false),
                field("genres", "multiselect", false),
                field("image_link", "text", false),
                field("seeking_talent", "checkbox", false),
                field("seeking_description", "text", false),
            ],
            genre_choices: GENRE_CHOICES,
            state_choices: STATE_CHOICES,
            record,
        }
    }

    pub fn artist(action: String, record: Option<T>) -> Self {
        Self {
            form: "artist",
            action,
            fields: vec![
                field("name", "text", true),
                field("city", "text", true),
                field("state", "select", true),
                field("phone", "text", false),
                field("website", "text", false),
                field("facebook_link", "text", false),
                field("genres", "multiselect", false),
                field("image_link", "text", false),
                field("seeking_venue", "checkbox", false),
                field("seeking_description", "text", false),
            ],
            genre_choices: GENRE_CHOICES,
            state_choices: STATE_CHOICES,
            record,
        }
    }

    pub fn show(action: String) -> Self {
        Self {
            form: "show",
            action,
            fields: vec![
                field("artist_id", "integer", true),
                field("venue_id", "integer", true),
                field("start_time", "datetime", true),
            ],
            genre_choices: &[],
            state_choices: &[],
            record: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> FormPairs {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_venue_form_repeated_genres() {
        let form = VenueForm::from_pairs(&pairs(&[
            ("name", "The Musical Hop"),
            ("city", "San Francisco"),
            ("state", "ca"),
            ("address", "1015 Folsom Street"),
            ("phone", "123-123-1234"),
            ("genres", "Jazz"),
            ("genres", "Reggae"),
            ("genres", "Jazz"),
            ("facebook_link", ""),
            ("seeking_talent", "y"),
        ]))
        .unwrap();

        assert_eq!(form.state, "CA");
        assert_eq!(form.genres, vec!["Jazz", "Reggae"]);
        assert_eq!(form.phone.as_deref(), Some("123-123-1234"));
        assert!(form.facebook_link.is_none());
        assert!(form.seeking_talent);
    }

    #[test]
    fn test_venue_form_missing_name() {
        let result = VenueForm::from_pairs(&pairs(&[
            ("name", "   "),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
        ]));

        match result {
            Err(ApiError::BadRequest(msg)) => assert!(msg.contains("name")),
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_artist_form_rejects_unknown_genre() {
        let result = ArtistForm::from_pairs(&pairs(&[
            ("name", "Guns N Petals"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("genres", "Polka Fusion"),
        ]));
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_artist_form_rejects_unknown_state() {
        let result = ArtistForm::from_pairs(&pairs(&[
            ("name", "Guns N Petals"),
            ("city", "Somewhere"),
            ("state", "ZZ"),
        ]));
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_artist_form_unchecked_flag() {
        let form = ArtistForm::from_pairs(&pairs(&[
            ("name", "Matt Quevedo"),
            ("city", "New York"),
            ("state", "NY"),
        ]))
        .unwrap();
        assert!(!form.seeking_venue);
        assert!(form.genres.is_empty());
    }

    #[test]
    fn test_show_form_parses_ids_and_time() {
        let form = ShowForm::from_pairs(&pairs(&[
            ("artist_id", "4"),
            ("venue_id", "1"),
            ("start_time", "2035-04-01 20:00:00"),
        ]))
        .unwrap();
        assert_eq!(form.artist_id, 4);
        assert_eq!(form.venue_id, 1);
        assert_eq!(fyyur_common::time::format_start_time(&form.start_time), "2035-04-01 20:00:00");
    }

    #[test]
    fn test_show_form_rejects_non_integer_id() {
        let result = ShowForm::from_pairs(&pairs(&[
            ("artist_id", "four"),
            ("venue_id", "1"),
            ("start_time", "2035-04-01 20:00:00"),
        ]));
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_show_form_bad_time_is_invalid_input() {
        let result = ShowForm::from_pairs(&pairs(&[
            ("artist_id", "4"),
            ("venue_id", "1"),
            ("start_time", "soon"),
        ]));
        assert_eq!(
            result.unwrap_err().status(),
            axum::http::StatusCode::BAD_REQUEST
        );
    }
}
