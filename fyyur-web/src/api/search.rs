//! Name search shared by venues and artists

use fyyur_common::db::EntityRef;
use serde::{Deserialize, Serialize};

/// Submitted search form
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    /// Substring to look for; blank matches everything
    #[serde(default)]
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search_term: String,
    pub count: usize,
    pub data: Vec<EntityRef>,
}

impl SearchResponse {
    pub fn new(search_term: String, data: Vec<EntityRef>) -> Self {
        Self {
            search_term,
            count: data.len(),
            data,
        }
    }
}
