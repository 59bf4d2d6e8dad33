//! Query functions for venues, artists and shows
//!
//! Reads accept any SQLite executor (pool or transaction). Writes take a
//! `&mut SqliteConnection` so handlers can run them inside a transaction
//! and decide whether to commit.

pub mod artists;
pub mod shows;
pub mod venues;

use fyyur_common::db::EntityRef;

/// Keep the entries whose name contains `term`, ignoring case
///
/// Case folding is Unicode-aware (`Müller` matches `MÜLLER`) and the term is
/// matched literally, so `%` and `_` carry no wildcard meaning. A blank term
/// keeps everything.
pub fn filter_by_name(candidates: Vec<EntityRef>, term: &str) -> Vec<EntityRef> {
    let needle = term.trim().to_lowercase();
    candidates
        .into_iter()
        .filter(|entry| entry.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(names: &[&str]) -> Vec<EntityRef> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| EntityRef {
                id: i as i64 + 1,
                name: name.to_string(),
            })
            .collect()
    }

    fn names(found: &[EntityRef]) -> Vec<&str> {
        found.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let found = filter_by_name(
            entries(&["The Musical Hop", "Park Square Live Music & Coffee", "The Dueling Pianos Bar"]),
            "  HOP ",
        );
        assert_eq!(names(&found), vec!["The Musical Hop"]);
    }

    #[test]
    fn test_filter_folds_non_ascii_case() {
        let found = filter_by_name(entries(&["Café Müller", "Cafe Muller"]), "MÜLLER");
        assert_eq!(names(&found), vec!["Café Müller"]);
    }

    #[test]
    fn test_filter_treats_wildcards_literally() {
        let found = filter_by_name(entries(&["100% Jazz", "Jazz_Club", "Jazz Club"]), "%");
        assert_eq!(names(&found), vec!["100% Jazz"]);

        let found = filter_by_name(entries(&["100% Jazz", "Jazz_Club", "Jazz Club"]), "_");
        assert_eq!(names(&found), vec!["Jazz_Club"]);
    }

    #[test]
    fn test_blank_term_keeps_everything_in_order() {
        let found = filter_by_name(entries(&["B", "A"]), "");
        assert_eq!(names(&found), vec!["B", "A"]);
    }
}
