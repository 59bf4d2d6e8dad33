//! HTTP API handlers for fyyur-web

pub mod artists;
pub mod response;
pub mod search;
pub mod shows;
pub mod status;
pub mod ui;
pub mod venues;

pub use artists::{
    create_artist_form, create_artist_submission, edit_artist_form, edit_artist_submission,
    list_artists, search_artists, show_artist,
};
pub use response::{not_found, ActionResponse};
pub use shows::{create_show_form, create_show_submission, list_shows};
pub use status::status_routes;
pub use ui::serve_home;
pub use venues::{
    create_venue_form, create_venue_submission, delete_venue, edit_venue_form,
    edit_venue_submission, list_venues, search_venues, show_venue,
};
