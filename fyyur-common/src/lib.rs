//! # Fyyur Common Library
//!
//! Shared code for the Fyyur booking service:
//! - Database initialization and row models
//! - Configuration loading
//! - Show start-time helpers (parsing, formatting, past/upcoming partition)

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
