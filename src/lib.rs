//! Podcast catalog: podcasts and their episodes in SQLite, served through a
//! GraphQL schema.

pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod models;

pub use error::{AppError, Result};
