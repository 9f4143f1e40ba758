//! Storage layer for the APOD pipeline
//!
//! This module wraps the SQLite database holding `apod_data`:
//! - `models`: Rows read back from the table
//! - `schema`: Database connection and table creation
//! - `queries`: Inserts and read-back queries

pub mod models;
pub mod queries;
pub mod schema;


pub use models::*;
pub use schema::{ApodDatabase, APOD_TABLE};
