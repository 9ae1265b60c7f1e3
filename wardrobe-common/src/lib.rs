//! # Wardrobe Common Library
//!
//! Shared code for the wardrobe services including:
//! - Error and result types
//! - Root folder and configuration resolution
//! - SQLite schema, models and item/collection store operations

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
