//! Database models and queries

pub mod collections;
pub mod init;
pub mod items;
pub mod models;

pub use init::*;
pub use models::*;
