//! Domain types, errors, and pure validation logic shared by the database
//! and API crates. Nothing in here performs I/O.

pub mod error;
pub mod filters;
pub mod follows;
pub mod lives;
pub mod pagination;
pub mod posts;
pub mod types;
pub mod users;
