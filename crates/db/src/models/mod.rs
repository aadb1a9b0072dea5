//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - A filter struct for list queries where the resource supports one

pub mod follow;
pub mod good;
pub mod live;
pub mod live_registration;
pub mod post;
pub mod session;
pub mod user;
