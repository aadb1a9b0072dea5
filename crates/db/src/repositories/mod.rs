//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. List methods take raw
//! `limit`/`offset` values and clamp them here.

pub mod follow_repo;
pub mod good_repo;
pub mod live_registration_repo;
pub mod live_repo;
pub mod post_repo;
pub mod session_repo;
pub mod user_repo;

pub use follow_repo::FollowRepo;
pub use good_repo::GoodRepo;
pub use live_registration_repo::LiveRegistrationRepo;
pub use live_repo::LiveRepo;
pub use post_repo::PostRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;

use livehub_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// Resolve raw pagination input into a `(limit, offset)` pair.
pub(crate) fn page(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    (
        clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
        clamp_offset(offset),
    )
}
