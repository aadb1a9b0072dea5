//! Shared query parameter types for API handlers.
//!
//! Id filters arrive as raw strings (`Option<String>`) and are parsed by
//! [`crate::filters`] so that a malformed value produces a structured
//! `PARSE_ERROR` naming the field. Pagination fields are declared inline on
//! each struct because `serde(flatten)` does not work with numeric
//! `serde_urlencoded` values.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the repository layer.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /goods?user=&post=`
#[derive(Debug, Deserialize)]
pub struct GoodListParams {
    pub user: Option<String>,
    pub post: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /posts?user=` and `GET /lives?user=`
#[derive(Debug, Deserialize)]
pub struct UserScopedListParams {
    pub user: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /live_registrations?user=&live=`
#[derive(Debug, Deserialize)]
pub struct LiveRegistrationListParams {
    pub user: Option<String>,
    pub live: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /follows?follower=&followed=`
#[derive(Debug, Deserialize)]
pub struct FollowListParams {
    pub follower: Option<String>,
    pub followed: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
