//! REST API client module for the advising backend.
//!
//! This module provides the `ApiClient` for fetching students, advisors,
//! academic progress and department statistics, and the `AdvisingApi` trait
//! the loader talks to so a different backend can be swapped in.
//!
//! Every call is a single GET with no retry and no caching.

pub mod client;
pub mod error;

pub use client::{endpoints, AdvisingApi, ApiClient};
pub use error::ApiError;
