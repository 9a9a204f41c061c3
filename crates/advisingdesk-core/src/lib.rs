//! Core library for advisingdesk.
//!
//! This crate holds everything that does not touch the terminal:
//!
//! - `api`: HTTP client for the advising backend and the `AdvisingApi` seam
//! - `models`: typed schemas for every endpoint
//! - `store`: the client-side collections with request generations
//! - `filter`: free-text and standing filtering of the student list
//! - `loader`: load sequencing that reports back over a channel

pub mod api;
pub mod filter;
pub mod loader;
pub mod models;
pub mod store;

pub use api::{AdvisingApi, ApiClient, ApiError};
pub use filter::{filter_students, StandingFilter};
pub use loader::{BootstrapTickets, LoadEvent, LoadRequest};
pub use store::{LoadKind, LoadTicket, Store};
