//! Client-side store for loaded collections.
//!
//! This module provides the `Store` the application owns and passes by
//! reference to renderers and filters. Collections are replaced wholesale
//! on every load and never patched.
//!
//! Each load is issued with a `LoadTicket`; a result whose ticket is older
//! than the newest one issued for the same kind is dropped, so overlapping
//! retries cannot overwrite fresher data.

pub mod collection;

pub use collection::{format_age, Collection, LoadKind, LoadTicket, Store};
