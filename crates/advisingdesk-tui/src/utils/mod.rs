//! Utility functions for string formatting.

pub mod format;

pub use format::{course_tag, credit_bar, format_gpa, or_default, truncate_string};
