//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, status bar and overlays
//! - `input`: keyboard handling, mapped onto `App` handlers
//! - `styles`: colors and text styles
//! - `tabs`: the per-collection views and the detail overlays

pub mod input;
pub mod render;
pub mod styles;
pub mod tabs;
