//! Terminal UI module using ratatui.
//!
//! - `render`: main frame rendering, layout, and overlay dialogs
//! - `input`: keyboard event handling
//! - `styles`: color scheme and text styling
//! - `tabs`: tab-specific content rendering (menu, orders, profile, admin)

pub mod input;
pub mod render;
pub mod styles;
pub mod tabs;
