//! Utility functions for string and value formatting.

pub mod format;

pub use format::{format_date, format_price, truncate_string};
