//! Federation rating tables and point-delta calculation
//!
//! This module holds the static coefficient and point-difference tables
//! published by the federation, and the pure calculator that turns one match
//! record plus a current rating into a signed point change.

pub mod calculator;
pub mod tables;

// Re-export commonly used items
pub use calculator::compute_delta;
pub use tables::{
    categories_for, coefficient_for, default_category, CategoryEntry, PointBand, DEFAULT_CLASS,
    POINT_BANDS,
};
