//! Algorithm implementations behind the dashboard metrics
//!
//! This module contains the weighted prestige aggregate and its reference
//! curve lookup, top-k ranking of grouped counts, and display-name
//! normalization for schools.

pub mod naming;
pub mod percentile;
pub mod ranking;

pub use naming::{normalize_school_name, title_case};
pub use percentile::{PrestigeCurve, weighted_mean};
pub use ranking::{RankedEntry, rank_top};
