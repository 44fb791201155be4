//! A Rust library for computing a company's prestige percentile and its
//! talent-flow rankings from flat tabular files.
//!
//! Four tables (positions, inbound transitions, education records and a
//! prestige reference curve) are loaded once into an immutable
//! [`DataStore`]. A [`MetricEngine`] borrows the store and answers queries
//! for a [`RoleSelection`]; [`DashboardView`] turns the answers into a
//! serializable chart model.

pub mod algorithm;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod models;
pub mod reader;
pub mod schema;
pub mod store;
pub mod utils;
pub mod view;

// Re-export the most common types for easier use
pub use algorithm::{PrestigeCurve, RankedEntry};
pub use config::{CompanyScope, DashboardConfig, RoleOptionBasis};
pub use engine::{ALL_ROLES, DashboardSnapshot, MetricEngine, PrestigeSummary, RoleSelection};
pub use error::{LoadError, QueryError};
pub use models::{EducationRecord, PositionRecord, PrestigePoint, TransitionRecord};
pub use store::DataStore;
pub use view::{DashboardView, PercentileFormat, PresentationConfig};

// Arrow types
pub use arrow::record_batch::RecordBatch;
