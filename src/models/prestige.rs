//! Prestige reference curve entries

use serde::{Deserialize, Serialize};

use super::TableRecord;
use crate::schema::PRESTIGE_CURVE_TABLE;

/// A `(prestige, percentile)` pair of the reference population
///
/// `percentile` is a fraction in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrestigePoint {
    pub prestige: f64,
    pub percentile: f64,
}

impl PrestigePoint {
    #[must_use]
    pub fn new(prestige: f64, percentile: f64) -> Self {
        Self {
            prestige,
            percentile,
        }
    }

    /// Whether both coordinates are finite numbers
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.prestige.is_finite() && self.percentile.is_finite()
    }
}

impl TableRecord for PrestigePoint {
    fn table_name() -> &'static str {
        PRESTIGE_CURVE_TABLE
    }
}
