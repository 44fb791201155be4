//! Current employee positions

use serde::{Deserialize, Serialize};

use super::TableRecord;
use crate::schema::POSITIONS_TABLE;

/// One employee's current role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    /// Employee identifier
    pub user_id: String,
    /// Coarse job-function grouping
    pub role_category: Option<String>,
    /// Sampling weight of the position
    pub weight: Option<f64>,
    /// Precomputed prestige score
    pub prestige: Option<f64>,
    /// Ultimate parent company identifier
    pub parent_company_id: i64,
}

impl PositionRecord {
    /// The `(weight, prestige)` pair if both are present and finite
    #[must_use]
    pub fn weighted_prestige(&self) -> Option<(f64, f64)> {
        match (self.weight, self.prestige) {
            (Some(w), Some(p)) if w.is_finite() && p.is_finite() => Some((w, p)),
            _ => None,
        }
    }
}

impl TableRecord for PositionRecord {
    fn table_name() -> &'static str {
        POSITIONS_TABLE
    }
}
