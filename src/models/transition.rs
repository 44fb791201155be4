//! Aggregated inbound employment transitions

use serde::{Deserialize, Serialize};

use super::TableRecord;
use crate::schema::TRANSITIONS_TABLE;

/// Count of people who moved from `source_company` into `destination_company`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub destination_company: String,
    pub source_company: String,
    pub role_category: Option<String>,
    pub count: u64,
}

impl TableRecord for TransitionRecord {
    fn table_name() -> &'static str {
        TRANSITIONS_TABLE
    }
}
