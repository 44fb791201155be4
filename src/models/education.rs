//! Education records, one row per degree or credential

use serde::{Deserialize, Serialize};

use super::TableRecord;
use crate::schema::EDUCATION_TABLE;

/// A single credential held by an employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationRecord {
    pub user_id: String,
    pub school_name: Option<String>,
    pub education_id: Option<String>,
}

impl EducationRecord {
    /// School name of a countable credential
    ///
    /// Rows lacking either a school name or a credential id are not counted.
    #[must_use]
    pub fn countable_school(&self) -> Option<&str> {
        match (&self.school_name, &self.education_id) {
            (Some(school), Some(id)) if !school.is_empty() && !id.is_empty() => Some(school.as_str()),
            _ => None,
        }
    }
}

impl TableRecord for EducationRecord {
    fn table_name() -> &'static str {
        EDUCATION_TABLE
    }
}
