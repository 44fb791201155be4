//! Table schemas for the four input tables.
//!
//! Each table is described by logical field names (the names the record
//! structs deserialize from), the source column names found in the files, and
//! the Arrow type every column is normalized to.

use std::collections::HashSet;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

use crate::config::ColumnNames;
use crate::error::LoadError;

/// Logical name of the positions table
pub const POSITIONS_TABLE: &str = "positions";
/// Logical name of the transitions table
pub const TRANSITIONS_TABLE: &str = "transitions";
/// Logical name of the education table
pub const EDUCATION_TABLE: &str = "education";
/// Logical name of the prestige reference curve
pub const PRESTIGE_CURVE_TABLE: &str = "prestige_curve";

/// A single required column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Logical field name used after normalization
    pub field: &'static str,
    /// Column name in the source file
    pub source: String,
    /// Arrow type the column is normalized to
    pub data_type: DataType,
    /// Whether null values are accepted
    pub nullable: bool,
}

impl ColumnDef {
    fn new(field: &'static str, source: &str, data_type: DataType, nullable: bool) -> Self {
        Self {
            field,
            source: source.to_string(),
            data_type,
            nullable,
        }
    }
}

/// Result of checking a file's columns against a table schema
#[derive(Debug, Default)]
pub struct SchemaReport {
    /// Source columns that were required but not found
    pub missing: Vec<String>,
}

impl SchemaReport {
    /// Whether every required column was present
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Description of one input table
#[derive(Debug, Clone)]
pub struct TableSchema {
    /// Logical table name, used in errors and logs
    pub name: &'static str,
    /// Required columns in output order
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    /// Compare the columns available in a file against the required ones
    #[must_use]
    pub fn check_columns<'a, I>(&self, available: I) -> SchemaReport
    where
        I: IntoIterator<Item = &'a str>,
    {
        let available: HashSet<&str> = available.into_iter().collect();
        let missing = self
            .columns
            .iter()
            .filter(|c| !available.contains(c.source.as_str()))
            .map(|c| c.source.clone())
            .collect();
        SchemaReport { missing }
    }

    /// Fail with [`LoadError::MissingColumns`] unless every required column is available
    pub fn require_columns<'a, I>(&self, available: I) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let report = self.check_columns(available);
        if report.is_complete() {
            Ok(())
        } else {
            Err(LoadError::MissingColumns {
                table: self.name.to_string(),
                columns: report.missing,
            })
        }
    }

    /// Find a required column by its source name
    #[must_use]
    pub fn column_by_source(&self, source: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.source == source)
    }

    /// The normalized Arrow schema: logical field names and target types
    #[must_use]
    pub fn arrow_schema(&self) -> SchemaRef {
        self.build_schema(|c| c.nullable)
    }

    /// Like [`TableSchema::arrow_schema`] but with every column nullable
    ///
    /// Freshly read batches use this schema; required values are only
    /// enforced once rows of other companies have been scoped away.
    #[must_use]
    pub fn relaxed_arrow_schema(&self) -> SchemaRef {
        self.build_schema(|_| true)
    }

    fn build_schema(&self, nullable: impl Fn(&ColumnDef) -> bool) -> SchemaRef {
        let fields: Vec<Field> = self
            .columns
            .iter()
            .map(|c| Field::new(c.field, c.data_type.clone(), nullable(c)))
            .collect();
        Arc::new(Schema::new(fields))
    }
}

/// Schema of the positions table
#[must_use]
pub fn positions_schema(columns: &ColumnNames) -> TableSchema {
    let c = &columns.positions;
    TableSchema {
        name: POSITIONS_TABLE,
        columns: vec![
            ColumnDef::new("user_id", &c.user_id, DataType::Utf8, false),
            ColumnDef::new("role_category", &c.role_category, DataType::Utf8, true),
            ColumnDef::new("weight", &c.weight, DataType::Float64, true),
            ColumnDef::new("prestige", &c.prestige, DataType::Float64, true),
            ColumnDef::new(
                "parent_company_id",
                &c.parent_company_id,
                DataType::Int64,
                false,
            ),
        ],
    }
}

/// Schema of the transitions table
#[must_use]
pub fn transitions_schema(columns: &ColumnNames) -> TableSchema {
    let c = &columns.transitions;
    TableSchema {
        name: TRANSITIONS_TABLE,
        columns: vec![
            ColumnDef::new(
                "destination_company",
                &c.destination_company,
                DataType::Utf8,
                false,
            ),
            ColumnDef::new("source_company", &c.source_company, DataType::Utf8, false),
            ColumnDef::new("role_category", &c.role_category, DataType::Utf8, true),
            ColumnDef::new("count", &c.count, DataType::UInt64, false),
        ],
    }
}

/// Schema of the education table
#[must_use]
pub fn education_schema(columns: &ColumnNames) -> TableSchema {
    let c = &columns.education;
    TableSchema {
        name: EDUCATION_TABLE,
        columns: vec![
            ColumnDef::new("user_id", &c.user_id, DataType::Utf8, false),
            ColumnDef::new("school_name", &c.school_name, DataType::Utf8, true),
            ColumnDef::new("education_id", &c.education_id, DataType::Utf8, true),
        ],
    }
}

/// Schema of the prestige reference curve
#[must_use]
pub fn prestige_curve_schema(columns: &ColumnNames) -> TableSchema {
    let c = &columns.prestige_curve;
    TableSchema {
        name: PRESTIGE_CURVE_TABLE,
        columns: vec![
            ColumnDef::new("prestige", &c.prestige, DataType::Float64, false),
            ColumnDef::new("percentile", &c.percentile, DataType::Float64, false),
        ],
    }
}
