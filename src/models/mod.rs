//! Record models for the four input tables
//!
//! Records are decoded from normalized record batches through `serde_arrow`.
//! Field names match the logical names defined in [`crate::schema`].

pub mod education;
pub mod position;
pub mod prestige;
pub mod transition;

use arrow::record_batch::RecordBatch;
use serde::de::DeserializeOwned;

use crate::error::LoadError;

pub use education::EducationRecord;
pub use position::PositionRecord;
pub use prestige::PrestigePoint;
pub use transition::TransitionRecord;

/// A row type of one of the input tables
pub trait TableRecord: DeserializeOwned + Sized {
    /// Logical name of the table the record belongs to
    fn table_name() -> &'static str;

    /// Decode all rows of a normalized batch
    fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>, LoadError> {
        serde_arrow::from_record_batch::<Vec<Self>>(batch)
            .map_err(|e| LoadError::malformed(Self::table_name(), format!("Failed to deserialize: {e}")))
    }

    /// Decode a sequence of batches, preserving row order
    fn from_batches(batches: &[RecordBatch]) -> Result<Vec<Self>, LoadError> {
        let mut records = Vec::with_capacity(batches.iter().map(RecordBatch::num_rows).sum());
        for batch in batches {
            records.extend(Self::from_batch(batch)?);
        }
        Ok(records)
    }
}
