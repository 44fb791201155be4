//! Core filtering functionality for record batches
//!
//! Defines the [`BatchFilter`] trait and the mask application shared by all filters.

use arrow::array::{ArrayRef, BooleanArray};
use arrow::compute::filter as arrow_filter;
use arrow::record_batch::RecordBatch;

use crate::filter::error::FilterError;

/// Filter a record batch based on a boolean mask
///
/// # Arguments
/// * `batch` - The record batch to filter
/// * `mask` - The boolean mask indicating which rows to keep
///
/// # Returns
/// A new record batch with only rows where mask is true
pub fn filter_record_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch, FilterError> {
    if batch.num_rows() != mask.len() {
        return Err(FilterError::MaskLength {
            mask: mask.len(),
            rows: batch.num_rows(),
        });
    }

    let filtered_columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|col| arrow_filter(col, mask))
        .collect::<Result<_, _>>()?;

    Ok(RecordBatch::try_new(batch.schema(), filtered_columns)?)
}

/// Trait for objects that can filter record batches
pub trait BatchFilter: std::fmt::Debug {
    /// Filter a record batch
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch, FilterError>;
}

/// Apply a filter to every batch, dropping batches left empty
pub fn filter_batches<F>(batches: &[RecordBatch], filter: &F) -> Result<Vec<RecordBatch>, FilterError>
where
    F: BatchFilter + ?Sized,
{
    let mut kept = Vec::with_capacity(batches.len());
    for batch in batches {
        let filtered = filter.filter(batch)?;
        if filtered.num_rows() > 0 {
            kept.push(filtered);
        }
    }
    Ok(kept)
}
