//! Expression-based filtering
//!
//! Expressions compare columns against literal values. Null cells never
//! satisfy a comparison.

use arrow::array::{Array, ArrayRef, BooleanArray, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;

use crate::filter::core::{BatchFilter, filter_record_batch};
use crate::filter::error::FilterError;

/// Represents a filter expression over a record batch
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column equals a literal value
    Eq(String, LiteralValue),
}

/// Literal values used in filter expressions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    /// String literal
    String(String),
    /// Integer literal
    Int(i64),
}

/// Evaluate an expression into a row mask
pub fn evaluate_expr(batch: &RecordBatch, expr: &Expr) -> Result<BooleanArray, FilterError> {
    match expr {
        Expr::Eq(col, value) => evaluate_eq(batch, col, value),
    }
}

fn column<'a>(batch: &'a RecordBatch, col: &str) -> Result<&'a ArrayRef, FilterError> {
    batch
        .schema()
        .index_of(col)
        .map(|idx| batch.column(idx))
        .map_err(|_| FilterError::ColumnNotFound(col.to_string()))
}

/// Equality test of a column against a literal of the matching kind
fn evaluate_eq(batch: &RecordBatch, col: &str, value: &LiteralValue) -> Result<BooleanArray, FilterError> {
    let column = column(batch, col)?;

    match value {
        LiteralValue::String(expected) => {
            let array = column
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| type_error(col, "string", column))?;
            Ok(array
                .iter()
                .map(|v| Some(v == Some(expected.as_str())))
                .collect())
        }
        LiteralValue::Int(expected) => {
            let array = column
                .as_any()
                .downcast_ref::<Int64Array>()
                .ok_or_else(|| type_error(col, "integer", column))?;
            Ok(array.iter().map(|v| Some(v == Some(*expected))).collect())
        }
    }
}

fn type_error(col: &str, expected: &'static str, column: &ArrayRef) -> FilterError {
    FilterError::ColumnType {
        column: col.to_string(),
        expected,
        actual: column.data_type().to_string(),
    }
}

/// A filter that keeps rows matching an expression
#[derive(Debug, Clone)]
pub struct ExpressionFilter {
    expr: Expr,
}

impl ExpressionFilter {
    /// Create a new expression filter
    #[must_use]
    pub fn new(expr: Expr) -> Self {
        Self { expr }
    }
}

impl BatchFilter for ExpressionFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch, FilterError> {
        let mask = evaluate_expr(batch, &self.expr)?;
        filter_record_batch(batch, &mask)
    }
}

/// Build an equality filter expression
#[must_use]
pub fn eq_filter(column: &str, value: LiteralValue) -> Expr {
    Expr::Eq(column.to_string(), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("company", DataType::Utf8, true),
            Field::new("parent", DataType::Int64, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec![Some("Asana"), None, Some("Other")])),
                Arc::new(Int64Array::from(vec![Some(7), Some(7), None])),
            ],
        )
        .unwrap()
    }

    fn mask(expr: &Expr) -> Vec<bool> {
        let mask = evaluate_expr(&batch(), expr).unwrap();
        (0..mask.len()).map(|i| mask.value(i)).collect()
    }

    #[test]
    fn test_string_eq_skips_nulls() {
        let expr = eq_filter("company", LiteralValue::String("Asana".into()));
        assert_eq!(mask(&expr), vec![true, false, false]);
    }

    #[test]
    fn test_int_eq_skips_nulls() {
        let expr = eq_filter("parent", LiteralValue::Int(7));
        assert_eq!(mask(&expr), vec![true, true, false]);
    }

    #[test]
    fn test_filter_keeps_matching_rows() {
        let filter = ExpressionFilter::new(eq_filter("parent", LiteralValue::Int(7)));
        let filtered = filter.filter(&batch()).unwrap();
        assert_eq!(filtered.num_rows(), 2);
    }

    #[test]
    fn test_type_mismatch_is_reported() {
        let expr = eq_filter("parent", LiteralValue::String("7".into()));
        let err = evaluate_expr(&batch(), &expr).unwrap_err();
        assert!(matches!(err, FilterError::ColumnType { .. }));
    }

    #[test]
    fn test_unknown_column() {
        let expr = eq_filter("missing", LiteralValue::Int(1));
        let err = ExpressionFilter::new(expr).filter(&batch()).unwrap_err();
        assert!(matches!(err, FilterError::ColumnNotFound(_)));
    }
}
