//! Filtering capabilities for loaded tables
//!
//! This module provides a small expression-based filtering system used to
//! scope the raw tables to the configured company before they are decoded.

pub mod core;
pub mod error;
pub mod expr;

pub use self::core::{BatchFilter, filter_batches, filter_record_batch};
pub use self::error::FilterError;
pub use expr::{Expr, ExpressionFilter, LiteralValue, eq_filter, evaluate_expr};
