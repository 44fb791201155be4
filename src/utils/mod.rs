//! Utility functions shared across the crate
//!
//! This module provides logging helpers used by the table readers and the data store.

pub mod logging;
