//! The metric engine
//!
//! Every operation is a pure function of the borrowed [`DataStore`] and a
//! [`RoleSelection`]; nothing is cached or mutated between calls.

pub mod selection;

use rustc_hash::FxHashSet;

use crate::algorithm::{RankedEntry, normalize_school_name, rank_top, weighted_mean};
use crate::error::QueryError;
use crate::models::PositionRecord;
use crate::store::DataStore;

pub use selection::{ALL_ROLES, RoleSelection};

/// Weighted prestige of a selection and its place on the reference curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrestigeSummary {
    /// Weighted mean prestige of the selected positions
    pub mean_prestige: f64,
    /// Percentile (0-100) of the nearest reference point
    pub percentile: u8,
}

/// Results of one dashboard query
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    /// Selection the results were computed for
    pub selection: RoleSelection,
    /// Prestige aggregate, or why it could not be computed
    pub prestige: Result<PrestigeSummary, QueryError>,
    /// Top source companies, ascending by count
    pub top_companies: Vec<RankedEntry>,
    /// Top alma maters, ascending by count
    pub top_schools: Vec<RankedEntry>,
}

impl DashboardSnapshot {
    /// The percentile, if the selection had weighted positions
    #[must_use]
    pub fn percentile(&self) -> Option<u8> {
        self.prestige.as_ref().ok().map(|s| s.percentile)
    }
}

/// Computes the dashboard metrics over a data store
#[derive(Debug, Clone, Copy)]
pub struct MetricEngine<'a> {
    store: &'a DataStore,
}

impl<'a> MetricEngine<'a> {
    #[must_use]
    pub fn new(store: &'a DataStore) -> Self {
        Self { store }
    }

    /// Weighted mean prestige of the selected positions and its percentile
    pub fn prestige_summary(&self, selection: &RoleSelection) -> Result<PrestigeSummary, QueryError> {
        let mean = weighted_mean(
            self.store
                .positions()
                .iter()
                .filter(|p| selection.matches(p.role_category.as_deref()))
                .filter_map(PositionRecord::weighted_prestige),
        )
        .ok_or_else(|| QueryError::EmptySelection {
            selection: selection.clone(),
        })?;
        if !mean.is_finite() {
            return Err(QueryError::NonFiniteMean {
                selection: selection.clone(),
            });
        }

        let percentile = self
            .store
            .prestige_curve()
            .percentile_of(mean)
            .ok_or(QueryError::NoReferenceCurve)?;

        log::debug!("Prestige for {selection}: mean {mean:.4}, percentile {percentile}");
        Ok(PrestigeSummary {
            mean_prestige: mean,
            percentile,
        })
    }

    /// Percentile (0-100) of the weighted mean prestige of the selection
    ///
    /// # Errors
    /// [`QueryError::EmptySelection`] when no selected position carries weight,
    /// [`QueryError::NonFiniteMean`] when the weighted sums overflow
    pub fn compute_prestige_percentile(&self, selection: &RoleSelection) -> Result<u8, QueryError> {
        self.prestige_summary(selection).map(|s| s.percentile)
    }

    /// Companies that sent the most people into the selected roles
    ///
    /// At most `limit` entries, ascending by count; empty when nothing matches.
    #[must_use]
    pub fn top_source_companies(&self, selection: &RoleSelection, limit: usize) -> Vec<RankedEntry> {
        let pairs = self
            .store
            .transitions()
            .iter()
            .filter(|t| selection.matches(t.role_category.as_deref()))
            .map(|t| (t.source_company.as_str(), t.count));
        rank_top(pairs, limit)
    }

    /// Schools with the most credentials among employees in the selected roles
    ///
    /// Every credential row counts, so a person with two degrees from one
    /// school counts twice. Names are normalized for display.
    #[must_use]
    pub fn top_alma_maters(&self, selection: &RoleSelection, limit: usize) -> Vec<RankedEntry> {
        let alumni: FxHashSet<&str> = self
            .store
            .positions()
            .iter()
            .filter(|p| selection.matches(p.role_category.as_deref()))
            .map(|p| p.user_id.as_str())
            .collect();

        let pairs = self
            .store
            .education()
            .iter()
            .filter(|e| alumni.contains(e.user_id.as_str()))
            .filter_map(|e| e.countable_school())
            .map(|school| (school, 1));

        rank_top(pairs, limit)
            .into_iter()
            .map(|entry| RankedEntry::new(normalize_school_name(&entry.name), entry.count))
            .collect()
    }

    /// Compute all three dashboard results for a selection
    #[must_use]
    pub fn query(&self, selection: &RoleSelection) -> DashboardSnapshot {
        let limit = self.store.ranking_limit();
        DashboardSnapshot {
            selection: selection.clone(),
            prestige: self.prestige_summary(selection),
            top_companies: self.top_source_companies(selection, limit),
            top_schools: self.top_alma_maters(selection, limit),
        }
    }
}
