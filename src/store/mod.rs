//! The immutable data store
//!
//! All four tables are loaded once, scoped to the configured company, and
//! never mutated afterwards. Queries borrow the store; it is `Send + Sync`
//! and can be shared between concurrent readers without locking.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use crate::algorithm::PrestigeCurve;
use crate::config::{CompanyScope, DashboardConfig, RoleOptionBasis};
use crate::error::LoadError;
use crate::filter::{BatchFilter, ExpressionFilter, LiteralValue, eq_filter, filter_batches};
use crate::models::{EducationRecord, PositionRecord, PrestigePoint, TableRecord, TransitionRecord};
use crate::reader::{read_table, require_values};
use crate::schema::{
    TableSchema, education_schema, positions_schema, prestige_curve_schema, transitions_schema,
};

/// Reference tables scoped to one company
#[derive(Debug, Clone)]
pub struct DataStore {
    company: CompanyScope,
    positions: Vec<PositionRecord>,
    transitions: Vec<TransitionRecord>,
    education: Vec<EducationRecord>,
    curve: PrestigeCurve,
    role_options: Vec<String>,
    ranking_limit: usize,
}

impl DataStore {
    /// Load every table named by the configuration
    ///
    /// Loading is all-or-nothing: the first failing table aborts the load.
    pub fn load(config: &DashboardConfig) -> Result<Self, LoadError> {
        let start = Instant::now();
        let tables = &config.tables;
        let columns = &config.columns;

        let positions_path = tables.resolve(&tables.positions);
        let transitions_path = tables.resolve(&tables.transitions);
        let education_path = tables.resolve(&tables.education);
        let curve_path = tables.resolve(&tables.prestige_curve);

        let position_filter = ExpressionFilter::new(eq_filter(
            "parent_company_id",
            LiteralValue::Int(config.company.parent_id),
        ));
        let transition_filter = ExpressionFilter::new(eq_filter(
            "destination_company",
            LiteralValue::String(config.company.name.clone()),
        ));

        // The four files are independent, so they are read concurrently
        let ((positions, transitions), (education, curve)) = rayon::join(
            || {
                rayon::join(
                    || {
                        load_records::<PositionRecord>(
                            &positions_path,
                            &positions_schema(columns),
                            Some(&position_filter),
                        )
                    },
                    || {
                        load_records::<TransitionRecord>(
                            &transitions_path,
                            &transitions_schema(columns),
                            Some(&transition_filter),
                        )
                    },
                )
            },
            || {
                rayon::join(
                    || load_records::<EducationRecord>(&education_path, &education_schema(columns), None),
                    || load_records::<PrestigePoint>(&curve_path, &prestige_curve_schema(columns), None),
                )
            },
        );

        let store = Self::assemble(positions?, transitions?, education?, curve?, config);
        log::info!(
            "Loaded data for {} in {:?}: {} positions, {} transitions, {} education records, {} reference points, {} role options",
            store.company.name,
            start.elapsed(),
            store.positions.len(),
            store.transitions.len(),
            store.education.len(),
            store.curve.len(),
            store.role_options.len()
        );
        Ok(store)
    }

    /// Build a store from in-memory tables
    ///
    /// Positions and transitions are scoped to the configured company exactly
    /// as [`DataStore::load`] scopes them.
    #[must_use]
    pub fn from_records(
        positions: Vec<PositionRecord>,
        transitions: Vec<TransitionRecord>,
        education: Vec<EducationRecord>,
        curve: Vec<PrestigePoint>,
        config: &DashboardConfig,
    ) -> Self {
        let company = &config.company;
        let positions = positions
            .into_iter()
            .filter(|p| p.parent_company_id == company.parent_id)
            .collect();
        let transitions = transitions
            .into_iter()
            .filter(|t| t.destination_company == company.name)
            .collect();
        Self::assemble(positions, transitions, education, curve, config)
    }

    fn assemble(
        positions: Vec<PositionRecord>,
        transitions: Vec<TransitionRecord>,
        education: Vec<EducationRecord>,
        curve: Vec<PrestigePoint>,
        config: &DashboardConfig,
    ) -> Self {
        let role_options = derive_role_options(
            &positions,
            &transitions,
            config.role_option_basis,
            config.min_role_count,
        );
        Self {
            company: config.company.clone(),
            positions,
            transitions,
            education,
            curve: PrestigeCurve::new(curve),
            role_options,
            ranking_limit: config.ranking_limit,
        }
    }

    /// The company every table is scoped to
    #[must_use]
    pub fn company(&self) -> &CompanyScope {
        &self.company
    }

    /// Current positions at the company
    #[must_use]
    pub fn positions(&self) -> &[PositionRecord] {
        &self.positions
    }

    /// Inbound transitions into the company
    #[must_use]
    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    /// All education records
    #[must_use]
    pub fn education(&self) -> &[EducationRecord] {
        &self.education
    }

    /// The population prestige reference curve
    #[must_use]
    pub fn prestige_curve(&self) -> &PrestigeCurve {
        &self.curve
    }

    /// Role categories offered as filter options, sorted by name
    #[must_use]
    pub fn role_options(&self) -> &[String] {
        &self.role_options
    }

    /// Configured number of entries per ranking
    #[must_use]
    pub fn ranking_limit(&self) -> usize {
        self.ranking_limit
    }
}

/// Read a table, optionally scope it with a filter, and decode its records
///
/// Required values are checked only on the rows that survive scoping, so a
/// blank cell in another company's row never fails the load.
fn load_records<T: TableRecord>(
    path: &Path,
    schema: &TableSchema,
    filter: Option<&dyn BatchFilter>,
) -> Result<Vec<T>, LoadError> {
    let batches = read_table(path, schema)?;
    let batches = match filter {
        Some(filter) => {
            let scoped = filter_batches(&batches, filter)?;
            log::debug!(
                "Scoped {} table to {} of {} rows",
                schema.name,
                scoped.iter().map(|b| b.num_rows()).sum::<usize>(),
                batches.iter().map(|b| b.num_rows()).sum::<usize>()
            );
            scoped
        }
        None => batches,
    };
    let batches = batches
        .iter()
        .map(|batch| require_values(batch, schema))
        .collect::<Result<Vec<_>, _>>()?;
    T::from_batches(&batches)
}

/// Role categories whose size reaches `min_count`, sorted by name
///
/// Rows without a category never form an option.
#[must_use]
pub fn derive_role_options<'a>(
    positions: &'a [PositionRecord],
    transitions: &'a [TransitionRecord],
    basis: RoleOptionBasis,
    min_count: u64,
) -> Vec<String> {
    let mut sizes: BTreeMap<&'a str, u64> = BTreeMap::new();
    let mut add = |category: Option<&'a str>, amount: u64| {
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            let size = sizes.entry(category).or_default();
            *size = size.saturating_add(amount);
        }
    };

    match basis {
        RoleOptionBasis::Positions => {
            for position in positions {
                add(position.role_category.as_deref(), 1);
            }
        }
        RoleOptionBasis::TransitionVolume => {
            for transition in transitions {
                add(transition.role_category.as_deref(), transition.count);
            }
        }
    }

    sizes
        .into_iter()
        .filter(|&(_, size)| size >= min_count)
        .map(|(category, _)| category.to_string())
        .collect()
}
