//! Configuration for the dashboard.
//!
//! Every setting has a default matching the bundled sample data, so an empty
//! JSON object (or no file at all) yields a working configuration.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::error::util::safe_read_to_string;
use crate::view::PresentationConfig;

/// Default minimum number of associated rows for a role category to be offered as a filter
pub const DEFAULT_MIN_ROLE_COUNT: u64 = 20;

/// Default number of entries in each ranked chart
pub const DEFAULT_RANKING_LIMIT: usize = 5;

/// The single company every query is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyScope {
    /// Destination company name as it appears in the transitions table
    pub name: String,
    /// Ultimate parent identifier as it appears in the positions table
    pub parent_id: i64,
}

impl Default for CompanyScope {
    fn default() -> Self {
        Self {
            name: "Asana, Inc.".to_string(),
            parent_id: 381_043,
        }
    }
}

/// Locations of the four input tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablePaths {
    /// Directory containing the tables; relative file names resolve against it
    pub data_dir: PathBuf,
    /// Employee positions table
    pub positions: PathBuf,
    /// Inbound transitions table
    pub transitions: PathBuf,
    /// Education records table
    pub education: PathBuf,
    /// Prestige reference curve
    pub prestige_curve: PathBuf,
}

impl Default for TablePaths {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            positions: PathBuf::from("pw_sample_positions.csv"),
            transitions: PathBuf::from("pw_sample_transitions.csv"),
            education: PathBuf::from("pw_sample_education.csv"),
            prestige_curve: PathBuf::from("pw_prestige_percentiles.csv"),
        }
    }
}

impl TablePaths {
    /// Resolve a table file against the data directory
    #[must_use]
    pub fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir.join(file)
        }
    }
}

/// Source column names of the positions table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionColumns {
    pub user_id: String,
    pub role_category: String,
    pub weight: String,
    pub prestige: String,
    pub parent_company_id: String,
}

impl Default for PositionColumns {
    fn default() -> Self {
        Self {
            user_id: "user_id".to_string(),
            role_category: "role_k150".to_string(),
            weight: "weight_v2".to_string(),
            prestige: "prestige_v2".to_string(),
            parent_company_id: "ultimate_parent_rcid".to_string(),
        }
    }
}

/// Source column names of the transitions table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionColumns {
    pub destination_company: String,
    pub source_company: String,
    pub role_category: String,
    pub count: String,
}

impl Default for TransitionColumns {
    fn default() -> Self {
        Self {
            destination_company: "COMPANY".to_string(),
            source_company: "SOURCE_COMPANY".to_string(),
            role_category: "CATEGORY".to_string(),
            count: "N".to_string(),
        }
    }
}

/// Source column names of the education table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationColumns {
    pub user_id: String,
    pub school_name: String,
    pub education_id: String,
}

impl Default for EducationColumns {
    fn default() -> Self {
        Self {
            user_id: "user_id".to_string(),
            school_name: "parent_school_name".to_string(),
            education_id: "education_id".to_string(),
        }
    }
}

/// Source column names of the prestige reference curve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrestigeCurveColumns {
    pub prestige: String,
    pub percentile: String,
}

impl Default for PrestigeCurveColumns {
    fn default() -> Self {
        Self {
            prestige: "PRESTIGE".to_string(),
            percentile: "PERCENTILE".to_string(),
        }
    }
}

/// Column names for all four tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub positions: PositionColumns,
    pub transitions: TransitionColumns,
    pub education: EducationColumns,
    pub prestige_curve: PrestigeCurveColumns,
}

/// What a role category's size is measured by when deciding whether to offer it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleOptionBasis {
    /// Number of current positions at the company in the category
    #[default]
    Positions,
    /// Summed inbound transition counts in the category
    TransitionVolume,
}

impl fmt::Display for RoleOptionBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positions => write!(f, "positions"),
            Self::TransitionVolume => write!(f, "transition volume"),
        }
    }
}

/// Configuration for the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Company every table is scoped to
    pub company: CompanyScope,
    /// Input table locations
    pub tables: TablePaths,
    /// Source column names
    pub columns: ColumnNames,
    /// Minimum category size for a role to be offered as a filter option
    pub min_role_count: u64,
    /// How category size is measured
    pub role_option_basis: RoleOptionBasis,
    /// Number of entries kept in each ranking
    pub ranking_limit: usize,
    /// Presentation variant used by the view layer
    pub presentation: PresentationConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            company: CompanyScope::default(),
            tables: TablePaths::default(),
            columns: ColumnNames::default(),
            min_role_count: DEFAULT_MIN_ROLE_COUNT,
            role_option_basis: RoleOptionBasis::default(),
            ranking_limit: DEFAULT_RANKING_LIMIT,
            presentation: PresentationConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load a configuration from a JSON file; absent fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self, LoadError> {
        let content = safe_read_to_string(path, "dashboard configuration")?;
        serde_json::from_str(&content).map_err(|e| LoadError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

impl fmt::Display for DashboardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dashboard Configuration:")?;
        writeln!(
            f,
            "  Company: {} (parent id {})",
            self.company.name, self.company.parent_id
        )?;
        writeln!(f, "  Data Directory: {}", self.tables.data_dir.display())?;
        writeln!(
            f,
            "  Role Options: at least {} by {}",
            self.min_role_count, self.role_option_basis
        )?;
        writeln!(f, "  Ranking Limit: {}", self.ranking_limit)?;
        writeln!(
            f,
            "  Percentile Format: {}",
            self.presentation.percentile_format
        )?;
        Ok(())
    }
}
