//! Presentation of dashboard results
//!
//! Turns a [`DashboardSnapshot`] into a plain view model: one prestige gauge
//! and two horizontal bar charts. The view model serializes to JSON for a UI
//! layer and renders to text for the terminal.

pub mod format;

use std::fmt::Write as _;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::algorithm::RankedEntry;
use crate::engine::DashboardSnapshot;

pub use format::{PercentileFormat, format_percentile, ordinal_suffix};

/// Bar color for every entry but the largest
pub const MUTED_COLOR: &str = "#9CA4B4";
/// Bar color of the largest entry
pub const HIGHLIGHT_COLOR: &str = "#48AFF4";

/// Label shown on the gauge when the selection has no weighted positions
pub const NO_DATA_LABEL: &str = "no data";

/// Width of the text gauge in characters
const GAUGE_WIDTH: usize = 50;
/// Width of the longest text bar in characters
const BAR_WIDTH: usize = 40;

/// Presentation variant of the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// How the percentile is written
    pub percentile_format: PercentileFormat,
    /// Optional hover text for the gauge; `{percentile}` is replaced with the formatted value
    pub hover_template: Option<String>,
}

/// The prestige gauge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GaugeView {
    pub title: String,
    /// Marker position on the 0-100 scale, absent when there is no data
    pub value: Option<u8>,
    pub label: String,
    pub hover: Option<String>,
}

/// One bar of a ranked chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarView {
    pub label: String,
    pub value: u64,
    pub color: &'static str,
}

/// A horizontal bar chart, bars in ascending order (largest last)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarChartView {
    pub title: String,
    pub bars: Vec<BarView>,
}

impl BarChartView {
    /// Build a chart from ascending ranked entries, highlighting the last bar
    #[must_use]
    pub fn from_ranking(title: &str, entries: &[RankedEntry]) -> Self {
        let last = entries.len().saturating_sub(1);
        let bars = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| BarView {
                label: entry.name.clone(),
                value: entry.count,
                color: if i == last { HIGHLIGHT_COLOR } else { MUTED_COLOR },
            })
            .collect();
        Self {
            title: title.to_string(),
            bars,
        }
    }
}

/// Everything the dashboard displays for one selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    /// Selected role categories, empty for all roles
    pub roles: Vec<String>,
    pub gauge: GaugeView,
    pub companies: BarChartView,
    pub schools: BarChartView,
}

impl DashboardView {
    /// Build the view model for a snapshot
    #[must_use]
    pub fn from_snapshot(snapshot: &DashboardSnapshot, presentation: &PresentationConfig) -> Self {
        let scope = if snapshot.selection.is_all() {
            "Overall"
        } else {
            "selected roles"
        };

        let value = snapshot.percentile();
        let (label, hover) = match value {
            Some(percentile) => {
                let formatted = format_percentile(percentile, presentation.percentile_format);
                let hover = presentation
                    .hover_template
                    .as_ref()
                    .map(|t| t.replace("{percentile}", &formatted));
                (formatted, hover)
            }
            None => (NO_DATA_LABEL.to_string(), None),
        };

        Self {
            roles: snapshot
                .selection
                .categories()
                .into_iter()
                .map(str::to_string)
                .collect(),
            gauge: GaugeView {
                title: format!("Average prestige: {scope}"),
                value,
                label,
                hover,
            },
            companies: BarChartView::from_ranking("Top source companies", &snapshot.top_companies),
            schools: BarChartView::from_ranking("Top alma maters", &snapshot.top_schools),
        }
    }

    /// Render the view as plain text
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.gauge.title);
        match self.gauge.value {
            Some(value) => {
                let marker = usize::from(value) * GAUGE_WIDTH / 100;
                let gauge: String = (0..=GAUGE_WIDTH)
                    .map(|i| if i == marker { '|' } else { '-' })
                    .collect();
                let _ = writeln!(out, "  [{gauge}] {}", self.gauge.label);
            }
            None => {
                let _ = writeln!(out, "  {}", self.gauge.label);
            }
        }
        if let Some(hover) = &self.gauge.hover {
            let _ = writeln!(out, "  {hover}");
        }

        for chart in [&self.companies, &self.schools] {
            let _ = writeln!(out);
            render_chart(&mut out, chart);
        }
        out
    }
}

fn render_chart(out: &mut String, chart: &BarChartView) {
    let _ = writeln!(out, "{}", chart.title);
    if chart.bars.is_empty() {
        let _ = writeln!(out, "  {NO_DATA_LABEL}");
        return;
    }

    let label_width = chart
        .bars
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0);
    let max_value = chart.bars.iter().map(|b| b.value).max().unwrap_or(0).max(1);

    // Largest first reads naturally top-down in a terminal
    for bar in chart.bars.iter().rev() {
        let len = usize::try_from(bar.value.saturating_mul(BAR_WIDTH as u64) / max_value)
            .unwrap_or(BAR_WIDTH);
        let _ = writeln!(
            out,
            "  {:<label_width$}  {} {}",
            bar.label,
            "#".repeat(len.max(1)),
            bar.value
        );
    }
}

/// Render the selectable role options, "All" first
#[must_use]
pub fn render_role_options(options: &[String]) -> String {
    std::iter::once(crate::engine::ALL_ROLES)
        .chain(options.iter().map(String::as_str))
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{PrestigeSummary, RoleSelection};
    use crate::error::QueryError;
    use pretty_assertions::assert_eq;

    fn snapshot(selection: RoleSelection, percentile: Option<u8>) -> DashboardSnapshot {
        let prestige = match percentile {
            Some(percentile) => Ok(PrestigeSummary {
                mean_prestige: 0.5,
                percentile,
            }),
            None => Err(QueryError::EmptySelection {
                selection: selection.clone(),
            }),
        };
        DashboardSnapshot {
            selection,
            prestige,
            top_companies: vec![RankedEntry::new("Meta", 4), RankedEntry::new("Google", 9)],
            top_schools: Vec::new(),
        }
    }

    #[test]
    fn test_gauge_percent_format() {
        let view = DashboardView::from_snapshot(
            &snapshot(RoleSelection::All, Some(50)),
            &PresentationConfig::default(),
        );
        assert_eq!(view.gauge.title, "Average prestige: Overall");
        assert_eq!(view.gauge.label, "50%");
        assert_eq!(view.gauge.value, Some(50));
        assert!(view.roles.is_empty());
    }

    #[test]
    fn test_gauge_ordinal_with_hover() {
        let presentation = PresentationConfig {
            percentile_format: PercentileFormat::Ordinal,
            hover_template: Some("Prestige score is {percentile}".into()),
        };
        let view = DashboardView::from_snapshot(
            &snapshot(RoleSelection::from_values(["eng"]), Some(22)),
            &presentation,
        );
        assert_eq!(view.gauge.title, "Average prestige: selected roles");
        assert_eq!(view.gauge.label, "22nd");
        assert_eq!(view.gauge.hover.as_deref(), Some("Prestige score is 22nd"));
        assert_eq!(view.roles, vec!["eng"]);
    }

    #[test]
    fn test_empty_selection_shows_no_data() {
        let view = DashboardView::from_snapshot(
            &snapshot(RoleSelection::from_values(["legal"]), None),
            &PresentationConfig::default(),
        );
        assert_eq!(view.gauge.value, None);
        assert_eq!(view.gauge.label, NO_DATA_LABEL);
        assert!(view.render_text().contains("no data"));
    }

    #[test]
    fn test_last_bar_is_highlighted() {
        let chart = BarChartView::from_ranking(
            "Top source companies",
            &[RankedEntry::new("Meta", 4), RankedEntry::new("Google", 9)],
        );
        let colors: Vec<&str> = chart.bars.iter().map(|b| b.color).collect();
        assert_eq!(colors, vec![MUTED_COLOR, HIGHLIGHT_COLOR]);
    }

    #[test]
    fn test_text_lists_largest_first() {
        let view = DashboardView::from_snapshot(
            &snapshot(RoleSelection::All, Some(50)),
            &PresentationConfig::default(),
        );
        let text = view.render_text();
        let google = text.find("Google").unwrap();
        let meta = text.find("Meta").unwrap();
        assert!(google < meta);
    }

    #[test]
    fn test_role_options_list_all_first() {
        let options = vec!["eng".to_string(), "sales".to_string()];
        assert_eq!(render_role_options(&options), "All\neng\nsales");
    }
}
