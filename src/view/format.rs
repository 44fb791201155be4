//! Percentile formatting variants

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a percentile is written on the gauge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentileFormat {
    /// `50%`
    #[default]
    Percent,
    /// `50th`
    Ordinal,
}

impl fmt::Display for PercentileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent => write!(f, "percent"),
            Self::Ordinal => write!(f, "ordinal"),
        }
    }
}

/// English ordinal suffix of a number
#[must_use]
pub fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Format a percentile in the given variant
#[must_use]
pub fn format_percentile(percentile: u8, format: PercentileFormat) -> String {
    match format {
        PercentileFormat::Percent => format!("{percentile}%"),
        PercentileFormat::Ordinal => {
            format!("{percentile}{}", ordinal_suffix(u32::from(percentile)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals() {
        let formatted: Vec<String> = [0, 1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 100, 101, 111]
            .into_iter()
            .map(|n| format!("{n}{}", ordinal_suffix(n)))
            .collect();
        assert_eq!(
            formatted,
            vec![
                "0th", "1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "23rd",
                "100th", "101st", "111th"
            ]
        );
    }

    #[test]
    fn test_format_variants() {
        assert_eq!(format_percentile(50, PercentileFormat::Percent), "50%");
        assert_eq!(format_percentile(50, PercentileFormat::Ordinal), "50th");
        assert_eq!(format_percentile(1, PercentileFormat::Ordinal), "1st");
    }

    #[test]
    fn test_format_parses_from_config_names() {
        let format: PercentileFormat = serde_json::from_str("\"ordinal\"").unwrap();
        assert_eq!(format, PercentileFormat::Ordinal);
    }
}
