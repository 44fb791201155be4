//! Prestige percentile lookup
//!
//! The weighted mean prestige of a set of positions is placed on the
//! population reference curve by nearest-value lookup. Among equidistant
//! curve entries the one stored first wins.

use crate::models::PrestigePoint;
use crate::utils::logging::log_warning;

/// Weighted arithmetic mean of `(weight, value)` pairs
///
/// Returns `None` when the total weight is zero, which includes the empty
/// input. Sums that overflow yield a non-finite mean, which callers must check.
#[must_use]
pub fn weighted_mean<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (total_weight, weighted_sum) = pairs
        .into_iter()
        .fold((0.0_f64, 0.0_f64), |(tw, ws), (w, v)| (tw + w, ws + w * v));

    if total_weight == 0.0 {
        return None;
    }
    Some(weighted_sum / total_weight)
}

/// The prestige reference curve of the population
///
/// Points keep their stored order; a sorted index over them supports
/// binary-search lookups.
#[derive(Debug, Clone, Default)]
pub struct PrestigeCurve {
    points: Vec<PrestigePoint>,
    /// Point indices sorted by `(prestige, stored position)`
    order: Vec<usize>,
}

impl PrestigeCurve {
    /// Build a curve, dropping points with non-finite coordinates
    #[must_use]
    pub fn new(points: Vec<PrestigePoint>) -> Self {
        let total = points.len();
        let points: Vec<PrestigePoint> = points.into_iter().filter(PrestigePoint::is_finite).collect();
        if points.len() < total {
            log_warning(
                &format!(
                    "Dropped {} prestige reference points with missing values",
                    total - points.len()
                ),
                None,
            );
        }

        let mut order: Vec<usize> = (0..points.len()).collect();
        order.sort_by(|&a, &b| points[a].prestige.total_cmp(&points[b].prestige).then(a.cmp(&b)));

        Self { points, order }
    }

    /// Points in their stored order
    #[must_use]
    pub fn points(&self) -> &[PrestigePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Find the point whose prestige is closest to `value`
    ///
    /// Ties between equidistant points resolve to the point stored first.
    /// Returns `None` for an empty curve or a non-finite `value`.
    #[must_use]
    pub fn nearest(&self, value: f64) -> Option<&PrestigePoint> {
        if self.points.is_empty() || !value.is_finite() {
            return None;
        }

        let prestige = |i: usize| self.points[i].prestige;
        let split = self.order.partition_point(|&i| prestige(i) < value);

        let mut best: Option<(f64, usize)> = None;
        let mut consider = |distance: f64, idx: usize| {
            let better = match best {
                None => true,
                Some((d, i)) => distance < d || (distance == d && idx < i),
            };
            if better {
                best = Some((distance, idx));
            }
        };

        // Smallest prestige at or above the value; `order` puts the earliest stored duplicate first
        if let Some(&idx) = self.order.get(split) {
            consider(prestige(idx) - value, idx);
        }

        // Largest prestige below the value, again taking the earliest stored duplicate
        if split > 0 {
            let below = prestige(self.order[split - 1]);
            let first = self.order.partition_point(|&i| prestige(i) < below);
            let idx = self.order[first];
            consider(value - below, idx);
        }

        best.map(|(_, idx)| &self.points[idx])
    }

    /// Percentile (0-100) of the point nearest to `value`
    ///
    /// The matched fraction is scaled to 0-100 and rounded half to even.
    #[must_use]
    pub fn percentile_of(&self, value: f64) -> Option<u8> {
        self.nearest(value).map(|point| {
            let scaled = (point.percentile * 100.0).round_ties_even().clamp(0.0, 100.0);
            // Clamped to 0..=100 above
            scaled as u8
        })
    }
}
