use crate::types::HistoryPoint;

/// Price axis tick positions, in copper.
///
/// Ticks start at the lowest minimum buyout and advance by `step` while below
/// `max + step`, so there is always at least one tick and the last tick is
/// never below the highest price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTicks {
    pub values: Vec<u64>,
    pub step: u64,
}

impl PriceTicks {
    /// `None` when there are no points to span.
    pub fn from_points(points: &[HistoryPoint], step: u64) -> Option<Self> {
        let step = step.max(1);
        let min = points.iter().map(|p| p.min_buyout).min()?;
        let max = points.iter().map(|p| p.min_buyout).max()?;

        let end = max.saturating_add(step);
        let values = std::iter::successors(Some(min), |v| v.checked_add(step))
            .take_while(|v| *v < end)
            .collect();

        Some(Self { values, step })
    }

    /// Axis bounds covering every tick; widened by one step when there is a single tick.
    pub fn axis_range(&self) -> (u64, u64) {
        let lo = self.values.first().copied().unwrap_or(0);
        let hi = self.values.last().copied().unwrap_or(lo);
        if hi > lo {
            (lo, hi)
        } else {
            (lo, lo.saturating_add(self.step))
        }
    }
}
