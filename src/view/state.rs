use crate::currency::format_currency;
use crate::types::HistoryPoint;

// ---------------------------------------------------------------------------
// Cursor state
// ---------------------------------------------------------------------------

/// Which bucket the terminal cursor sits on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    selected: usize,
    len: usize,
}

impl ViewState {
    /// Starts on the most recent bucket.
    pub fn new(len: usize) -> Self {
        Self {
            selected: len.saturating_sub(1),
            len,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn next(&mut self) {
        if self.selected + 1 < self.len {
            self.selected += 1;
        }
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.len.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Series helpers
// ---------------------------------------------------------------------------

pub fn price_series(points: &[HistoryPoint]) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|p| (p.bucket.timestamp() as f64, p.min_buyout as f64))
        .collect()
}

pub fn volume_series(points: &[HistoryPoint]) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|p| (p.bucket.timestamp() as f64, p.total_quantity as f64))
        .collect()
}

/// `[min, max]` of a coordinate, padded so the bounds are never equal.
pub fn bounds(values: impl Iterator<Item = f64>, floor_at_zero: bool) -> [f64; 2] {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    let lo = if floor_at_zero { 0.0 } else { lo };
    if hi > lo {
        [lo, hi]
    } else {
        [lo, lo + 1.0]
    }
}

/// Three evenly spaced price labels across the axis.
pub fn price_labels(bounds: [f64; 2]) -> Vec<String> {
    let [lo, hi] = bounds;
    [lo, (lo + hi) / 2.0, hi]
        .iter()
        .map(|v| format_currency(v.max(0.0).round() as u64))
        .collect()
}

/// First, middle and last bucket as axis labels.
pub fn time_labels(points: &[HistoryPoint]) -> Vec<String> {
    if points.is_empty() {
        return Vec::new();
    }
    [0, points.len() / 2, points.len() - 1]
        .iter()
        .map(|&i| points[i].bucket.format("%a %m-%d %H:%M").to_string())
        .collect()
}

/// Hover text split into display lines.
pub fn hover_lines(point: &HistoryPoint) -> Vec<&str> {
    point.hover_text.split("<br>").collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn series(n: usize) -> Vec<HistoryPoint> {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| HistoryPoint {
                bucket: t0 + Duration::hours(i as i64),
                weekday: "Monday".to_string(),
                min_buyout: 100 * (i as u64 + 1),
                formatted_min_buyout: format_currency(100 * (i as u64 + 1)),
                total_quantity: i as u64,
                hover_text: format!("Monday<br>Price: {}<br>Volume: {i}", format_currency(100)),
            })
            .collect()
    }

    #[test]
    fn cursor_starts_on_latest_bucket() {
        assert_eq!(ViewState::new(5).selected(), 4);
        assert_eq!(ViewState::new(0).selected(), 0);
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut s = ViewState::new(3);
        s.next();
        assert_eq!(s.selected(), 2);
        s.prev();
        s.prev();
        s.prev();
        assert_eq!(s.selected(), 0);
        s.last();
        assert_eq!(s.selected(), 2);
        s.first();
        assert_eq!(s.selected(), 0);
    }

    #[test]
    fn bounds_never_collapse() {
        assert_eq!(bounds([5.0, 5.0].into_iter(), false), [5.0, 6.0]);
        assert_eq!(bounds([3.0, 9.0].into_iter(), true), [0.0, 9.0]);
        assert_eq!(bounds(std::iter::empty(), false), [0.0, 1.0]);
    }

    #[test]
    fn labels_follow_the_series() {
        let pts = series(3);
        assert_eq!(
            time_labels(&pts),
            vec!["Mon 01-01 00:00", "Mon 01-01 01:00", "Mon 01-01 02:00"]
        );
        assert_eq!(
            price_labels([100.0, 20_100.0]),
            vec!["0g 1s 0c", "1g 1s 0c", "2g 1s 0c"]
        );
        assert!(time_labels(&[]).is_empty());
    }

    #[test]
    fn hover_text_splits_on_breaks() {
        let pts = series(1);
        assert_eq!(
            hover_lines(&pts[0]),
            vec!["Monday", "Price: 0g 1s 0c", "Volume: 0"]
        );
    }

    #[test]
    fn series_use_epoch_seconds() {
        let pts = series(2);
        let price = price_series(&pts);
        let volume = volume_series(&pts);
        assert_eq!(price[1].0 - price[0].0, 3_600.0);
        assert_eq!(price[1].1, 200.0);
        assert_eq!(volume[1].1, 1.0);
    }
}
