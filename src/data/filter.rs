use std::cmp::Ordering;
use std::collections::VecDeque;

use super::model::{BenchmarkRun, Series, SmoothedRun};
use crate::error::FilterError;

// ---------------------------------------------------------------------------
// Rolling quantile parameters
// ---------------------------------------------------------------------------

/// Trailing-window quantile settings.
///
/// A window is only evaluated once it holds `window` non-NaN values, so the
/// first `window - 1` positions of every series are undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollingQuantile {
    window: usize,
    quantile: f64,
}

impl RollingQuantile {
    pub fn new(window: usize, quantile: f64) -> Result<Self, FilterError> {
        if window == 0 {
            return Err(FilterError::EmptyWindow);
        }
        if !(0.0..=1.0).contains(&quantile) {
            return Err(FilterError::QuantileOutOfRange(quantile));
        }
        Ok(RollingQuantile { window, quantile })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn quantile(&self) -> f64 {
        self.quantile
    }

    /// Apply the filter to one column.
    ///
    /// Keeps the current window as a sorted vector, so each step is one
    /// binary-search insert and one removal.
    pub fn apply(&self, values: &[f64]) -> Vec<Option<f64>> {
        let mut out = Vec::with_capacity(values.len());
        let mut arrivals: VecDeque<f64> = VecDeque::with_capacity(self.window);
        let mut sorted: Vec<f64> = Vec::with_capacity(self.window);

        for &v in values {
            arrivals.push_back(v);
            if !v.is_nan() {
                let at = sorted.partition_point(|x| x.total_cmp(&v) == Ordering::Less);
                sorted.insert(at, v);
            }

            if arrivals.len() > self.window {
                if let Some(old) = arrivals.pop_front() {
                    if !old.is_nan() {
                        if let Ok(at) = sorted.binary_search_by(|x| x.total_cmp(&old)) {
                            sorted.remove(at);
                        }
                    }
                }
            }

            if sorted.len() < self.window {
                out.push(None);
            } else {
                out.push(Some(interpolate(&sorted, self.quantile)));
            }
        }
        out
    }

    /// Smooth both runtime columns of a run.
    pub fn smooth(&self, run: &BenchmarkRun) -> SmoothedRun {
        SmoothedRun {
            index: run.index,
            sizes: run.sizes(),
            new: Series::new("new", self.apply(&run.new_times())),
            old: Series::new("old", self.apply(&run.old_times())),
        }
    }
}

impl Default for RollingQuantile {
    fn default() -> Self {
        RollingQuantile {
            window: 20,
            quantile: 0.1,
        }
    }
}

/// Quantile of an ascending, non-empty slice, linear between order statistics.
pub fn interpolate(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let (a, b) = (sorted[lo], sorted[hi]);
    if lo == hi || a == b {
        return a;
    }
    a + (b - a) * (pos - lo as f64)
}
