// ---------------------------------------------------------------------------
// Decade-aligned log axis
// ---------------------------------------------------------------------------

/// A log10 axis spanning whole decades, `10^lo_exp ..= 10^hi_exp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecadeAxis {
    lo_exp: i32,
    hi_exp: i32,
}

impl Default for DecadeAxis {
    /// `[1, 10]`, used when there is nothing to plot.
    fn default() -> Self {
        DecadeAxis { lo_exp: 0, hi_exp: 1 }
    }
}

impl DecadeAxis {
    /// Smallest decade-aligned axis containing every positive finite value.
    /// Returns `None` when no value can be placed on a log axis.
    pub fn covering<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite() && *v > 0.0)
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;

        let lo_exp = min.log10().floor() as i32;
        let mut hi_exp = max.log10().ceil() as i32;
        if hi_exp <= lo_exp {
            hi_exp = lo_exp + 1;
        }
        Some(DecadeAxis { lo_exp, hi_exp })
    }

    pub fn lo(&self) -> f64 {
        10f64.powi(self.lo_exp)
    }

    pub fn hi(&self) -> f64 {
        10f64.powi(self.hi_exp)
    }

    /// Major ticks: every power of ten on the axis.
    pub fn majors(&self) -> Vec<f64> {
        (self.lo_exp..=self.hi_exp).map(|e| 10f64.powi(e)).collect()
    }

    /// Minor ticks: `k * 10^e` for `k = 1..=9` in every decade of the axis.
    pub fn minors(&self) -> Vec<f64> {
        (self.lo_exp..self.hi_exp)
            .flat_map(|e| {
                let base = 10f64.powi(e);
                (1..=9).map(move |k| k as f64 * base)
            })
            .collect()
    }

    /// Every tick position, majors and minors merged, ascending.
    pub fn all_ticks(&self) -> Vec<f64> {
        let mut ticks = self.minors();
        ticks.push(self.hi());
        ticks
    }
}

/// Fixed-point label with one decimal place.
pub fn format_tick(v: f64) -> String {
    format!("{v:.1}")
}

/// Split `[from, to]` on a log axis into `count` dashes of equal on-screen
/// length, each followed by a gap of `gap` times its length.
pub fn log_dashes(from: f64, to: f64, count: usize, gap: f64) -> Vec<(f64, f64)> {
    if count == 0 || !(from > 0.0 && to > from) {
        return Vec::new();
    }
    let (a, b) = (from.log10(), to.log10());
    let period = (b - a) / count as f64;
    let dash = period / (1.0 + gap);
    (0..count)
        .map(|i| {
            let start = a + period * i as f64;
            (10f64.powf(start), 10f64.powf(start + dash))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
    }

    #[test]
    fn covering_snaps_to_decades() {
        let axis = DecadeAxis::covering([3.0, 250.0, 40.0]).unwrap();
        assert_eq!(axis.lo(), 1.0);
        assert_eq!(axis.hi(), 1000.0);
    }

    #[test]
    fn covering_exact_powers() {
        let axis = DecadeAxis::covering([10.0, 1000.0]).unwrap();
        assert_eq!(axis.majors(), vec![10.0, 100.0, 1000.0]);
    }

    #[test]
    fn single_value_gets_one_decade() {
        let axis = DecadeAxis::covering([5.0]).unwrap();
        assert_eq!((axis.lo(), axis.hi()), (1.0, 10.0));
        let axis = DecadeAxis::covering([100.0]).unwrap();
        assert_eq!((axis.lo(), axis.hi()), (100.0, 1000.0));
    }

    #[test]
    fn covering_ignores_values_off_the_log_axis() {
        let axis = DecadeAxis::covering([0.0, -4.0, f64::NAN, f64::INFINITY, 0.5]).unwrap();
        assert!(close(axis.lo(), 0.1));
        assert_eq!(axis.hi(), 1.0);
        assert!(DecadeAxis::covering([0.0, -1.0]).is_none());
        assert!(DecadeAxis::covering(Vec::new()).is_none());
    }

    #[test]
    fn minors_fill_each_decade() {
        let axis = DecadeAxis::covering([1.0, 100.0]).unwrap();
        let minors = axis.minors();
        assert_eq!(minors.len(), 18);
        assert!(close(minors[0], 1.0));
        assert!(close(minors[8], 9.0));
        assert!(close(minors[9], 10.0));
        assert!(close(minors[17], 90.0));
    }

    #[test]
    fn all_ticks_are_ascending_and_end_on_the_top_decade() {
        let axis = DecadeAxis::covering([0.02, 3.0]).unwrap();
        let ticks = axis.all_ticks();
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
        assert!(close(ticks[0], 0.01));
        assert_eq!(*ticks.last().unwrap(), 10.0);
        for major in axis.majors() {
            assert!(ticks.iter().any(|t| close(*t, major)));
        }
    }

    #[test]
    fn ticks_use_one_decimal() {
        assert_eq!(format_tick(100.0), "100.0");
        assert_eq!(format_tick(2.0), "2.0");
        assert_eq!(format_tick(0.5), "0.5");
        assert_eq!(format_tick(0.04), "0.0");
    }

    #[test]
    fn dashes_cover_the_span_in_log_space() {
        let dashes = log_dashes(1.0, 100.0, 4, 1.0);
        assert_eq!(dashes.len(), 4);
        assert!(close(dashes[0].0, 1.0));
        assert!(close(dashes[0].1, 10f64.powf(0.25)));
        assert!(close(dashes[1].0, 10f64.powf(0.5)));
        assert!(dashes.iter().all(|(a, b)| a < b && *b <= 100.0));
    }

    #[test]
    fn degenerate_dash_requests_are_empty() {
        assert!(log_dashes(1.0, 10.0, 0, 1.0).is_empty());
        assert!(log_dashes(0.0, 10.0, 3, 1.0).is_empty());
        assert!(log_dashes(10.0, 1.0, 3, 1.0).is_empty());
    }
}
