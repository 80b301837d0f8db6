// ---------------------------------------------------------------------------
// Sample – one line of a result file
// ---------------------------------------------------------------------------

/// One benchmark measurement: input size and the runtimes of both variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub size: i64,
    /// Runtime of the new implementation.
    pub new_time: f64,
    /// Runtime of the old implementation.
    pub old_time: f64,
}

// ---------------------------------------------------------------------------
// BenchmarkRun – a whole result file
// ---------------------------------------------------------------------------

/// All samples of one result file, in file order.
///
/// The order is the x-axis order of the plot and is never re-sorted.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkRun {
    /// Iteration index the file was loaded for.
    pub index: usize,
    pub samples: Vec<Sample>,
}

impl BenchmarkRun {
    pub fn new(index: usize, samples: Vec<Sample>) -> Self {
        BenchmarkRun { index, samples }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the run has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Size column as floats, ready for a plot axis.
    pub fn sizes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.size as f64).collect()
    }

    pub fn new_times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.new_time).collect()
    }

    pub fn old_times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.old_time).collect()
    }
}

// ---------------------------------------------------------------------------
// SmoothedRun – the smoother's output
// ---------------------------------------------------------------------------

/// A labelled smoothed column. `None` marks a position whose window was not full.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

impl Series {
    pub fn new(label: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Series {
            label: label.into(),
            values,
        }
    }

    /// Number of defined positions.
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Sizes plus both smoothed runtime series of one run.
#[derive(Debug, Clone)]
pub struct SmoothedRun {
    pub index: usize,
    pub sizes: Vec<f64>,
    pub new: Series,
    pub old: Series,
}

impl SmoothedRun {
    /// Both series in legend order.
    pub fn series(&self) -> [&Series; 2] {
        [&self.new, &self.old]
    }
}
