use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::data::filter::RollingQuantile;

/// Placeholder replaced by the iteration index in file names and the title.
pub const INDEX_PLACEHOLDER: &str = "{n}";

// ---------------------------------------------------------------------------
// Plot configuration
// ---------------------------------------------------------------------------

/// Run settings. Every field is optional in the JSON file; the defaults
/// reproduce the fixed `data{n}.txt` → `graph{n}.png` batch over 0..=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    /// Number of iterations, processed as `0..runs`.
    pub runs: usize,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub input_pattern: String,
    pub output_pattern: String,
    /// Rolling window length.
    pub window: usize,
    /// Quantile taken over each window.
    pub quantile: f64,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    pub title: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            runs: 101,
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            input_pattern: "data{n}.txt".to_string(),
            output_pattern: "graph{n}.png".to_string(),
            window: 20,
            quantile: 0.1,
            width: 640,
            height: 480,
            title: "partition point benchmark ({n}% of queries unpredictable)".to_string(),
        }
    }
}

impl PlotConfig {
    /// Read a JSON config file and validate it.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: PlotConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a plot.
    pub fn validate(&self) -> Result<()> {
        self.smoother()?;
        ensure!(
            self.width > 0 && self.height > 0,
            "image size {}x{} is empty",
            self.width,
            self.height
        );
        Ok(())
    }

    /// Smoother built from `window` and `quantile`.
    pub fn smoother(&self) -> Result<RollingQuantile> {
        Ok(RollingQuantile::new(self.window, self.quantile)?)
    }

    pub fn input_path(&self, n: usize) -> PathBuf {
        self.input_dir.join(expand(&self.input_pattern, n))
    }

    pub fn output_path(&self, n: usize) -> PathBuf {
        self.output_dir.join(expand(&self.output_pattern, n))
    }

    pub fn title_for(&self, n: usize) -> String {
        expand(&self.title, n)
    }
}

fn expand(pattern: &str, n: usize) -> String {
    pattern.replace(INDEX_PLACEHOLDER, &n.to_string())
}
