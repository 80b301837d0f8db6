use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::PlotConfig;
use crate::data::filter::RollingQuantile;
use crate::data::loader;
use crate::render::plot;

// ---------------------------------------------------------------------------
// Batch driver
// ---------------------------------------------------------------------------

/// Runs load → smooth → render for every configured iteration.
pub struct BenchPlotApp {
    pub config: PlotConfig,
    smoother: RollingQuantile,
}

impl BenchPlotApp {
    pub fn new(config: PlotConfig) -> Result<Self> {
        config.validate()?;
        let smoother = config.smoother()?;
        Ok(Self { config, smoother })
    }

    /// Process iterations `0..runs` in order, stopping at the first failure.
    pub fn run(&self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.config.runs);
        for n in 0..self.config.runs {
            let out = self
                .process(n)
                .with_context(|| format!("iteration {n} failed"))?;
            written.push(out);
        }
        log::info!("wrote {} graphs", written.len());
        Ok(written)
    }

    /// Load, smooth and render one result file. Returns the image path.
    pub fn process(&self, n: usize) -> Result<PathBuf> {
        let input = self.config.input_path(n);
        let output = self.config.output_path(n);
        log::info!("{} -> {}", input.display(), output.display());

        let run = loader::load_file(&input, n)
            .with_context(|| format!("loading {}", input.display()))?;
        if run.is_empty() {
            log::warn!("{}: no samples", input.display());
        } else if run.len() < self.smoother.window() {
            log::warn!(
                "{}: {} samples, fewer than the window of {}",
                input.display(),
                run.len(),
                self.smoother.window()
            );
        }

        let smoothed = self.smoother.smooth(&run);
        log::debug!(
            "run {n}: q{} over {} samples, {}/{} points defined",
            self.smoother.quantile(),
            run.len(),
            smoothed.new.defined_count(),
            smoothed.old.defined_count()
        );
        plot::render_png(
            &output,
            &smoothed,
            &self.config.title_for(n),
            (self.config.width, self.config.height),
        )?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write as _;
    use std::path::Path;

    use super::*;
    use crate::color::generate_palette;
    use crate::error::LoadError;

    fn write_constant(path: &Path, rows: usize, value: f64) {
        let mut text = String::new();
        for i in 0..rows {
            writeln!(text, "{},{value},{value}", (i + 1) * 8).unwrap();
        }
        std::fs::write(path, text).unwrap();
    }

    fn app_in(dir: &Path, runs: usize) -> BenchPlotApp {
        BenchPlotApp::new(PlotConfig {
            runs,
            input_dir: dir.to_path_buf(),
            output_dir: dir.to_path_buf(),
            ..PlotConfig::default()
        })
        .unwrap()
    }

    fn assert_png(path: &Path, size: (u32, u32)) {
        let meta = std::fs::metadata(path).unwrap();
        assert!(meta.len() > 0, "{} is empty", path.display());
        let img = image::open(path).unwrap();
        assert_eq!((img.width(), img.height()), size);
    }

    /// Pixels in each series colour, counted over the lower half of the image.
    /// The legend sits in the upper right, so only curves land down here.
    fn curve_pixels_below_middle(path: &Path) -> [usize; 2] {
        let img = image::open(path).unwrap().to_rgb8();
        let palette = generate_palette(2);
        let mut counts = [0; 2];
        for (_, y, px) in img.enumerate_pixels() {
            if y < img.height() / 2 {
                continue;
            }
            for (count, color) in counts.iter_mut().zip(&palette) {
                if px.0 == [color.0, color.1, color.2] {
                    *count += 1;
                }
            }
        }
        counts
    }

    #[test]
    fn defined_series_are_drawn_in_their_colours() {
        let dir = tempfile::tempdir().unwrap();
        let mut text = String::new();
        for i in 0..60 {
            writeln!(text, "{},1.5,2.5", (i + 1) * 8).unwrap();
        }
        std::fs::write(dir.path().join("data0.txt"), text).unwrap();

        let out = app_in(dir.path(), 1).process(0).unwrap();
        let [new, old] = curve_pixels_below_middle(&out);
        assert!(new > 0, "no pixels in the 'new' colour");
        assert!(old > 0, "no pixels in the 'old' colour");
    }

    #[test]
    fn undefined_series_leave_no_curve_pixels() {
        let dir = tempfile::tempdir().unwrap();
        write_constant(&dir.path().join("data0.txt"), 19, 1.5);

        let out = app_in(dir.path(), 1).process(0).unwrap();
        assert_eq!(curve_pixels_below_middle(&out), [0, 0]);
    }

    #[test]
    fn constant_input_renders_graph() {
        let dir = tempfile::tempdir().unwrap();
        write_constant(&dir.path().join("data0.txt"), 25, 5.0);

        let out = app_in(dir.path(), 1).process(0).unwrap();
        assert_eq!(out, dir.path().join("graph0.png"));
        assert_png(&out, (640, 480));
    }

    #[test]
    fn short_input_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        write_constant(&dir.path().join("data0.txt"), 10, 5.0);

        let out = app_in(dir.path(), 1).process(0).unwrap();
        assert_png(&out, (640, 480));
    }

    #[test]
    fn empty_input_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data0.txt"), "").unwrap();

        let out = app_in(dir.path(), 1).process(0).unwrap();
        assert_png(&out, (640, 480));
    }

    #[test]
    fn run_writes_one_graph_per_iteration() {
        let dir = tempfile::tempdir().unwrap();
        for n in 0..3 {
            write_constant(&dir.path().join(format!("data{n}.txt")), 30, 1.0 + n as f64);
        }

        let written = app_in(dir.path(), 3).run().unwrap();
        assert_eq!(written.len(), 3);
        for (n, path) in written.iter().enumerate() {
            assert_eq!(*path, dir.path().join(format!("graph{n}.png")));
            assert_png(path, (640, 480));
        }
    }

    #[test]
    fn missing_input_aborts_remaining_iterations() {
        let dir = tempfile::tempdir().unwrap();
        write_constant(&dir.path().join("data0.txt"), 30, 2.0);
        write_constant(&dir.path().join("data2.txt"), 30, 2.0);

        let err = app_in(dir.path(), 3).run().unwrap_err();
        assert!(format!("{err:#}").contains("iteration 1"));
        let load = err.chain().find_map(|e| e.downcast_ref::<LoadError>());
        assert!(matches!(load, Some(LoadError::Open { .. })));

        assert!(dir.path().join("graph0.png").exists());
        assert!(!dir.path().join("graph1.png").exists());
        assert!(!dir.path().join("graph2.png").exists());
    }

    #[test]
    fn malformed_line_aborts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data0.txt"), "1,2,3\n4,5\n").unwrap();

        let err = app_in(dir.path(), 1).run().unwrap_err();
        let load = err.chain().find_map(|e| e.downcast_ref::<LoadError>());
        assert!(matches!(load, Some(LoadError::FieldCount { line: 2, found: 2 })));
        assert!(!dir.path().join("graph0.png").exists());
    }

    #[test]
    fn custom_size_and_patterns() {
        let dir = tempfile::tempdir().unwrap();
        write_constant(&dir.path().join("bench_4.csv"), 40, 3.0);
        let app = BenchPlotApp::new(PlotConfig {
            runs: 5,
            input_dir: dir.path().to_path_buf(),
            output_dir: dir.path().to_path_buf(),
            input_pattern: "bench_{n}.csv".into(),
            output_pattern: "plot_{n}.png".into(),
            width: 320,
            height: 200,
            ..PlotConfig::default()
        })
        .unwrap();

        let out = app.process(4).unwrap();
        assert_eq!(out, dir.path().join("plot_4.png"));
        assert_png(&out, (320, 200));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PlotConfig {
            window: 0,
            ..PlotConfig::default()
        };
        assert!(BenchPlotApp::new(config).is_err());
    }
}
