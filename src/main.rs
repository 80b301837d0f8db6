mod app;
mod color;
mod config;
mod data;
mod error;
mod render;

use std::path::PathBuf;

use anyhow::Result;

use app::BenchPlotApp;
use config::PlotConfig;

fn main() -> Result<()> {
    env_logger::init();

    // Optional JSON config; without one the fixed data{n}.txt batch runs.
    let config = match std::env::args_os().nth(1) {
        Some(path) => PlotConfig::from_json_file(&PathBuf::from(path))?,
        None => PlotConfig::default(),
    };

    let app = BenchPlotApp::new(config)?;
    app.run()?;
    Ok(())
}
