//! Writes a synthetic `data0.txt` … `data100.txt` set for trying out the plotter.
//!
//! Usage: `generate_sample [output_dir]`

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

const NUM_BENCHES: usize = 101;
const REPEATS_PER_SIZE: usize = 3;

/// Seeded noise source: splitmix64 state, uniform and zero-mean normal draws.
struct Noise(u64);

impl Noise {
    fn uniform(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    fn normal(&mut self, std_dev: f64) -> f64 {
        let r = (-2.0 * self.uniform().max(1e-15).ln()).sqrt();
        r * (std::f64::consts::TAU * self.uniform()).cos() * std_dev
    }
}

/// Sizes in bytes: 8 to 16 MiB, eight steps per doubling.
fn sizes() -> Vec<u64> {
    let mut out: Vec<u64> = (0..=168)
        .map(|i| (8.0 * 2f64.powf(i as f64 / 8.0)).round() as u64)
        .collect();
    out.dedup();
    out
}

/// Runtime in ns of one lookup over `size` bytes.
///
/// Both variants pay a cache-miss term that grows with the array. The old,
/// branchy search additionally pays a misprediction penalty per level for the
/// unpredictable share of queries; the new one is branchless and pays a small
/// constant per level instead.
fn model(size: u64, unpredictable: f64, rng: &mut Noise) -> (f64, f64) {
    let levels = (size as f64 / 8.0).log2().max(1.0);
    let miss = if size > 32 * 1024 { (size as f64 / 32_768.0).log2() * 4.0 } else { 0.0 };

    let new = 2.0 + levels * 1.1 + miss;
    let old = 2.0 + levels * (0.6 + 7.5 * unpredictable) + miss;

    // Scheduler hiccups: rare large spikes on top of gaussian jitter.
    let jitter = |rng: &mut Noise, base: f64| {
        let spike = if rng.uniform() < 0.03 { base * rng.uniform() * 3.0 } else { 0.0 };
        (base + rng.normal(base * 0.04).abs() + spike).max(0.1)
    };
    (jitter(rng, new), jitter(rng, old))
}

fn main() -> Result<()> {
    let dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = Noise(42);
    let sizes = sizes();

    for n in 0..NUM_BENCHES {
        let path = dir.join(format!("data{n}.txt"));
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        let mut out = BufWriter::new(file);
        let unpredictable = n as f64 / 100.0;

        for &size in &sizes {
            for _ in 0..REPEATS_PER_SIZE {
                let (new, old) = model(size, unpredictable, &mut rng);
                writeln!(out, "{size},{new:.3},{old:.3}")?;
            }
        }
        out.flush()
            .with_context(|| format!("writing {}", path.display()))?;
    }

    println!(
        "Wrote {NUM_BENCHES} benchmark files ({} rows each) to {}",
        sizes.len() * REPEATS_PER_SIZE,
        dir.display()
    );
    Ok(())
}
