/// Data layer: core types, loading, and smoothing.
///
/// Architecture:
/// ```text
///  data{n}.txt
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse lines → BenchmarkRun
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ BenchmarkRun  │  Vec<Sample>, file order
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  rolling quantile per column → SmoothedRun
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
