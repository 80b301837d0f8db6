/// Rendering: decade-aligned log axes and the comparison chart.
pub mod plot;
pub mod ticks;
