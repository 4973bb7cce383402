mod chart;
pub use chart::*;
mod visualizer;
pub use visualizer::*;
