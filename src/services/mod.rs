pub mod chart_selector;
pub mod dashboard;
pub mod goal_distribution;
pub mod loader;
pub mod normalizer;

pub use chart_selector::{select, ChartKind, ChartSpec};
pub use dashboard::{load_dashboard, Dashboard};
