pub mod chart_style;
pub mod config;
pub mod data_loader;
pub mod forecast_combiner;
pub mod forecast_plotter;
pub mod headline_charts;
pub mod models;
pub mod showcase;

pub use config::ShowcaseConfig;
pub use data_loader::DataLoader;
pub use models::{ConfidenceBand, SourceKind, TechnologySeries, YearTable};
pub use showcase::{generate_showcase, ShowcaseRenderer, ShowcaseReport};
