use std::path::{Path, PathBuf};

use crate::models::SourceKind;

pub const CAPACITY_FILE: &str = "cleaned_capacity_data.csv";
pub const GENERATION_FILE: &str = "cleaned_generation_data.csv";
pub const GENERATION_FORECAST_FILE: &str = "generation_forecasts.csv";
pub const CAPACITY_FORECAST_FILE: &str = "capacity_forecasts.csv";

pub const DEFAULT_OUTPUT_DIR: &str = "showcase";
pub const DEFAULT_DPI: u32 = 200;

pub const CAPACITY_TRENDS_PNG: &str = "capacity_trends.png";
pub const GENERATION_TRENDS_PNG: &str = "generation_trends.png";
pub const TOP_TECH_SHARE_PNG: &str = "top_tech_share.png";
pub const FORECAST_EXAMPLE_PNG: &str = "arima_forecast_example.png";
pub const FORECAST_TABLES_CSV: &str = "forecast_tables.csv";

#[derive(Debug, Clone)]
pub struct ShowcaseConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub dpi: u32,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            dpi: DEFAULT_DPI,
        }
    }
}

impl ShowcaseConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            dpi: DEFAULT_DPI,
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi.max(1);
        self
    }

    pub fn capacity_path(&self) -> PathBuf {
        self.input_dir.join(CAPACITY_FILE)
    }

    pub fn generation_path(&self) -> PathBuf {
        self.input_dir.join(GENERATION_FILE)
    }

    /// Input CSV holding the precomputed forecasts for `kind`.
    pub fn forecast_path(&self, kind: SourceKind) -> PathBuf {
        match kind {
            SourceKind::Generation => self.input_dir.join(GENERATION_FORECAST_FILE),
            SourceKind::Capacity => self.input_dir.join(CAPACITY_FORECAST_FILE),
        }
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    /// `forecasts/<kind>/` under the output directory.
    pub fn forecast_chart_dir(&self, kind: SourceKind) -> PathBuf {
        self.output_dir.join("forecasts").join(kind.label())
    }

    pub fn forecast_grid_path(&self, kind: SourceKind) -> PathBuf {
        self.output_dir
            .join(format!("forecasts_{}_grid.png", kind.label()))
    }

    pub fn output_root(&self) -> &Path {
        &self.output_dir
    }
}
