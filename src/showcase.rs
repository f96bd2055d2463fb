use crate::config::ShowcaseConfig;
use crate::data_loader::DataLoader;
use crate::forecast_combiner::ForecastCombiner;
use crate::forecast_plotter::ForecastPlotter;
use crate::headline_charts::HeadlineCharts;
use crate::models::{SourceKind, YearTable};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Every file written by one run, in write order.
#[derive(Debug, Default)]
pub struct ShowcaseReport {
    pub charts: Vec<PathBuf>,
    pub forecast_table: Option<PathBuf>,
}

impl ShowcaseReport {
    fn record(&mut self, written: Option<PathBuf>) {
        self.charts.extend(written);
    }
}

pub struct ShowcaseRenderer {
    config: ShowcaseConfig,
    loader: DataLoader,
}

impl ShowcaseRenderer {
    pub fn new(config: ShowcaseConfig) -> Result<Self> {
        std::fs::create_dir_all(config.output_root())
            .with_context(|| format!("creating {}", config.output_root().display()))?;

        Ok(Self {
            config,
            loader: DataLoader::new(),
        })
    }

    pub fn generate_all(&self) -> Result<ShowcaseReport> {
        let mut report = ShowcaseReport::default();

        let capacity = self.loader.load_optional(&self.config.capacity_path())?;
        let generation = self.loader.load_optional(&self.config.generation_path())?;

        let headline = HeadlineCharts::new(&self.config);
        report.record(headline.capacity_trends(capacity.as_ref())?);
        report.record(headline.generation_trends(generation.as_ref())?);
        report.record(headline.top_tech_share(capacity.as_ref())?);

        if let Some(generation) = generation.as_ref() {
            report.record(self.forecast_example(generation));
        }

        for kind in SourceKind::ALL {
            let history = match kind {
                SourceKind::Generation => generation.as_ref(),
                SourceKind::Capacity => capacity.as_ref(),
            };
            self.forecast_charts(kind, history, &mut report)?;
        }

        report.forecast_table = ForecastCombiner::new(&self.config).combine()?;

        println!("Showcase generation complete.");
        Ok(report)
    }

    /// Any failure here is reported and swallowed.
    fn forecast_example(&self, generation: &YearTable) -> Option<PathBuf> {
        let forecast_path = self.config.forecast_path(SourceKind::Generation);
        if !forecast_path.exists() {
            return None;
        }

        match ForecastPlotter::new(&self.config).example_plot(generation, &forecast_path) {
            Ok(written) => written,
            Err(e) => {
                println!("Could not create forecast example plot: {:#}", e);
                log::warn!("Forecast example plot skipped: {:?}", e);
                None
            }
        }
    }

    fn forecast_charts(
        &self,
        kind: SourceKind,
        history: Option<&YearTable>,
        report: &mut ShowcaseReport,
    ) -> Result<()> {
        let forecast_path = self.config.forecast_path(kind);
        if !forecast_path.exists() {
            println!(
                "{} not found, skipping {} forecast charts",
                forecast_path.display(),
                kind.label()
            );
            return Ok(());
        }
        let Some(history) = history else {
            println!("No historical {} data, skipping {} forecast charts", kind.label(), kind.label());
            return Ok(());
        };

        let forecast = self.loader.load(&forecast_path)?;
        let charts = ForecastPlotter::new(&self.config).plot_source(kind, history, &forecast)?;
        report.charts.extend(charts.squares);
        report.record(charts.grid);
        Ok(())
    }
}

pub fn generate_showcase(config: ShowcaseConfig) -> Result<ShowcaseReport> {
    let renderer = ShowcaseRenderer::new(config)?;
    renderer.generate_all()
}
