use crate::chart_style::{
    print_saved, sanitize_file_stem, value_range, year_range, Canvas, BAND_OPACITY, FONT,
    FORECAST_COLOR, HISTORY_COLOR,
};
use crate::config::{ShowcaseConfig, FORECAST_EXAMPLE_PNG};
use crate::data_loader::DataLoader;
use crate::models::{ConfidenceBand, SourceKind, YearTable};
use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::path::{Path, PathBuf};

pub const GRID_COLUMNS: usize = 3;

type Area<'b> = DrawingArea<BitMapBackend<'b>, Shift>;

/// Sizes (in points) for one history/forecast panel.
struct PanelStyle {
    title_pt: f64,
    label_pt: f64,
    line_pt: f64,
    marker_pt: f64,
    legend: bool,
    axis_titles: bool,
}

impl PanelStyle {
    fn full() -> Self {
        Self {
            title_pt: 13.0,
            label_pt: 9.0,
            line_pt: 1.5,
            marker_pt: 3.0,
            legend: true,
            axis_titles: true,
        }
    }

    fn grid_cell() -> Self {
        Self {
            title_pt: 8.0,
            label_pt: 6.0,
            line_pt: 1.0,
            marker_pt: 2.0,
            legend: false,
            axis_titles: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct ForecastCharts {
    pub squares: Vec<PathBuf>,
    pub grid: Option<PathBuf>,
}

/// Overlays precomputed forecasts on the historical series.
pub struct ForecastPlotter<'a> {
    config: &'a ShowcaseConfig,
    canvas: Canvas,
}

impl<'a> ForecastPlotter<'a> {
    pub fn new(config: &'a ShowcaseConfig) -> Self {
        Self {
            config,
            canvas: Canvas::new(config.dpi),
        }
    }

    /// Single overlay for the first forecast technology that also has
    /// history. Returns `None` when nothing is shared.
    pub fn example_plot(&self, history: &YearTable, forecast_path: &Path) -> Result<Option<PathBuf>> {
        let forecast = DataLoader::new()
            .load(forecast_path)
            .context("loading forecast for example plot")?;

        let Some(tech) = forecast
            .column_names()
            .find(|name| history.has_column(name))
        else {
            log::info!("No technology shared by history and {}", forecast_path.display());
            return Ok(None);
        };

        let history_points = history.series(tech).unwrap_or_default();
        let forecast_points = forecast.series(tech).unwrap_or_default();

        let path = self.config.output_path(FORECAST_EXAMPLE_PNG);
        let root = BitMapBackend::new(&path, self.canvas.size(10.0, 5.0)).into_drawing_area();
        root.fill(&WHITE)?;
        self.draw_panel(
            &root,
            &format!("Historical and 5-year Forecast: {}", tech),
            &PanelStyle::full(),
            Some(history_points.as_slice()),
            &forecast_points,
            None,
        )?;
        root.present()?;
        drop(root);

        print_saved(&path);
        Ok(Some(path))
    }

    /// One square image per forecast technology, then the grid composite.
    pub fn plot_source(
        &self,
        kind: SourceKind,
        history: &YearTable,
        forecast: &YearTable,
    ) -> Result<ForecastCharts> {
        let mut charts = ForecastCharts::default();
        let techs = &forecast.columns;
        if techs.is_empty() {
            println!("No technology columns in {} forecasts", kind.label());
            return Ok(charts);
        }

        let band = forecast.confidence_band();
        let out_dir = self.config.forecast_chart_dir(kind);
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("creating {}", out_dir.display()))?;

        for column in techs {
            let tech = column.name.as_str();
            let history_points = history.series(tech);
            if history_points.is_none() {
                println!("No historical data for {}", tech);
            }
            let forecast_points = forecast.series(tech).unwrap_or_default();

            let path = out_dir.join(format!("{}.png", sanitize_file_stem(tech)));
            let root = BitMapBackend::new(&path, self.canvas.size(6.0, 6.0)).into_drawing_area();
            root.fill(&WHITE)?;
            self.draw_panel(
                &root,
                &format!("{} ({})", tech, kind.label()),
                &PanelStyle::full(),
                history_points.as_deref(),
                &forecast_points,
                band.as_ref(),
            )?;
            root.present()?;
            drop(root);

            print_saved(&path);
            charts.squares.push(path);
        }

        charts.grid = Some(self.grid_plot(kind, history, forecast)?);
        Ok(charts)
    }

    fn grid_plot(&self, kind: SourceKind, history: &YearTable, forecast: &YearTable) -> Result<PathBuf> {
        let techs = &forecast.columns;
        let rows = techs.len().div_ceil(GRID_COLUMNS).max(1);

        let path = self.config.forecast_grid_path(kind);
        let root = BitMapBackend::new(
            &path,
            self.canvas.size(5.0 * GRID_COLUMNS as f64, 4.0 * rows as f64),
        )
        .into_drawing_area();
        root.fill(&WHITE)?;

        // Cells past the last technology stay blank.
        let cells = root.split_evenly((rows, GRID_COLUMNS));
        for (column, cell) in techs.iter().zip(cells.iter()) {
            let tech = column.name.as_str();
            let history_points = history.series(tech);
            let forecast_points = forecast.series(tech).unwrap_or_default();
            self.draw_panel(
                cell,
                tech,
                &PanelStyle::grid_cell(),
                history_points.as_deref(),
                &forecast_points,
                None,
            )?;
        }
        root.present()?;
        drop(cells);
        drop(root);

        print_saved(&path);
        Ok(path)
    }

    fn draw_panel(
        &self,
        area: &Area<'_>,
        title: &str,
        style: &PanelStyle,
        history: Option<&[(i32, f64)]>,
        forecast: &[(i32, f64)],
        band: Option<&ConfidenceBand>,
    ) -> Result<()> {
        let canvas = self.canvas;
        let history = history.unwrap_or(&[]);
        let band_points: &[(i32, f64, f64)] = band.map(|b| b.points.as_slice()).unwrap_or(&[]);

        let x_range = year_range(
            history
                .iter()
                .chain(forecast.iter())
                .map(|(year, _)| *year)
                .chain(band_points.iter().map(|(year, _, _)| *year)),
        )
        .unwrap_or(0..1);
        let y_range = value_range(
            history
                .iter()
                .chain(forecast.iter())
                .map(|(_, value)| *value)
                .chain(band_points.iter().flat_map(|(_, lo, hi)| [*lo, *hi])),
        )
        .unwrap_or(0.0..1.0);
        let year_labels = (x_range.end - x_range.start + 1).clamp(2, 8) as usize;

        let mut chart = ChartBuilder::on(area)
            .caption(title, (FONT, canvas.pt(style.title_pt)).into_font())
            .margin(canvas.pt(style.label_pt))
            .x_label_area_size(canvas.pt(style.label_pt * 3.0))
            .y_label_area_size(canvas.pt(style.label_pt * 5.0))
            .build_cartesian_2d(x_range, y_range)?;

        let mut mesh = chart.configure_mesh();
        mesh.x_labels(year_labels)
            .label_style((FONT, canvas.pt(style.label_pt)).into_font())
            .light_line_style(BLACK.mix(0.05));
        if style.axis_titles {
            mesh.x_desc("Year")
                .y_desc("Value")
                .axis_desc_style((FONT, canvas.pt(style.label_pt + 2.0)).into_font());
        }
        mesh.draw()?;

        if band_points.len() >= 2 {
            let mut outline: Vec<(i32, f64)> =
                band_points.iter().map(|(year, _, hi)| (*year, *hi)).collect();
            outline.extend(band_points.iter().rev().map(|(year, lo, _)| (*year, *lo)));
            chart.draw_series(std::iter::once(Polygon::new(
                outline,
                FORECAST_COLOR.mix(BAND_OPACITY).filled(),
            )))?;
        }

        let line_width = canvas.pt(style.line_pt);
        let marker = canvas.pt(style.marker_pt);

        if !history.is_empty() {
            chart
                .draw_series(
                    LineSeries::new(history.iter().copied(), HISTORY_COLOR.stroke_width(line_width))
                        .point_size(marker),
                )?
                .label("Historical")
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], HISTORY_COLOR.stroke_width(3))
                });
        }

        if !forecast.is_empty() {
            chart
                .draw_series(DashedLineSeries::new(
                    forecast.iter().copied(),
                    canvas.pt(4.0),
                    canvas.pt(2.5),
                    FORECAST_COLOR.stroke_width(line_width),
                ))?
                .label("Forecast")
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], FORECAST_COLOR.stroke_width(3))
                });
            chart.draw_series(
                forecast
                    .iter()
                    .map(|point| Circle::new(*point, marker, FORECAST_COLOR.filled())),
            )?;
        }

        if style.legend && !(history.is_empty() && forecast.is_empty()) {
            chart
                .configure_series_labels()
                .label_font((FONT, canvas.pt(style.label_pt)).into_font())
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        Ok(())
    }
}
