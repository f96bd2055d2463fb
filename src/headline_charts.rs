use crate::chart_style::{
    print_saved, value_range, value_range_from_zero, year_range, Canvas, FONT, HISTORY_COLOR,
};
use crate::config::{ShowcaseConfig, CAPACITY_TRENDS_PNG, GENERATION_TRENDS_PNG, TOP_TECH_SHARE_PNG};
use crate::models::YearTable;
use anyhow::Result;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

pub const TOTAL_RENEWABLE: &str = "Total renewable";
pub const TOTAL_NON_RENEWABLE: &str = "Total non-renewable";

pub const MAJOR_GENERATION_TECHS: [&str; 3] = [
    "Solar photovoltaic",
    "Onshore wind energy",
    "Renewable hydropower",
];

pub const RENEWABLE_CAPACITY_TECHS: [&str; 6] = [
    "Solar photovoltaic",
    "Onshore wind energy",
    "Renewable hydropower",
    "Marine energy",
    "Solid biofuels",
    "Biogas",
];

/// The three fixed charts drawn from the historical tables.
pub struct HeadlineCharts<'a> {
    config: &'a ShowcaseConfig,
    canvas: Canvas,
}

impl<'a> HeadlineCharts<'a> {
    pub fn new(config: &'a ShowcaseConfig) -> Self {
        Self {
            config,
            canvas: Canvas::new(config.dpi),
        }
    }

    /// Renewable vs non-renewable totals. Needs both columns.
    pub fn capacity_trends(&self, capacity: Option<&YearTable>) -> Result<Option<PathBuf>> {
        let Some(capacity) = capacity else {
            return Ok(None);
        };
        let (Some(renewable), Some(non_renewable)) = (
            capacity.series(TOTAL_RENEWABLE),
            capacity.series(TOTAL_NON_RENEWABLE),
        ) else {
            log::debug!("Capacity totals not present, skipping {}", CAPACITY_TRENDS_PNG);
            return Ok(None);
        };

        let path = self.config.output_path(CAPACITY_TRENDS_PNG);
        self.draw_trend_chart(
            &path,
            (10.0, 5.0),
            "Total Capacity: Renewable vs Non-renewable",
            "Capacity",
            &[(TOTAL_RENEWABLE, renewable), (TOTAL_NON_RENEWABLE, non_renewable)],
        )?;
        print_saved(&path);
        Ok(Some(path))
    }

    /// One line per major technology found in the generation table.
    pub fn generation_trends(&self, generation: Option<&YearTable>) -> Result<Option<PathBuf>> {
        let Some(generation) = generation else {
            return Ok(None);
        };

        let majors: Vec<(&str, Vec<(i32, f64)>)> = MAJOR_GENERATION_TECHS
            .iter()
            .filter_map(|tech| generation.series(tech).map(|points| (*tech, points)))
            .collect();
        if majors.is_empty() {
            log::debug!("No major technologies in generation data, skipping {}", GENERATION_TRENDS_PNG);
            return Ok(None);
        }

        let path = self.config.output_path(GENERATION_TRENDS_PNG);
        self.draw_trend_chart(
            &path,
            (10.0, 6.0),
            "Generation Trends by Technology",
            "Generation",
            &majors,
        )?;
        print_saved(&path);
        Ok(Some(path))
    }

    /// Bar chart of the renewable technologies at the latest year.
    pub fn top_tech_share(&self, capacity: Option<&YearTable>) -> Result<Option<PathBuf>> {
        let Some(capacity) = capacity else {
            return Ok(None);
        };

        let techs: Vec<&str> = RENEWABLE_CAPACITY_TECHS
            .iter()
            .copied()
            .filter(|tech| capacity.has_column(tech))
            .collect();
        let (Some(latest_year), Some(latest_row)) = (capacity.latest_year(), capacity.latest_row())
        else {
            return Ok(None);
        };
        if techs.is_empty() {
            log::debug!("No renewable technologies in capacity data, skipping {}", TOP_TECH_SHARE_PNG);
            return Ok(None);
        }

        let values: Vec<Option<f64>> = techs
            .iter()
            .map(|tech| capacity.value_at(latest_row, tech))
            .collect();

        let path = self.config.output_path(TOP_TECH_SHARE_PNG);
        self.draw_bar_chart(
            &path,
            &format!("Renewable Technology Contribution ({})", latest_year),
            &techs,
            &values,
        )?;
        print_saved(&path);
        Ok(Some(path))
    }

    fn draw_trend_chart(
        &self,
        path: &Path,
        size_in: (f64, f64),
        title: &str,
        y_desc: &str,
        series: &[(&str, Vec<(i32, f64)>)],
    ) -> Result<()> {
        let canvas = self.canvas;
        let x_range = year_range(series.iter().flat_map(|(_, p)| p.iter().map(|(y, _)| *y)))
            .unwrap_or(0..1);
        let y_range = value_range(series.iter().flat_map(|(_, p)| p.iter().map(|(_, v)| *v)))
            .unwrap_or(0.0..1.0);
        let year_labels = (x_range.end - x_range.start + 1).clamp(2, 12) as usize;

        let root = BitMapBackend::new(path, canvas.size(size_in.0, size_in.1)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (FONT, canvas.pt(14.0)).into_font())
            .margin(canvas.pt(8.0))
            .x_label_area_size(canvas.pt(32.0))
            .y_label_area_size(canvas.pt(48.0))
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc(y_desc)
            .x_labels(year_labels)
            .label_style((FONT, canvas.pt(9.0)).into_font())
            .axis_desc_style((FONT, canvas.pt(11.0)).into_font())
            .light_line_style(BLACK.mix(0.05))
            .draw()?;

        for (i, (name, points)) in series.iter().enumerate() {
            let color = Canvas::color(i);
            chart
                .draw_series(
                    LineSeries::new(points.iter().copied(), color.stroke_width(canvas.pt(1.5)))
                        .point_size(canvas.pt(3.0)),
                )?
                .label(*name)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
                });
        }

        chart
            .configure_series_labels()
            .label_font((FONT, canvas.pt(9.0)).into_font())
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }

    fn draw_bar_chart(
        &self,
        path: &Path,
        title: &str,
        names: &[&str],
        values: &[Option<f64>],
    ) -> Result<()> {
        let canvas = self.canvas;
        let y_range = value_range_from_zero(values.iter().flatten().copied());

        let root = BitMapBackend::new(path, canvas.size(8.0, 6.0)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (FONT, canvas.pt(14.0)).into_font())
            .margin(canvas.pt(8.0))
            .x_label_area_size(canvas.pt(32.0))
            .y_label_area_size(canvas.pt(48.0))
            .build_cartesian_2d((0..names.len()).into_segmented(), y_range)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc("Capacity")
            .x_labels(names.len())
            .x_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(i) => names.get(*i).map(|n| n.to_string()).unwrap_or_default(),
                _ => String::new(),
            })
            .label_style((FONT, canvas.pt(8.0)).into_font())
            .axis_desc_style((FONT, canvas.pt(11.0)).into_font())
            .draw()?;

        // Missing cells leave an empty slot, like a NaN bar.
        chart.draw_series(
            Histogram::vertical(&chart)
                .style(HISTORY_COLOR.filled())
                .margin(canvas.pt(10.0))
                .data(
                    values
                        .iter()
                        .enumerate()
                        .filter_map(|(i, value)| value.map(|v| (i, v))),
                ),
        )?;

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TechnologySeries;

    fn table(columns: &[(&str, Vec<Option<f64>>)]) -> YearTable {
        YearTable {
            years: (2015..=2020).collect(),
            columns: columns
                .iter()
                .map(|(name, values)| TechnologySeries {
                    name: name.to_string(),
                    values: values.clone(),
                })
                .collect(),
        }
    }

    fn ramp(start: f64) -> Vec<Option<f64>> {
        (0..6).map(|i| Some(start + i as f64)).collect()
    }

    fn config(dir: &Path) -> ShowcaseConfig {
        ShowcaseConfig::new(dir, dir).with_dpi(40)
    }

    #[test]
    fn test_capacity_trends_requires_both_totals() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let charts = HeadlineCharts::new(&config);

        let partial = table(&[(TOTAL_RENEWABLE, ramp(10.0))]);
        assert!(charts.capacity_trends(Some(&partial)).unwrap().is_none());
        assert!(!dir.path().join(CAPACITY_TRENDS_PNG).exists());

        let full = table(&[(TOTAL_RENEWABLE, ramp(10.0)), (TOTAL_NON_RENEWABLE, ramp(30.0))]);
        let written = charts.capacity_trends(Some(&full)).unwrap();
        assert_eq!(written, Some(dir.path().join(CAPACITY_TRENDS_PNG)));
        assert!(dir.path().join(CAPACITY_TRENDS_PNG).exists());
    }

    #[test]
    fn test_generation_trends_needs_a_major_tech() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let charts = HeadlineCharts::new(&config);

        assert!(charts.generation_trends(None).unwrap().is_none());

        let minor = table(&[("Geothermal energy", ramp(1.0))]);
        assert!(charts.generation_trends(Some(&minor)).unwrap().is_none());

        let with_solar = table(&[("Solar photovoltaic", ramp(1.0)), ("Biogas", ramp(2.0))]);
        assert!(charts.generation_trends(Some(&with_solar)).unwrap().is_some());
        assert!(dir.path().join(GENERATION_TRENDS_PNG).exists());
    }

    #[test]
    fn test_top_tech_share_uses_listed_columns() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let charts = HeadlineCharts::new(&config);

        let none_listed = table(&[(TOTAL_RENEWABLE, ramp(10.0))]);
        assert!(charts.top_tech_share(Some(&none_listed)).unwrap().is_none());

        let mut biogas = ramp(3.0);
        biogas[5] = None;
        let listed = table(&[("Biogas", biogas), ("Marine energy", ramp(0.5))]);
        assert!(charts.top_tech_share(Some(&listed)).unwrap().is_some());
        assert!(dir.path().join(TOP_TECH_SHARE_PNG).exists());
    }
}
