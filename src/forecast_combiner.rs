use crate::chart_style::print_saved;
use crate::config::{ShowcaseConfig, FORECAST_TABLES_CSV};
use crate::models::SourceKind;
use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const TYPE_COLUMN: &str = "type";

/// Rows of one forecast CSV, tagged with the source kind.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedForecast {
    pub kind: SourceKind,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Outer union of tagged forecasts, cells copied verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedForecasts {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CombinedForecasts {
    pub fn from_tagged(frames: &[TaggedForecast]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for frame in frames {
            for header in &frame.headers {
                if !columns.contains(header) {
                    columns.push(header.clone());
                }
            }
        }

        let mut rows = Vec::new();
        for frame in frames {
            let index: HashMap<&str, usize> = frame
                .headers
                .iter()
                .enumerate()
                .rev()
                .map(|(i, h)| (h.as_str(), i))
                .collect();

            for row in &frame.rows {
                rows.push(
                    columns
                        .iter()
                        .map(|column| {
                            index
                                .get(column.as_str())
                                .and_then(|i| row.get(*i))
                                .cloned()
                                .unwrap_or_default()
                        })
                        .collect(),
                );
            }
        }

        Self { columns, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Re-reads the forecast CSVs and stacks them into one table.
pub struct ForecastCombiner<'a> {
    config: &'a ShowcaseConfig,
}

impl<'a> ForecastCombiner<'a> {
    pub fn new(config: &'a ShowcaseConfig) -> Self {
        Self { config }
    }

    /// Collects every readable forecast file. Unreadable ones are logged and
    /// left out.
    pub fn collect(&self) -> Vec<TaggedForecast> {
        let mut frames = Vec::new();
        for kind in SourceKind::ALL {
            let path = self.config.forecast_path(kind);
            if !path.exists() {
                continue;
            }
            match read_tagged(&path, kind) {
                Ok(frame) => frames.push(frame),
                Err(e) => log::warn!("Skipping {} forecasts: {:#}", kind.label(), e),
            }
        }
        frames
    }

    pub fn combine(&self) -> Result<Option<PathBuf>> {
        let frames = self.collect();
        if frames.is_empty() {
            log::debug!("No forecast tables to combine");
            return Ok(None);
        }

        let combined = CombinedForecasts::from_tagged(&frames);
        let path = self.config.output_path(FORECAST_TABLES_CSV);
        combined.write_csv(&path)?;
        print_saved(&path);
        Ok(Some(path))
    }
}

/// Read a forecast CSV and tag each row with `kind`. An existing `type`
/// column is overwritten. Short rows are padded with empty cells; rows with
/// more cells than the header are an error.
pub fn read_tagged(path: &Path, kind: SourceKind) -> Result<TaggedForecast> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?
        .iter()
        .map(String::from)
        .collect();
    if headers.is_empty() {
        bail!("{} has no columns", path.display());
    }
    let width = headers.len();

    let type_index = match headers.iter().position(|h| h == TYPE_COLUMN) {
        Some(i) => i,
        None => {
            headers.push(TYPE_COLUMN.to_string());
            headers.len() - 1
        }
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("reading {}", path.display()))?;
        if record.len() > width {
            bail!(
                "{}: row with {} fields, header has {}",
                path.display(),
                record.len(),
                width
            );
        }
        let mut row: Vec<String> = record.iter().map(String::from).collect();
        row.resize(headers.len(), String::new());
        row[type_index] = kind.label().to_string();
        rows.push(row);
    }

    Ok(TaggedForecast { kind, headers, rows })
}
