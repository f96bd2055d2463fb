use crate::models::{TechnologySeries, YearTable, YEAR_COLUMN};
use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::Path;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Default)]
pub struct DataLoader;

impl DataLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a year-indexed table if the file exists. A missing file is not an
    /// error; a malformed one is.
    pub fn load_optional(&self, path: &Path) -> Result<Option<YearTable>> {
        if !path.exists() {
            log::debug!("{} not present", path.display());
            return Ok(None);
        }
        self.load(path).map(Some)
    }

    pub fn load(&self, path: &Path) -> Result<YearTable> {
        let df = CsvReader::from_path(path)
            .with_context(|| format!("opening {}", path.display()))?
            .has_header(true)
            .finish()
            .with_context(|| format!("parsing {}", path.display()))?;

        let table = Self::year_table_from_frame(&df)
            .with_context(|| format!("reading year table from {}", path.display()))?;

        log::info!(
            "Loaded {} rows x {} columns from {}",
            table.height(),
            table.columns.len(),
            path.display()
        );
        Ok(table)
    }

    fn year_table_from_frame(df: &DataFrame) -> Result<YearTable> {
        let year_column = df
            .column(YEAR_COLUMN)
            .map_err(|_| anyhow!("missing '{}' column", YEAR_COLUMN))?;

        // Integer years come back as Int64, dates as Utf8; normalise to text.
        let year_text = year_column.cast(&DataType::Utf8)?;
        let years = year_text
            .utf8()?
            .into_iter()
            .enumerate()
            .map(|(row, cell)| {
                let cell = cell.ok_or_else(|| anyhow!("row {}: empty '{}' cell", row + 1, YEAR_COLUMN))?;
                parse_year(cell)
                    .ok_or_else(|| anyhow!("row {}: cannot parse '{}' as a year", row + 1, cell))
            })
            .collect::<Result<Vec<i32>>>()?;

        let mut columns = Vec::new();
        for series in df.get_columns() {
            if series.name() == YEAR_COLUMN {
                continue;
            }

            let numeric = series.cast(&DataType::Float64)?;
            let values = numeric
                .f64()?
                .into_iter()
                .map(|value| value.filter(|v| v.is_finite()))
                .collect();

            columns.push(TechnologySeries {
                name: series.name().to_string(),
                values,
            });
        }

        Ok(YearTable { years, columns })
    }
}

/// Truncate a year cell to its calendar year.
pub fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim().trim_matches('"');

    if let Ok(year) = raw.parse::<i32>() {
        return Some(year);
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date.year());
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.year());
        }
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => Some(value as i32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_year_variants() {
        assert_eq!(parse_year("2015"), Some(2015));
        assert_eq!(parse_year("2015-01-01"), Some(2015));
        assert_eq!(parse_year("2019-12-31 00:00:00"), Some(2019));
        assert_eq!(parse_year("2019-06-30T12:00:00"), Some(2019));
        assert_eq!(parse_year("2020.0"), Some(2020));
        assert_eq!(parse_year(" 2021 "), Some(2021));
        assert_eq!(parse_year("next year"), None);
        assert_eq!(parse_year("2020.5"), None);
    }

    #[test]
    fn test_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DataLoader::new();
        let table = loader.load_optional(&dir.path().join("nope.csv")).unwrap();
        assert!(table.is_none());
    }

    #[test]
    fn test_load_wide_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cap.csv");
        fs::write(
            &path,
            "Year,Total renewable,Total non-renewable\n\
             2015-01-01,10.5,20\n\
             2016-01-01,,21\n\
             2017-01-01,12.5,22\n",
        )
        .unwrap();

        let table = DataLoader::new().load_optional(&path).unwrap().unwrap();
        assert_eq!(table.years, vec![2015, 2016, 2017]);
        assert!(table.has_column("Total renewable"));
        assert!(!table.has_column("Year"));
        assert_eq!(
            table.column("Total renewable").unwrap().values,
            vec![Some(10.5), None, Some(12.5)]
        );
        assert_eq!(
            table.series("Total non-renewable").unwrap(),
            vec![(2015, 20.0), (2016, 21.0), (2017, 22.0)]
        );
    }

    #[test]
    fn test_integer_years() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen.csv");
        fs::write(&path, "Year,Biogas\n2020,1.0\n2021,2.0\n").unwrap();

        let table = DataLoader::new().load(&path).unwrap();
        assert_eq!(table.years, vec![2020, 2021]);
        assert_eq!(table.latest_year(), Some(2021));
    }

    #[test]
    fn test_missing_year_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "Date,Biogas\n2020,1.0\n").unwrap();

        let err = DataLoader::new().load_optional(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("missing 'Year' column"));
    }

    #[test]
    fn test_unparsable_year_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "Year,Biogas\nsoon,1.0\n").unwrap();

        assert!(DataLoader::new().load(&path).is_err());
    }
}
