pub const YEAR_COLUMN: &str = "Year";
pub const LOWER_COLUMN: &str = "lower";
pub const UPPER_COLUMN: &str = "upper";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Generation,
    Capacity,
}

impl SourceKind {
    pub const ALL: [SourceKind; 2] = [SourceKind::Generation, SourceKind::Capacity];

    /// Tag used for the `type` column and for output paths.
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Generation => "generation",
            SourceKind::Capacity => "capacity",
        }
    }
}

/// One technology column. `values[i]` belongs to `YearTable::years[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TechnologySeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Wide table: one row per year, one column per technology.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearTable {
    pub years: Vec<i32>,
    pub columns: Vec<TechnologySeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceBand {
    pub points: Vec<(i32, f64, f64)>,
}

impl YearTable {
    pub fn height(&self) -> usize {
        self.years.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&TechnologySeries> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Present (year, value) pairs of a column, sorted by year.
    pub fn series(&self, name: &str) -> Option<Vec<(i32, f64)>> {
        let column = self.column(name)?;
        let mut points: Vec<(i32, f64)> = self
            .years
            .iter()
            .zip(column.values.iter())
            .filter_map(|(year, value)| value.map(|v| (*year, v)))
            .collect();
        points.sort_by_key(|(year, _)| *year);
        Some(points)
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.years.iter().copied().max()
    }

    /// Index of the last row holding the maximum year.
    pub fn latest_row(&self) -> Option<usize> {
        let latest = self.latest_year()?;
        self.years.iter().rposition(|year| *year == latest)
    }

    pub fn value_at(&self, row: usize, name: &str) -> Option<f64> {
        self.column(name)?.values.get(row).copied().flatten()
    }

    /// Shaded interval from the `lower`/`upper` columns, if both exist.
    pub fn confidence_band(&self) -> Option<ConfidenceBand> {
        let lower = self.column(LOWER_COLUMN)?;
        let upper = self.column(UPPER_COLUMN)?;

        let mut points: Vec<(i32, f64, f64)> = self
            .years
            .iter()
            .zip(lower.values.iter().zip(upper.values.iter()))
            .filter_map(|(year, (lo, hi))| match (lo, hi) {
                (Some(lo), Some(hi)) => Some((*year, *lo, *hi)),
                _ => None,
            })
            .collect();
        points.sort_by_key(|(year, _, _)| *year);

        Some(ConfidenceBand { points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> YearTable {
        YearTable {
            years: vec![2021, 2020, 2022, 2022],
            columns: vec![
                TechnologySeries {
                    name: "Solar photovoltaic".to_string(),
                    values: vec![Some(2.0), Some(1.0), None, Some(4.0)],
                },
                TechnologySeries {
                    name: "lower".to_string(),
                    values: vec![Some(1.5), Some(0.5), Some(2.0), None],
                },
                TechnologySeries {
                    name: "upper".to_string(),
                    values: vec![Some(2.5), Some(1.5), Some(3.0), Some(5.0)],
                },
            ],
        }
    }

    #[test]
    fn test_series_sorted_and_skips_missing() {
        let table = sample_table();
        let series = table.series("Solar photovoltaic").unwrap();
        assert_eq!(series, vec![(2020, 1.0), (2021, 2.0), (2022, 4.0)]);
        assert!(table.series("Biogas").is_none());
    }

    #[test]
    fn test_latest_row_takes_last_duplicate() {
        let table = sample_table();
        assert_eq!(table.latest_year(), Some(2022));
        assert_eq!(table.latest_row(), Some(3));
        assert_eq!(table.value_at(3, "Solar photovoltaic"), Some(4.0));
        assert_eq!(table.value_at(2, "Solar photovoltaic"), None);
    }

    #[test]
    fn test_band_from_lower_and_upper() {
        let table = sample_table();
        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["Solar photovoltaic", "lower", "upper"]);

        let band = table.confidence_band().unwrap();
        assert_eq!(band.points, vec![(2020, 0.5, 1.5), (2021, 1.5, 2.5), (2022, 2.0, 3.0)]);
    }

    #[test]
    fn test_no_band_without_both_bounds() {
        let mut table = sample_table();
        table.columns.retain(|c| c.name != "upper");
        assert!(table.confidence_band().is_none());
        assert_eq!(SourceKind::Capacity.label(), "capacity");
    }
}
