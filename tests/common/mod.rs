//! Shared fixtures: input CSVs written into a temporary working directory.

use energy_showcase::ShowcaseConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Low DPI keeps the rendered PNGs small.
pub const TEST_DPI: u32 = 30;

pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn config(&self) -> ShowcaseConfig {
        ShowcaseConfig::new(self.dir.path(), self.out_dir()).with_dpi(TEST_DPI)
    }

    pub fn out_dir(&self) -> PathBuf {
        self.dir.path().join("showcase")
    }

    pub fn out(&self, relative: &str) -> PathBuf {
        self.out_dir().join(relative)
    }

    pub fn write(&self, name: &str, contents: &str) -> &Self {
        fs::write(self.dir.path().join(name), contents).unwrap();
        self
    }
}

/// Capacity history 2015-2020 with both totals and two renewable techs.
pub fn capacity_csv() -> &'static str {
    "Year,Total renewable,Total non-renewable,Solar photovoltaic,Biogas\n\
     2015-01-01,100,300,10,5\n\
     2016-01-01,110,298,14,5.5\n\
     2017-01-01,125,295,19,6\n\
     2018-01-01,140,290,25,6.2\n\
     2019-01-01,160,284,33,6.4\n\
     2020-01-01,185,280,42,6.5\n"
}

/// Generation history 2015-2020.
pub fn generation_csv() -> &'static str {
    "Year,Solar photovoltaic,Onshore wind energy\n\
     2015-01-01,12,40\n\
     2016-01-01,16,44\n\
     2017-01-01,21,47\n\
     2018-01-01,27,52\n\
     2019-01-01,35,55\n\
     2020-01-01,44,60\n"
}

/// Generation forecast 2021-2025, disjoint from the history years.
pub fn generation_forecast_csv() -> &'static str {
    "Year,Solar photovoltaic,Onshore wind energy,Marine energy\n\
     2021-01-01,52,63,0.1\n\
     2022-01-01,60,66,0.1\n\
     2023-01-01,69,70,0.2\n\
     2024-01-01,78,73,0.2\n\
     2025-01-01,88,77,0.3\n"
}

pub fn capacity_forecast_csv() -> &'static str {
    "Year,Total renewable,lower,upper\n\
     2021-01-01,205,195,215\n\
     2022-01-01,228,212,244\n\
     2023-01-01,250,228,272\n"
}

/// Every file below `dir`, relative, sorted.
pub fn list_files(dir: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                out.push(path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"));
            }
        }
    }

    let mut out = Vec::new();
    walk(dir, dir, &mut out);
    out.sort();
    out
}
