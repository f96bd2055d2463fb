use anyhow::Result;
use clap::Parser;
use energy_showcase::config::{DEFAULT_DPI, DEFAULT_OUTPUT_DIR};
use energy_showcase::{generate_showcase, ShowcaseConfig};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "energy_showcase")]
#[command(about = "Render showcase charts and a combined forecast table from cleaned energy CSVs")]
struct Args {
    /// Directory holding the cleaned and forecast CSVs
    #[arg(long, default_value = ".")]
    input_dir: PathBuf,

    /// Directory the charts and tables are written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Pixels per inch for every chart
    #[arg(long, default_value_t = DEFAULT_DPI)]
    dpi: u32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!(
        "Rendering showcase from {} into {}",
        args.input_dir.display(),
        args.output_dir.display()
    );

    let config = ShowcaseConfig::new(args.input_dir, args.output_dir).with_dpi(args.dpi);
    let report = generate_showcase(config)?;

    info!(
        "Wrote {} charts{}",
        report.charts.len(),
        if report.forecast_table.is_some() { " and the forecast table" } else { "" }
    );
    Ok(())
}
