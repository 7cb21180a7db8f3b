use std::path::PathBuf;

use sensor_compare::{Config, logger::init_logger, pipeline, summary::write_summary};

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// TOML config file. Flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory holding the six CSV recordings
    #[arg(short = 'i', long)]
    pub data_dir: Option<PathBuf>,
    /// Directory charts are saved to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Open every chart after saving it
    #[arg(short, long, default_value_t = false)]
    pub show: bool,
    /// Only print statistics, don't render charts
    #[arg(long, default_value_t = false)]
    pub no_charts: bool,
    /// Write per-channel statistics to this CSV file. _Note_: will truncate old file if exists
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();

    let Args {
        config,
        data_dir,
        output_dir,
        show,
        no_charts,
        summary,
    } = <Args as clap::Parser>::parse();

    let mut config = match config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    if let Some(data_dir) = data_dir {
        config.data_dir = data_dir;
    }

    if let Some(output_dir) = output_dir {
        config.output_dir = output_dir;
    }

    config.show_figures |= show;
    config.charts &= !no_charts;

    let reports = pipeline::run(&config, &mut std::io::stdout().lock())?;

    if let Some(summary) = summary {
        write_summary(&summary, &reports)?;
        println!("Summary saved to {}", summary.to_string_lossy());
    }

    Ok(())
}
