use std::path::PathBuf;

use sensor_compare::{
    ChartOptions, ChartRenderer, Labels, Series, Table, logger::init_logger,
};

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// Input csv file location
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("Gravity.csv"), required = false)]
    pub input: PathBuf,
    /// Name of the time column, in seconds
    #[arg(short, long, default_value = "Time (s)")]
    pub time_column: String,
    /// Columns to plot against time
    #[arg(
        short,
        long = "column",
        default_values = ["Gravity X (m/s^2)", "Gravity Y (m/s^2)", "Gravity Z (m/s^2)"]
    )]
    pub columns: Vec<String>,
    /// Y axis label of the chart
    #[arg(short, long, default_value = "Gravity (m/s^2)")]
    pub y_label: String,
    /// Output chart file. _Note_: will truncate old file if exists
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Number of rows printed from the top of the file
    #[arg(short, long, default_value_t = 5)]
    pub rows: usize,
    /// Open the chart after saving it
    #[arg(short, long, default_value_t = false)]
    pub show: bool,
    /// Only print, don't render a chart
    #[arg(short, long, default_value_t = false)]
    pub dry: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();

    let Args {
        input,
        time_column,
        columns,
        y_label,
        output,
        rows,
        show,
        dry,
    } = <Args as clap::Parser>::parse();

    let table = Table::from_path(&input)?;

    println!("First rows of {}:", table.name());
    println!("{}", table.head(rows));

    println!("\nMean and std:");
    println!("{}", table.describe()?);

    if dry {
        return Ok(());
    }

    let sampling = table.sampling(&time_column)?;

    let output = output.unwrap_or_else(|| input.with_extension("png"));
    let file_name = output
        .file_name()
        .ok_or_else(|| format!("Invalid output path {}", output.to_string_lossy()))?
        .to_string_lossy()
        .into_owned();
    let output_dir = output
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default();

    let renderer = ChartRenderer::new(ChartOptions {
        output_dir,
        show,
        histogram_bins: 30,
    })?;

    let series = columns
        .iter()
        .map(|this| {
            Ok(Series {
                label: this,
                values: table.column(this)?,
            })
        })
        .collect::<sensor_compare::Result<Vec<_>>>()?;

    let stem = input
        .file_stem()
        .map(|this| this.to_string_lossy().into_owned())
        .unwrap_or_default();
    let title = format!("{stem} ({} Hz)", sampling.nominal_frequency());

    let saved = renderer.time_series(
        &file_name,
        &Labels {
            title: &title,
            x: &time_column,
            y: &y_label,
        },
        table.column(&time_column)?,
        &series,
    )?;

    println!("Chart saved to {}", saved.to_string_lossy());

    Ok(())
}
