use std::path::PathBuf;

use sensor_compare::{Table, logger::init_logger};

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// Input csv file location
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("Raw data (g)_arduino.csv"), required = false)]
    pub input: PathBuf,
    /// Name of the time column, in seconds
    #[arg(short, long, default_value = "Time t (s)")]
    pub time_column: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();

    let Args { input, time_column } = <Args as clap::Parser>::parse();

    let table = Table::from_path(&input)?;
    let sampling = table.sampling(&time_column)?;

    println!(
        "Average time difference between samples (dt): {}",
        sampling.interval
    );
    println!("Real sampling frequency: {} Hz", sampling.frequency);

    println!("\nMean and std:");
    println!("{}", table.describe()?);

    Ok(())
}
