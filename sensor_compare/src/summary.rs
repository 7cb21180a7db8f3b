use std::{io::Write, path::Path};

use crate::{Error, Result, pipeline::ModalityReport};

/// One channel of one device, flattened for CSV export
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SummaryRow<'a> {
    pub modality: &'a str,
    pub device: &'a str,
    pub table: &'a str,
    pub channel: &'a str,
    pub unit: &'a str,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub interval: f64,
    pub frequency: f64,
}

pub fn summary_rows(reports: &[ModalityReport]) -> Vec<SummaryRow<'_>> {
    reports
        .iter()
        .flat_map(|report| {
            [&report.phone, &report.microcontroller]
                .into_iter()
                .flat_map(move |device| {
                    let columns = report.modality.device(device.device);
                    let target_unit = columns
                        .conversion
                        .and_then(|this| this.kind.target_unit())
                        .unwrap_or(columns.unit);

                    let raw = device.stats.iter().map(move |stats| (columns.unit, stats));
                    let converted = device
                        .converted
                        .iter()
                        .flat_map(|this| this.iter())
                        .map(move |stats| (target_unit, stats));

                    raw.chain(converted)
                        .map(move |(unit, (channel, stats))| SummaryRow {
                            modality: report.modality.name,
                            device: device.device.label(),
                            table: &device.table,
                            channel,
                            unit,
                            count: stats.count,
                            mean: stats.mean,
                            std: stats.std,
                            interval: device.sampling.interval,
                            frequency: device.sampling.frequency,
                        })
                })
        })
        .collect()
}

pub fn write_summary_to(writer: impl Write, reports: &[ModalityReport]) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    for row in summary_rows(reports) {
        writer.serialize(row)?;
    }

    writer.flush()?;

    Ok(())
}

/// Write the summary CSV. _Note_: truncates `path` if it exists
pub fn write_summary(path: impl AsRef<Path>, reports: &[ModalityReport]) -> Result<()> {
    let path = path.as_ref();

    let summary_error = |source: csv::Error| Error::Summary {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::create(path).map_err(|e| summary_error(e.into()))?;

    write_summary_to(file, reports).map_err(summary_error)?;

    log::info!("Saved summary {}", path.display());

    Ok(())
}
