//! Console rendering of modality reports.

use std::fmt;

use crate::{
    modality::Modality,
    pipeline::{DeviceReport, ModalityReport},
};

impl fmt::Display for ModalityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "=== {} ===", self.modality.name.to_uppercase())?;

        write_device(f, &self.modality, &self.phone)?;
        write_device(f, &self.modality, &self.microcontroller)
    }
}

fn write_device(
    f: &mut fmt::Formatter<'_>,
    modality: &Modality,
    report: &DeviceReport,
) -> fmt::Result {
    let columns = modality.device(report.device);
    let name = format!(
        "{} {}",
        report.device.long_label(),
        modality.name.to_lowercase()
    );

    writeln!(f)?;
    writeln!(f, "{name} stats ({}, {} rows):", columns.unit, report.rows)?;
    writeln!(f, "{}", report.stats)?;

    let target_unit = columns
        .conversion
        .and_then(|this| this.kind.target_unit());

    if let (Some(converted), Some(unit)) = (&report.converted, target_unit) {
        writeln!(f)?;
        writeln!(f, "{name} stats (converted to {unit}):")?;
        writeln!(f, "{converted}")?;
    }

    writeln!(
        f,
        "{name} sampling interval: {:.6} s",
        report.sampling.interval
    )?;
    writeln!(
        f,
        "{name} sampling freq: {:.6} Hz",
        report.sampling.frequency
    )
}
