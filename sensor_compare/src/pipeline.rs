//! Per-modality analysis shared by all three sensors.
//!
//! The two devices are only compared in aggregate. Their tables may differ in
//! length and their clocks are never aligned or resampled.

use std::{io::Write, path::PathBuf};

use sampling::SamplingDescriptor;

use crate::{
    AxisStats, ChartRenderer, Config, Result, Table,
    chart::{Labels, Series},
    modality::{AXIS_LABELS, Device, DeviceColumns, Modality},
};

/// Both tables recorded for one modality
#[derive(Debug, Clone)]
pub struct ModalityData {
    pub phone: Table,
    pub microcontroller: Table,
}

impl ModalityData {
    pub fn device(&self, device: Device) -> &Table {
        match device {
            Device::Phone => &self.phone,
            Device::Microcontroller => &self.microcontroller,
        }
    }

    pub fn device_mut(&mut self, device: Device) -> &mut Table {
        match device {
            Device::Phone => &mut self.phone,
            Device::Microcontroller => &mut self.microcontroller,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceReport {
    pub device: Device,
    pub table: String,
    pub rows: usize,
    pub sampling: SamplingDescriptor,
    /// Axes in the unit the device recorded them in
    pub stats: AxisStats,
    /// Axes after unit conversion, if the device needs one
    pub converted: Option<AxisStats>,
}

impl DeviceReport {
    /// Statistics in the modality's comparison unit
    pub fn comparison_stats(&self) -> &AxisStats {
        self.converted.as_ref().unwrap_or(&self.stats)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalityReport {
    pub modality: Modality,
    pub phone: DeviceReport,
    pub microcontroller: DeviceReport,
}

impl ModalityReport {
    pub fn device(&self, device: Device) -> &DeviceReport {
        match device {
            Device::Phone => &self.phone,
            Device::Microcontroller => &self.microcontroller,
        }
    }
}

/// Compute statistics and sampling of both devices.
///
/// Devices with a unit conversion get the converted axes appended to their
/// table, so charts drawn afterwards can use them.
pub fn analyze(modality: &Modality, data: &mut ModalityData) -> Result<ModalityReport> {
    let phone = analyze_device(&modality.phone, data.device_mut(Device::Phone))?;
    let microcontroller = analyze_device(
        &modality.microcontroller,
        data.device_mut(Device::Microcontroller),
    )?;

    Ok(ModalityReport {
        modality: *modality,
        phone,
        microcontroller,
    })
}

fn analyze_device(columns: &DeviceColumns, table: &mut Table) -> Result<DeviceReport> {
    let stats = table.stats(&columns.axes)?;
    let sampling = table.sampling(columns.time)?;

    log::debug!(
        "'{}': {:.3} Hz over {} rows",
        table.name(),
        sampling.frequency,
        table.len()
    );

    let converted = match columns.conversion {
        Some(conversion) => {
            for (axis, derived) in columns.axes.iter().zip(conversion.columns) {
                let values = conversion.kind.apply_all(table.column(axis)?);
                table.add_column(derived, values)?;
            }

            Some(table.stats(&conversion.columns)?)
        }
        None => None,
    };

    Ok(DeviceReport {
        device: columns.device,
        table: table.name().to_owned(),
        rows: table.len(),
        sampling,
        stats,
        converted,
    })
}

/// Draw the two time series, the Z-axis histogram and the std bar chart
pub fn render(
    modality: &Modality,
    data: &ModalityData,
    report: &ModalityReport,
    renderer: &ChartRenderer,
) -> Result<Vec<PathBuf>> {
    let mut saved = Vec::with_capacity(4);

    let value_label = modality.value_label();

    for device in [Device::Phone, Device::Microcontroller] {
        let columns = modality.device(device);
        let table = data.device(device);

        let series = columns
            .comparison_axes()
            .iter()
            .zip(AXIS_LABELS)
            .map(|(axis, label)| {
                Ok(Series {
                    label,
                    values: table.column(axis)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let title = modality.timeseries_title(device);

        saved.push(renderer.time_series(
            &modality.timeseries_file(device),
            &Labels {
                title: &title,
                x: "Time (s)",
                y: &value_label,
            },
            table.column(columns.time)?,
            &series,
        )?);
    }

    let phone_z = format!("{} Z", Device::Phone.label());
    let microcontroller_z = format!("{} Z", Device::Microcontroller.label());
    let histogram_title = modality.histogram_title();
    let histogram_label = modality.histogram_label();

    saved.push(renderer.overlaid_histogram(
        &modality.histogram_file(),
        &Labels {
            title: &histogram_title,
            x: &histogram_label,
            y: "Count",
        },
        &[
            Series {
                label: &phone_z,
                values: data.phone.column(modality.phone.z_axis())?,
            },
            Series {
                label: &microcontroller_z,
                values: data
                    .microcontroller
                    .column(modality.microcontroller.z_axis())?,
            },
        ],
    )?);

    let phone_std = report.phone.comparison_stats().stds();
    let microcontroller_std = report.microcontroller.comparison_stats().stds();
    let std_title = modality.std_title();
    let std_label = modality.std_label();

    saved.push(renderer.grouped_bars(
        &modality.std_file(),
        &Labels {
            title: &std_title,
            x: "",
            y: &std_label,
        },
        &AXIS_LABELS,
        &[
            Series {
                label: Device::Phone.label(),
                values: &phone_std,
            },
            Series {
                label: Device::Microcontroller.label(),
                values: &microcontroller_std,
            },
        ],
    )?);

    Ok(saved)
}

/// Load every dataset named by `config`. Fails on the first unreadable file,
/// before any statistics are computed.
pub fn load_all(config: &Config) -> Result<Vec<(Modality, ModalityData)>> {
    Modality::ALL
        .iter()
        .map(|modality| {
            let data = ModalityData {
                phone: Table::from_path(config.dataset_path(modality.kind, Device::Phone))?,
                microcontroller: Table::from_path(
                    config.dataset_path(modality.kind, Device::Microcontroller),
                )?,
            };

            Ok((*modality, data))
        })
        .collect()
}

/// Full comparison run: load, analyze, print to `out` and optionally chart.
pub fn run(config: &Config, out: &mut impl Write) -> Result<Vec<ModalityReport>> {
    config.validate()?;

    let mut datasets = load_all(config)?;

    let renderer = match config.charts {
        true => Some(ChartRenderer::new(config.chart_options())?),
        false => {
            log::warn!("Chart rendering is disabled");
            None
        }
    };

    if let Some((_, data)) = datasets.first() {
        writeln!(out, "First rows of {}:", data.phone.name())?;
        writeln!(out, "{}", data.phone.head(config.head_rows))?;
    }

    let mut reports = Vec::with_capacity(datasets.len());

    for (modality, data) in &mut datasets {
        let report = analyze(modality, data)?;

        write!(out, "{report}")?;

        if let Some(renderer) = &renderer {
            let saved = render(modality, data, &report, renderer)?;
            log::info!("{}: saved {} charts", modality.name, saved.len());
        }

        reports.push(report);
    }

    match renderer {
        Some(_) => writeln!(out, "\n=== DONE! All stats and plots generated and saved. ===")?,
        None => writeln!(out, "\n=== DONE! All stats generated. ===")?,
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Error,
        modality::{ACCELEROMETER, GYROSCOPE, MAGNETOMETER},
    };

    const EPS: f64 = 1e-9;

    fn table(name: &str, content: &str) -> Table {
        Table::from_reader(name, content.as_bytes()).unwrap()
    }

    fn phone_gravity() -> Table {
        table(
            "Gravity.csv",
            "\
Time (s),Gravity X (m/s^2),Gravity Y (m/s^2),Gravity Z (m/s^2)
0.000,0.10,0.20,9.79
0.010,0.12,0.18,9.81
0.020,0.08,0.22,9.80
0.030,0.10,0.20,9.82
",
        )
    }

    fn arduino_acceleration() -> Table {
        table(
            "Raw data (g)_arduino.csv",
            "\
Time t (s),Acceleration x (g),Acceleration y (g),Acceleration z (g)
0.00,1.0,0.0,0.5
0.01,1.0,0.0,0.5
0.02,1.0,0.0,0.5
0.03,1.0,0.0,0.5
0.04,1.0,0.0,0.5
",
        )
    }

    #[test]
    fn accelerometer_end_to_end() {
        let mut data = ModalityData {
            phone: phone_gravity(),
            microcontroller: arduino_acceleration(),
        };

        let report = analyze(&ACCELEROMETER, &mut data).unwrap();

        let arduino = &report.microcontroller;
        assert!((arduino.sampling.frequency - 100.0).abs() < 1e-6);
        assert!((arduino.sampling.interval - 0.01).abs() < EPS);

        let raw_x = arduino.stats.get("Acceleration x (g)").unwrap();
        assert!((raw_x.mean - 1.0).abs() < EPS);

        let converted = arduino.converted.as_ref().unwrap();
        let x = converted.get("Ax_mps2").unwrap();
        assert!((x.mean - 9.80665).abs() < EPS);
        assert!(x.std.abs() < EPS);
        assert_eq!(arduino.comparison_stats(), converted);

        assert_eq!(
            data.microcontroller.column("Az_mps2").unwrap(),
            &[4.903325; 5]
        );

        let phone = &report.phone;
        assert!(phone.converted.is_none());
        assert_eq!(phone.rows, 4);
        assert!((phone.sampling.frequency - 100.0).abs() < 1e-6);
        assert!((phone.stats.get("Gravity Z (m/s^2)").unwrap().mean - 9.805).abs() < EPS);
    }

    #[test]
    fn devices_may_differ_in_length() {
        let mut data = ModalityData {
            phone: phone_gravity(),
            microcontroller: arduino_acceleration(),
        };

        let report = analyze(&ACCELEROMETER, &mut data).unwrap();

        assert_eq!(report.phone.rows, 4);
        assert_eq!(report.microcontroller.rows, 5);
    }

    #[test]
    fn converted_std_matches_scaled_raw_std() {
        let mut data = ModalityData {
            phone: phone_gravity(),
            microcontroller: table(
                "board.csv",
                "\
Time t (s),Acceleration x (g),Acceleration y (g),Acceleration z (g)
0.0,0.98,0.01,0.10
0.1,1.02,-0.01,0.12
0.2,0.99,0.02,0.08
",
            ),
        };

        let report = analyze(&ACCELEROMETER, &mut data).unwrap();

        let raw = report.microcontroller.stats.stds();
        let converted = report.microcontroller.comparison_stats().stds();

        for (raw, converted) in raw.iter().zip(converted) {
            assert!((raw * units::G_CONST - converted).abs() < EPS);
        }
    }

    #[test]
    fn gyroscope_has_no_conversion() {
        let mut data = ModalityData {
            phone: table(
                "Raw Data.csv",
                "\
Time (s),Gyroscope x (rad/s),Gyroscope y (rad/s),Gyroscope z (rad/s)
0.0,0.01,0.02,0.03
0.5,0.03,0.02,0.01
",
            ),
            microcontroller: table(
                "s_Arduino.csv",
                "\
Time t (s),Angular Velocity x (rad/s),Angular Velocity y (rad/s),Angular Velocity z (rad/s)
0.0,0.1,0.2,0.3
0.25,0.1,0.2,0.3
0.5,0.1,0.2,0.3
",
            ),
        };

        let report = analyze(&GYROSCOPE, &mut data).unwrap();

        assert!(report.microcontroller.converted.is_none());
        assert!((report.phone.sampling.frequency - 2.0).abs() < EPS);
        assert!((report.microcontroller.sampling.frequency - 4.0).abs() < EPS);
        assert_eq!(
            report.microcontroller.comparison_stats(),
            &report.microcontroller.stats
        );
    }

    #[test]
    fn renamed_time_column_is_fatal() {
        let mut data = ModalityData {
            phone: table(
                "Raw Data_Magnetometer.csv",
                "\
time,Magnetic Field x (µT),Magnetic Field y (µT),Magnetic Field z (µT)
0.0,20.0,-5.0,-40.0
0.1,21.0,-4.0,-41.0
",
            ),
            microcontroller: table(
                "Raw data (µT)_Arduino.csv",
                "\
Time t (s),Magnetometer x (µT),Magnetometer y (µT),Magnetometer z (µT)
0.0,19.0,-6.0,-39.0
0.1,20.0,-5.0,-40.0
",
            ),
        };

        match analyze(&MAGNETOMETER, &mut data) {
            Err(Error::MissingColumn { table, column }) => {
                assert_eq!(table, "Raw Data_Magnetometer.csv");
                assert_eq!(column, "Time (s)");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn single_row_table_is_fatal() {
        let mut data = ModalityData {
            phone: phone_gravity(),
            microcontroller: table(
                "board.csv",
                "\
Time t (s),Acceleration x (g),Acceleration y (g),Acceleration z (g)
0.0,1.0,0.0,0.0
",
            ),
        };

        assert!(matches!(
            analyze(&ACCELEROMETER, &mut data),
            Err(Error::Stats { .. })
        ));
    }

    #[test]
    fn repeated_timestamps_are_fatal() {
        let mut data = ModalityData {
            phone: phone_gravity(),
            microcontroller: table(
                "board.csv",
                "\
Time t (s),Acceleration x (g),Acceleration y (g),Acceleration z (g)
1.0,1.0,0.0,0.0
1.0,1.1,0.0,0.0
1.0,0.9,0.0,0.0
",
            ),
        };

        match analyze(&ACCELEROMETER, &mut data) {
            Err(Error::Sampling { table, source, .. }) => {
                assert_eq!(table, "board.csv");
                assert!(matches!(
                    source,
                    sampling::SamplingError::InvalidTimeSeries { .. }
                ));
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    fn write_fixture(dir: &std::path::Path, name: &str, time: &str, axes: [&str; 3]) {
        let mut content = format!("{time},{},{},{}\n", axes[0], axes[1], axes[2]);

        for i in 0..5 {
            content.push_str(&format!("{},1.0,{},{}\n", i as f64 * 0.01, i, 2 * i));
        }

        std::fs::write(dir.join(name), content).unwrap();
    }

    fn fixture_dir(tag: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "sensor_compare_{tag}_{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();

        let datasets = crate::config::Datasets::default();

        for modality in Modality::ALL {
            for device in [Device::Phone, Device::Microcontroller] {
                let columns = modality.device(device);
                let file = datasets.pair(modality.kind).file(device);

                write_fixture(
                    &dir,
                    &file.to_string_lossy(),
                    columns.time,
                    columns.axes,
                );
            }
        }

        dir
    }

    #[test]
    fn run_without_charts() {
        let dir = fixture_dir("run");

        let config = Config {
            data_dir: dir.clone(),
            output_dir: dir.clone(),
            charts: false,
            ..Config::default()
        };

        let mut out = Vec::new();
        let reports = run(&config, &mut out).unwrap();

        assert_eq!(reports.len(), 3);

        let acc = &reports[0].microcontroller;
        let x = acc.comparison_stats().get("Ax_mps2").unwrap();
        assert!((x.mean - 9.80665).abs() < EPS);
        assert!(x.std.abs() < EPS);
        assert!((acc.sampling.frequency - 100.0).abs() < 1e-6);

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("First rows of Gravity.csv:"));
        assert!(out.contains("=== ACCELEROMETER ==="));
        assert!(out.contains("=== GYROSCOPE ==="));
        assert!(out.contains("=== MAGNETOMETER ==="));
        assert!(out.trim_end().ends_with("=== DONE! All stats generated. ==="));

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn run_saves_four_charts_per_modality() {
        let dir = fixture_dir("charts");
        let output_dir = dir.join("out");

        let config = Config {
            data_dir: dir.clone(),
            output_dir: output_dir.clone(),
            ..Config::default()
        };

        let mut out = Vec::new();
        run(&config, &mut out).unwrap();

        for modality in Modality::ALL {
            let files = [
                modality.timeseries_file(Device::Phone),
                modality.timeseries_file(Device::Microcontroller),
                modality.histogram_file(),
                modality.std_file(),
            ];

            for file in files {
                assert!(output_dir.join(&file).is_file(), "{file} was not saved");
            }
        }

        let out = String::from_utf8(out).unwrap();
        assert!(out
            .trim_end()
            .ends_with("=== DONE! All stats and plots generated and saved. ==="));

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn render_returns_saved_paths() {
        let output_dir = std::env::temp_dir().join(format!(
            "sensor_compare_render_{}",
            std::process::id()
        ));
        let renderer = ChartRenderer::new(crate::ChartOptions {
            output_dir: output_dir.clone(),
            show: false,
            histogram_bins: 30,
        })
        .unwrap();

        let mut data = ModalityData {
            phone: phone_gravity(),
            microcontroller: arduino_acceleration(),
        };
        let report = analyze(&ACCELEROMETER, &mut data).unwrap();

        let saved = render(&ACCELEROMETER, &data, &report, &renderer).unwrap();

        assert_eq!(
            saved,
            vec![
                output_dir.join("acc_phone_timeseries.png"),
                output_dir.join("acc_arduino_timeseries.png"),
                output_dir.join("acc_z_hist.png"),
                output_dir.join("acc_std_bar.png"),
            ]
        );
        assert!(saved.iter().all(|this| this.is_file()));

        std::fs::remove_dir_all(output_dir).ok();
    }

    #[test]
    fn run_fails_when_output_dir_is_a_file() {
        let dir = fixture_dir("blocked");
        let output_dir = dir.join("out");
        std::fs::write(&output_dir, "not a directory").unwrap();

        let config = Config {
            data_dir: dir.clone(),
            output_dir,
            ..Config::default()
        };

        let actual = run(&config, &mut Vec::new());

        assert!(matches!(actual, Err(Error::OutputDir { .. })));

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn run_aborts_before_computation_on_missing_file() {
        let dir = fixture_dir("missing");
        std::fs::remove_file(dir.join("Raw data (µT)_Arduino.csv")).unwrap();

        let config = Config {
            data_dir: dir.clone(),
            output_dir: dir.clone(),
            charts: false,
            ..Config::default()
        };

        let mut out = Vec::new();
        let actual = run(&config, &mut out);

        match actual {
            Err(Error::InputFile { path, .. }) => {
                assert!(path.ends_with("Raw data (µT)_Arduino.csv"));
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert!(out.is_empty());

        std::fs::remove_dir_all(dir).ok();
    }
}
