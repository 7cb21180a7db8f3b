use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    ChartOptions, Error, Result,
    modality::{Device, ModalityKind},
};

/// Run configuration, every field can be omitted from the TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the dataset file names are resolved against
    pub data_dir: PathBuf,
    /// Directory charts are written to
    pub output_dir: PathBuf,
    /// Open each chart after saving it
    pub show_figures: bool,
    /// Render charts at all
    pub charts: bool,
    pub histogram_bins: usize,
    /// Rows of the first table printed before the statistics
    pub head_rows: usize,
    pub datasets: Datasets,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Datasets {
    pub accelerometer: DatasetPair,
    pub gyroscope: DatasetPair,
    pub magnetometer: DatasetPair,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetPair {
    pub phone: PathBuf,
    pub microcontroller: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            show_figures: false,
            charts: true,
            histogram_bins: 30,
            head_rows: 5,
            datasets: Datasets::default(),
        }
    }
}

impl Default for Datasets {
    fn default() -> Self {
        Self {
            accelerometer: DatasetPair {
                phone: PathBuf::from("Gravity.csv"),
                microcontroller: PathBuf::from("Raw data (g)_arduino.csv"),
            },
            gyroscope: DatasetPair {
                phone: PathBuf::from("Raw Data.csv"),
                microcontroller: PathBuf::from("s_Arduino.csv"),
            },
            magnetometer: DatasetPair {
                phone: PathBuf::from("Raw Data_Magnetometer.csv"),
                microcontroller: PathBuf::from("Raw data (µT)_Arduino.csv"),
            },
        }
    }
}

impl Datasets {
    pub fn pair(&self, kind: ModalityKind) -> &DatasetPair {
        match kind {
            ModalityKind::Accelerometer => &self.accelerometer,
            ModalityKind::Gyroscope => &self.gyroscope,
            ModalityKind::Magnetometer => &self.magnetometer,
        }
    }
}

impl DatasetPair {
    pub fn file(&self, device: Device) -> &Path {
        match device {
            Device::Phone => &self.phone,
            Device::Microcontroller => &self.microcontroller,
        }
    }
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.histogram_bins == 0 {
            return Err(Error::InvalidConfig(
                "histogram_bins must be at least 1".to_owned(),
            ));
        }

        Ok(())
    }

    /// Location of the dataset recorded by `device` for `kind`
    pub fn dataset_path(&self, kind: ModalityKind, device: Device) -> PathBuf {
        self.data_dir.join(self.datasets.pair(kind).file(device))
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            output_dir: self.output_dir.clone(),
            show: self.show_figures,
            histogram_bins: self.histogram_bins,
        }
    }
}
