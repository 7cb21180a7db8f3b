//! In-memory CSV tables.
//!
//! Columns are parsed once at load time. A column where every cell parses as
//! `f64` is numeric, anything else is kept as text and only fails when a caller
//! asks for it as a numeric column.

use std::{fmt, fs::File, io::Read, path::Path};

use channel_stats::ChannelStats;
use sampling::SamplingDescriptor;

use crate::{AxisStats, Error, Result};

#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    rows: usize,
}

#[derive(Debug, Clone)]
struct Column {
    name: String,
    data: ColumnData,
}

#[derive(Debug, Clone)]
enum ColumnData {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    fn parse(name: &str, cells: Vec<String>) -> Self {
        let data = match cells
            .iter()
            .map(|this| this.parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
        {
            Ok(values) => ColumnData::Numeric(values),
            Err(_) => ColumnData::Text(cells),
        };

        Self {
            name: name.to_owned(),
            data,
        }
    }

    fn cell(&self, row: usize) -> String {
        match &self.data {
            ColumnData::Numeric(values) => values.get(row).map(f64::to_string),
            ColumnData::Text(cells) => cells.get(row).cloned(),
        }
        .unwrap_or_default()
    }
}

impl Table {
    /// Load a headered CSV file. The table is named after the file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|source| Error::InputFile {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_name()
            .map(|this| this.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let table = Self::from_reader(name, file)?;

        log::info!(
            "Loaded '{}': {} rows, {} columns",
            table.name,
            table.rows,
            table.columns.len()
        );

        Ok(table)
    }

    pub fn from_reader(name: impl Into<String>, reader: impl Read) -> Result<Self> {
        let name = name.into();

        let csv_error = |source: csv::Error| Error::Csv {
            table: name.clone(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(csv_error)?.clone();

        let mut cells = vec![Vec::new(); headers.len()];

        for record in reader.records() {
            let record = record.map_err(csv_error)?;

            for (column, field) in cells.iter_mut().zip(record.iter()) {
                column.push(field.to_owned());
            }
        }

        let rows = cells.first().map(Vec::len).unwrap_or_default();

        let columns = headers
            .iter()
            .zip(cells)
            .map(|(header, cells)| Column::parse(header, cells))
            .collect();

        Ok(Self {
            name,
            columns,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|this| this.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|this| this.name == name)
    }

    fn find(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|this| this.name == name)
            .ok_or_else(|| {
                log::debug!(
                    "{} has columns {:?}",
                    self.name,
                    self.headers().collect::<Vec<_>>()
                );

                Error::MissingColumn {
                    table: self.name.clone(),
                    column: name.to_owned(),
                }
            })
    }

    /// Numeric samples of column `name`
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        let column = self.find(name)?;

        match &column.data {
            ColumnData::Numeric(values) => Ok(values),
            ColumnData::Text(cells) => {
                // Rows are reported 1-based, counting from the first line after the header
                let (row, value) = cells
                    .iter()
                    .enumerate()
                    .find(|(_, this)| this.parse::<f64>().is_err())
                    .map(|(index, this)| (index + 1, this.clone()))
                    .unwrap_or_default();

                Err(Error::NonNumericColumn {
                    table: self.name.clone(),
                    column: column.name.clone(),
                    row,
                    value,
                })
            }
        }
    }

    /// Append a derived numeric column
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();

        if self.has_column(&name) {
            return Err(Error::DuplicateColumn {
                table: self.name.clone(),
                column: name,
            });
        }

        if values.len() != self.rows {
            return Err(Error::LengthMismatch {
                table: self.name.clone(),
                column: name,
                expected: self.rows,
                actual: values.len(),
            });
        }

        self.columns.push(Column {
            name,
            data: ColumnData::Numeric(values),
        });

        Ok(())
    }

    /// Mean and std of each column in `columns`, in the given order
    pub fn stats(&self, columns: &[&str]) -> Result<AxisStats> {
        columns
            .iter()
            .map(|this| {
                let stats = self.channel_stats(this, self.column(this)?)?;

                Ok(((*this).to_owned(), stats))
            })
            .collect()
    }

    /// Mean and std of every numeric column, in header order
    pub fn describe(&self) -> Result<AxisStats> {
        self.columns
            .iter()
            .filter_map(|this| match &this.data {
                ColumnData::Numeric(values) => Some((this.name.as_str(), values)),
                ColumnData::Text(_) => None,
            })
            .map(|(name, values)| Ok((name.to_owned(), self.channel_stats(name, values)?)))
            .collect()
    }

    fn channel_stats(&self, column: &str, values: &[f64]) -> Result<ChannelStats> {
        ChannelStats::from_samples(values).map_err(|source| Error::Stats {
            table: self.name.clone(),
            column: column.to_owned(),
            source,
        })
    }

    /// Average sampling interval and frequency from `time_column`
    pub fn sampling(&self, time_column: &str) -> Result<SamplingDescriptor> {
        sampling::sampling_frequency(self.column(time_column)?).map_err(|source| {
            Error::Sampling {
                table: self.name.clone(),
                column: time_column.to_owned(),
                source,
            }
        })
    }

    /// Printable view of the first `rows` rows
    pub fn head(&self, rows: usize) -> Head<'_> {
        Head {
            table: self,
            rows: rows.min(self.rows),
        }
    }
}

#[derive(Debug)]
pub struct Head<'a> {
    table: &'a Table,
    rows: usize,
}

impl fmt::Display for Head<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index_width = self.rows.saturating_sub(1).to_string().len();

        let columns = self
            .table
            .columns
            .iter()
            .map(|column| {
                let cells = (0..self.rows).map(|row| column.cell(row)).collect::<Vec<_>>();
                let width = cells
                    .iter()
                    .map(String::len)
                    .chain([column.name.chars().count()])
                    .max()
                    .unwrap_or_default();

                (column.name.as_str(), cells, width)
            })
            .collect::<Vec<_>>();

        write!(f, "{:index_width$}", "")?;
        for (name, _, width) in &columns {
            write!(f, "  {name:>width$}", width = *width)?;
        }

        for row in 0..self.rows {
            writeln!(f)?;
            write!(f, "{row:<index_width$}")?;
            for (_, cells, width) in &columns {
                write!(f, "  {:>width$}", cells[row], width = *width)?;
            }
        }

        Ok(())
    }
}
