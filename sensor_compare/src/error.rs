use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read input file {}: {source}", .path.display())]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in table '{table}': {source}")]
    Csv {
        table: String,
        #[source]
        source: csv::Error,
    },

    #[error("table '{table}' has no column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("column '{column}' in table '{table}' is not numeric: row {row} holds '{value}'")]
    NonNumericColumn {
        table: String,
        column: String,
        row: usize,
        value: String,
    },

    #[error("table '{table}' already has a column named '{column}'")]
    DuplicateColumn { table: String, column: String },

    #[error("column '{column}' has {actual} values but table '{table}' has {expected} rows")]
    LengthMismatch {
        table: String,
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("time column '{column}' of table '{table}': {source}")]
    Sampling {
        table: String,
        column: String,
        #[source]
        source: sampling::SamplingError,
    },

    #[error("statistics of column '{column}' in table '{table}': {source}")]
    Stats {
        table: String,
        column: String,
        #[source]
        source: channel_stats::StatsError,
    },

    #[error("failed to render chart {}: {message}", .path.display())]
    Chart { path: PathBuf, message: String },

    #[error("failed to open viewer for {}: {source}", .path.display())]
    Viewer {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to write summary {}: {source}", .path.display())]
    Summary {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
