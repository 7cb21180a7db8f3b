//! PNG charts drawn with `plotters`.
//!
//! Canvas sizes are given in inches and rendered at [`DPI`], font sizes in
//! points. Every chart owns its drawing area for the duration of one draw
//! call, the area is presented and dropped before the optional viewer runs.

use std::{
    ops::Range,
    path::{Path, PathBuf},
    process::Command,
};

use plotters::prelude::*;

use crate::{
    Error, Result,
    histogram::{Histogram, histogram},
};

pub const DPI: u32 = 300;
/// Time series canvas in inches
pub const WIDE_FIGURE: (f64, f64) = (12.0, 5.0);
/// Histogram and bar chart canvas in inches
pub const SQUARE_FIGURE: (f64, f64) = (8.0, 6.0);

const TITLE_PT: u32 = 14;
const LABEL_PT: u32 = 11;
const TICK_PT: u32 = 9;
const LEGEND_PT: u32 = 10;
const STROKE_PT: u32 = 1;
const LEGEND_WIDTH: i32 = 80;

/// Fraction of the data range added on both sides of an axis
const MARGIN: f64 = 0.05;
const HISTOGRAM_ALPHA: f64 = 0.5;
const BAR_WIDTH: f64 = 0.35;

const PALETTE: [RGBColor; 3] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
];

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

pub fn pixels((width, height): (f64, f64)) -> (u32, u32) {
    (
        (width * f64::from(DPI)).round() as u32,
        (height * f64::from(DPI)).round() as u32,
    )
}

const fn points(size: u32) -> u32 {
    size * DPI / 72
}

const fn font(size: u32) -> (&'static str, u32) {
    ("sans-serif", points(size))
}

/// Range of the finite `values` widened by `margin` of its length on both sides.
pub fn value_range<'a>(values: impl IntoIterator<Item = &'a f64>, margin: f64) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|this| this.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), this| {
            (min.min(*this), max.max(*this))
        });

    if min > max {
        return 0.0..1.0;
    }

    if min == max {
        return (min - 0.5)..(max + 0.5);
    }

    let pad = (max - min) * margin;

    (min - pad)..(max + pad)
}

#[derive(Debug, Clone, Copy)]
pub struct Labels<'a> {
    pub title: &'a str,
    pub x: &'a str,
    pub y: &'a str,
}

/// Named sequence of values, one line, histogram or bar group
#[derive(Debug, Clone, Copy)]
pub struct Series<'a> {
    pub label: &'a str,
    pub values: &'a [f64],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    pub output_dir: PathBuf,
    /// Open every saved chart in the platform viewer and wait for it
    pub show: bool,
    pub histogram_bins: usize,
}

#[derive(Debug, Clone)]
pub struct ChartRenderer {
    options: ChartOptions,
}

impl ChartRenderer {
    /// Create the renderer, making sure the output directory exists
    pub fn new(options: ChartOptions) -> Result<Self> {
        std::fs::create_dir_all(&options.output_dir).map_err(|source| Error::OutputDir {
            path: options.output_dir.clone(),
            source,
        })?;

        Ok(Self { options })
    }

    /// One line per series against a shared time axis
    pub fn time_series(
        &self,
        file_name: &str,
        labels: &Labels<'_>,
        time: &[f64],
        series: &[Series<'_>],
    ) -> Result<PathBuf> {
        let path = self.options.output_dir.join(file_name);
        let drawn = draw_time_series(&path, labels, time, series);

        self.finish(path, drawn)
    }

    /// Semi-transparent histograms of every series on shared axes
    pub fn overlaid_histogram(
        &self,
        file_name: &str,
        labels: &Labels<'_>,
        series: &[Series<'_>],
    ) -> Result<PathBuf> {
        let path = self.options.output_dir.join(file_name);
        let drawn = draw_histogram(&path, labels, series, self.options.histogram_bins);

        self.finish(path, drawn)
    }

    /// Side by side bars, one bar per group at every category
    pub fn grouped_bars(
        &self,
        file_name: &str,
        labels: &Labels<'_>,
        categories: &[&str],
        groups: &[Series<'_>],
    ) -> Result<PathBuf> {
        let path = self.options.output_dir.join(file_name);
        let drawn = draw_grouped_bars(&path, labels, categories, groups);

        self.finish(path, drawn)
    }

    fn finish(&self, path: PathBuf, drawn: DrawResult) -> Result<PathBuf> {
        drawn.map_err(|e| Error::Chart {
            path: path.clone(),
            message: e.to_string(),
        })?;

        log::info!("Saved chart {}", path.display());

        if self.options.show {
            show(&path)?;
        }

        Ok(path)
    }
}

/// Open `path` in the platform image viewer and block until the viewer returns
fn show(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut command = Command::new("open");
        command.arg("-W").arg(path);
        command
    };

    #[cfg(target_os = "windows")]
    let mut command = {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "/WAIT", ""]).arg(path);
        command
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    };

    let status = command.status().map_err(|source| Error::Viewer {
        path: path.to_path_buf(),
        source,
    })?;

    if !status.success() {
        log::warn!("Viewer for {} exited with {status}", path.display());
    }

    Ok(())
}

fn draw_time_series(
    path: &Path,
    labels: &Labels<'_>,
    time: &[f64],
    series: &[Series<'_>],
) -> DrawResult {
    let root = BitMapBackend::new(path, pixels(WIDE_FIGURE)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_range = value_range(time, 0.0);
    let y_range = value_range(series.iter().flat_map(|this| this.values), MARGIN);

    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, font(TITLE_PT))
        .margin(points(8))
        .x_label_area_size(points(36))
        .y_label_area_size(points(52))
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(labels.x)
        .y_desc(labels.y)
        .axis_desc_style(font(LABEL_PT))
        .label_style(font(TICK_PT))
        .draw()?;

    for (series, color) in series.iter().zip(PALETTE.iter().cycle()) {
        let style = color.stroke_width(points(STROKE_PT));

        chart
            .draw_series(LineSeries::new(
                time.iter().copied().zip(series.values.iter().copied()),
                style,
            ))?
            .label(series.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + LEGEND_WIDTH, y)], style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(font(LEGEND_PT))
        .draw()?;

    root.present()?;

    Ok(())
}

fn draw_histogram(path: &Path, labels: &Labels<'_>, series: &[Series<'_>], bins: usize) -> DrawResult {
    let histograms = series
        .iter()
        .map(|this| histogram(this.values, bins))
        .collect::<Vec<_>>();

    let root = BitMapBackend::new(path, pixels(SQUARE_FIGURE)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_range = value_range(histograms.iter().flat_map(|this| this.edges.iter()), MARGIN);
    let y_max = histograms
        .iter()
        .map(Histogram::max_count)
        .max()
        .unwrap_or_default()
        .max(1) as f64
        * (1.0 + MARGIN);

    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, font(TITLE_PT))
        .margin(points(8))
        .x_label_area_size(points(36))
        .y_label_area_size(points(44))
        .build_cartesian_2d(x_range, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc(labels.x)
        .y_desc(labels.y)
        .axis_desc_style(font(LABEL_PT))
        .label_style(font(TICK_PT))
        .draw()?;

    for ((series, histogram), color) in series.iter().zip(&histograms).zip(PALETTE.iter().cycle()) {
        let fill = color.mix(HISTOGRAM_ALPHA).filled();

        chart
            .draw_series(histogram.bins().map(|(bin, count)| {
                Rectangle::new([(bin.start, 0.0), (bin.end, count as f64)], fill)
            }))?
            .label(series.label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 12), (x + LEGEND_WIDTH, y + 12)], fill));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(font(LEGEND_PT))
        .draw()?;

    root.present()?;

    Ok(())
}

fn draw_grouped_bars(
    path: &Path,
    labels: &Labels<'_>,
    categories: &[&str],
    groups: &[Series<'_>],
) -> DrawResult {
    let root = BitMapBackend::new(path, pixels(SQUARE_FIGURE)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = groups
        .iter()
        .flat_map(|this| this.values)
        .copied()
        .filter(|this| this.is_finite())
        .fold(0.0, f64::max);
    let y_max = match y_max > 0.0 {
        true => y_max * (1.0 + MARGIN),
        false => 1.0,
    };

    let category_label = |x: &f64| {
        let index = x.round();

        match (x - index).abs() < 1e-6 && index >= 0.0 {
            true => categories
                .get(index as usize)
                .map(|this| this.to_string())
                .unwrap_or_default(),
            false => String::new(),
        }
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, font(TITLE_PT))
        .margin(points(8))
        .x_label_area_size(points(36))
        .y_label_area_size(points(52))
        .build_cartesian_2d(-0.5..(categories.len() as f64 - 0.5), 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(categories.len())
        .x_label_formatter(&category_label)
        .x_desc(labels.x)
        .y_desc(labels.y)
        .axis_desc_style(font(LABEL_PT))
        .label_style(font(TICK_PT))
        .draw()?;

    // groups sit next to each other, centered on the category
    let first_offset = -(groups.len() as f64) / 2.0 * BAR_WIDTH;

    for (index, (group, color)) in groups.iter().zip(PALETTE.iter().cycle()).enumerate() {
        let fill = color.filled();
        let offset = first_offset + index as f64 * BAR_WIDTH;

        chart
            .draw_series(group.values.iter().enumerate().map(|(category, value)| {
                let x = category as f64 + offset;

                Rectangle::new([(x, 0.0), (x + BAR_WIDTH, *value)], fill)
            }))?
            .label(group.label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 12), (x + LEGEND_WIDTH, y + 12)], fill));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(font(LEGEND_PT))
        .draw()?;

    root.present()?;

    Ok(())
}
