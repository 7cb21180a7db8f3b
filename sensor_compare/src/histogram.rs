//! Equal-width histogram binning.
//!
//! Bins span `[min, max]` of the data, every bin is half-open except the last
//! which also holds `max`. A constant series is binned over `[v - 0.5, v + 0.5]`.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` bin edges in ascending order
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bins(&self) -> impl Iterator<Item = (Range<f64>, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(edges, count)| (edges[0]..edges[1], *count))
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or_default()
    }
}

/// Bin finite `values` into `bins` equal-width bins. Non-finite values are ignored.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.max(1);

    let (mut min, mut max) = values
        .iter()
        .filter(|this| this.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), this| {
            (min.min(*this), max.max(*this))
        });

    if min > max {
        // nothing finite to bin
        (min, max) = (0.0, 1.0);
    } else if min == max {
        (min, max) = (min - 0.5, max + 0.5);
    }

    let width = (max - min) / bins as f64;

    let edges = (0..=bins)
        .map(|i| match i == bins {
            true => max,
            false => min + width * i as f64,
        })
        .collect::<Vec<_>>();

    let mut counts = vec![0; bins];

    for value in values.iter().filter(|this| this.is_finite()) {
        let index = (((value - min) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    Histogram { edges, counts }
}
