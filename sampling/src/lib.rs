//! # Sampling frequency
//!
//! Estimates the sampling rate of a recorded time series from its time column:
//!
//! ```notrust
//! dt = mean(t[i] - t[i-1]), i = 1..n-1
//! f  = 1 / dt
//! ```
//!
//! Timestamps are expected in seconds, so `f` is in Hz. Spacing does not have
//! to be uniform, only increasing on average.

use std::cmp::Ordering;

const MIN_SAMPLES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SamplingDescriptor {
    /// Average interval between consecutive samples in seconds
    pub interval: f64,
    /// Implied sampling frequency in Hz
    pub frequency: f64,
}

impl SamplingDescriptor {
    /// Frequency rounded to the nearest whole Hz, e.g. `100` for a 99.7 Hz recording.
    pub fn nominal_frequency(&self) -> u64 {
        self.frequency.round() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SamplingError {
    #[error("insufficient samples: need at least 2 timestamps, have {available}")]
    InsufficientSamples { available: usize },
    #[error("invalid time series: mean interval is {mean_interval}, timestamps are not increasing")]
    InvalidTimeSeries { mean_interval: f64 },
}

/// Compute the average sampling interval and frequency of `timestamps`.
///
/// # Params
/// - `timestamps` - time column in seconds, in recording order
///
/// # Errors
/// - [`SamplingError::InsufficientSamples`] for fewer than two timestamps
/// - [`SamplingError::InvalidTimeSeries`] if the mean interval isn't strictly positive and finite
pub fn sampling_frequency(timestamps: &[f64]) -> Result<SamplingDescriptor, SamplingError> {
    if timestamps.len() < MIN_SAMPLES {
        return Err(SamplingError::InsufficientSamples {
            available: timestamps.len(),
        });
    }

    let interval = timestamps
        .windows(2)
        .map(|this| this[1] - this[0])
        .sum::<f64>()
        / (timestamps.len() - 1) as f64;

    // NaN compares as `None` and is rejected together with non-positive and overflowing intervals
    match interval.partial_cmp(&0.0) {
        Some(Ordering::Greater) if interval.is_finite() => Ok(SamplingDescriptor {
            interval,
            frequency: 1.0 / interval,
        }),
        _ => Err(SamplingError::InvalidTimeSeries {
            mean_interval: interval,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn uniform_100hz() {
        let timestamps = [0.0, 0.01, 0.02, 0.03, 0.04];

        let actual = sampling_frequency(&timestamps).unwrap();

        assert!((actual.interval - 0.01).abs() < EPS);
        assert!((actual.frequency - 100.0).abs() < 1e-6);
        assert_eq!(actual.nominal_frequency(), 100);
    }

    #[test]
    fn uniform_spacing_with_offset() {
        let delta = 0.0125;
        let timestamps = (0..400)
            .map(|i| 1234.5 + i as f64 * delta)
            .collect::<Vec<_>>();

        let actual = sampling_frequency(&timestamps).unwrap();

        assert!((actual.interval - delta).abs() < EPS);
        assert!((actual.frequency - 80.0).abs() < 1e-6);
    }

    #[test]
    fn jittered_spacing_uses_mean_delta() {
        let timestamps = [0.0, 0.009, 0.021, 0.030];

        let actual = sampling_frequency(&timestamps).unwrap();

        assert!((actual.interval - 0.01).abs() < EPS);
    }

    #[test]
    fn two_samples_are_enough() {
        let actual = sampling_frequency(&[2.0, 2.5]).unwrap();

        assert!((actual.frequency - 2.0).abs() < EPS);
    }

    #[test]
    fn empty_is_insufficient() {
        assert_eq!(
            sampling_frequency(&[]),
            Err(SamplingError::InsufficientSamples { available: 0 })
        );
    }

    #[test]
    fn single_sample_is_insufficient() {
        assert_eq!(
            sampling_frequency(&[0.5]),
            Err(SamplingError::InsufficientSamples { available: 1 })
        );
    }

    #[test]
    fn duplicate_timestamps_are_invalid() {
        let actual = sampling_frequency(&[1.0, 1.0, 1.0]);

        assert!(matches!(
            actual,
            Err(SamplingError::InvalidTimeSeries { mean_interval }) if mean_interval == 0.0
        ));
    }

    #[test]
    fn decreasing_timestamps_are_invalid() {
        let actual = sampling_frequency(&[0.3, 0.2, 0.25, 0.0]);

        assert!(matches!(
            actual,
            Err(SamplingError::InvalidTimeSeries { mean_interval }) if mean_interval < 0.0
        ));
    }

    #[test]
    fn non_monotonic_but_increasing_on_average_is_accepted() {
        let actual = sampling_frequency(&[0.0, 0.2, 0.1, 0.3]).unwrap();

        assert!((actual.interval - 0.1).abs() < EPS);
    }

    #[test]
    fn nan_timestamp_is_invalid() {
        let actual = sampling_frequency(&[0.0, f64::NAN, 0.2]);

        assert!(matches!(
            actual,
            Err(SamplingError::InvalidTimeSeries { .. })
        ));
    }

    #[test]
    fn overflowing_interval_is_invalid() {
        let actual = sampling_frequency(&[-f64::MAX, f64::MAX]);

        assert!(matches!(
            actual,
            Err(SamplingError::InvalidTimeSeries { mean_interval }) if mean_interval.is_infinite()
        ));
    }
}
