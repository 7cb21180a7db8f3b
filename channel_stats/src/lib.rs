//! Per-channel descriptive statistics.
//!
//! Standard deviation is the sample one:
//!
//! ```notrust
//! std = sqrt(sum((x - mean)^2) / (n - 1))
//! ```

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ChannelStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    #[error("no samples")]
    Empty,
    #[error("a single sample has no sample standard deviation")]
    SingleSample,
    #[error("sample {index} is not a finite number")]
    NonFinite { index: usize },
}

impl ChannelStats {
    /// Reduce a channel to its count, mean, sample standard deviation and range.
    pub fn from_samples(samples: &[f64]) -> Result<Self, StatsError> {
        match samples.len() {
            0 => return Err(StatsError::Empty),
            1 => return Err(StatsError::SingleSample),
            _ => {}
        }

        if let Some(index) = samples.iter().position(|this| !this.is_finite()) {
            return Err(StatsError::NonFinite { index });
        }

        let count = samples.len();
        let mean = samples.iter().sum::<f64>() / count as f64;
        let variance = samples
            .iter()
            .map(|this| (this - mean).powi(2))
            .sum::<f64>()
            / (count - 1) as f64;

        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), this| {
                (min.min(*this), max.max(*this))
            });

        Ok(Self {
            count,
            mean,
            std: variance.sqrt(),
            min,
            max,
        })
    }

    /// Statistics of the same channel after multiplying every sample by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        let (min, max) = match factor.is_sign_negative() {
            true => (self.max * factor, self.min * factor),
            false => (self.min * factor, self.max * factor),
        };

        Self {
            count: self.count,
            mean: self.mean * factor,
            std: self.std * factor.abs(),
            min,
            max,
        }
    }
}
