use std::fmt;

use channel_stats::ChannelStats;

/// Statistics per named axis, in the order the axes were requested
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisStats(Vec<(String, ChannelStats)>);

impl AxisStats {
    pub fn get(&self, axis: &str) -> Option<&ChannelStats> {
        self.0
            .iter()
            .find_map(|(name, stats)| (name == axis).then_some(stats))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChannelStats)> {
        self.0.iter().map(|(name, stats)| (name.as_str(), stats))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn stds(&self) -> Vec<f64> {
        self.0.iter().map(|(_, stats)| stats.std).collect()
    }
}

impl FromIterator<(String, ChannelStats)> for AxisStats {
    fn from_iter<T: IntoIterator<Item = (String, ChannelStats)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

const ROW_LABEL_WIDTH: usize = 4;

/// Two rows (`mean`, `std`) with one right-aligned column per axis
impl fmt::Display for AxisStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self
            .0
            .iter()
            .map(|(name, stats)| {
                let mean = format!("{:.6}", stats.mean);
                let std = format!("{:.6}", stats.std);
                let width = name.chars().count().max(mean.len()).max(std.len());

                (name, mean, std, width)
            })
            .collect::<Vec<_>>();

        write!(f, "{:ROW_LABEL_WIDTH$}", "")?;
        for (name, _, _, width) in &cells {
            write!(f, "  {name:>width$}", width = *width)?;
        }
        writeln!(f)?;

        write!(f, "{:<ROW_LABEL_WIDTH$}", "mean")?;
        for (_, mean, _, width) in &cells {
            write!(f, "  {mean:>width$}", width = *width)?;
        }
        writeln!(f)?;

        write!(f, "{:<ROW_LABEL_WIDTH$}", "std")?;
        for (_, _, std, width) in &cells {
            write!(f, "  {std:>width$}", width = *width)?;
        }

        Ok(())
    }
}
