//! Unit conversions between the devices being compared.
//!
//! Microcontroller accelerometers commonly report in standard gravities (g)
//! while phones report in m/s^2:
//!
//! ```notrust
//! a[m/s^2] = a[g] * 9.80665
//! ```

/// Standard gravity in m/s^2
pub const G_CONST: f64 = 9.80665;

#[inline]
pub const fn g_to_mps2(value: f64) -> f64 {
    value * G_CONST
}

#[inline]
pub const fn mps2_to_g(value: f64) -> f64 {
    value / G_CONST
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitConversion {
    /// Samples are already in the comparison unit
    #[default]
    Identity,
    /// g -> m/s^2
    GravityToMetersPerSecondSquared,
}

impl UnitConversion {
    pub const fn factor(self) -> f64 {
        match self {
            Self::Identity => 1.0,
            Self::GravityToMetersPerSecondSquared => G_CONST,
        }
    }

    /// Unit of converted samples, `None` when samples keep their own unit
    pub const fn target_unit(self) -> Option<&'static str> {
        match self {
            Self::Identity => None,
            Self::GravityToMetersPerSecondSquared => Some("m/s^2"),
        }
    }

    #[inline]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Identity => value,
            Self::GravityToMetersPerSecondSquared => g_to_mps2(value),
        }
    }

    /// Elementwise conversion of a whole channel
    pub fn apply_all(self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|this| self.apply(*this)).collect()
    }
}
