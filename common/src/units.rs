//! Speed unit conversion.
//!
//! Everything inside the crate is stored in meters per second. Conversion to
//! the user's display unit happens only at the edge, when a value is shown.

/// Meters per second to kilometers per hour.
pub const MPS_TO_KMH: f32 = 3.6;

/// Meters per second to miles per hour (1 mph = 0.44704 m/s).
pub const MPS_TO_MPH: f32 = 2.236_936;

/// Display unit for speed readouts.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum SpeedUnit {
    /// Kilometers per hour.
    #[default]
    Kmh,
    /// Miles per hour.
    Mph,
    /// Meters per second (raw GPS unit).
    MetersPerSecond,
}

impl SpeedUnit {
    /// All units in toggle order.
    pub const ALL: [Self; 3] = [Self::Kmh, Self::Mph, Self::MetersPerSecond];

    const fn factor(self) -> f32 {
        match self {
            Self::Kmh => MPS_TO_KMH,
            Self::Mph => MPS_TO_MPH,
            Self::MetersPerSecond => 1.0,
        }
    }

    /// Convert a speed in m/s into this unit.
    #[inline]
    pub fn from_mps(
        self,
        mps: f32,
    ) -> f32 {
        mps * self.factor()
    }

    /// Convert a speed in this unit back into m/s.
    #[inline]
    pub fn to_mps(
        self,
        value: f32,
    ) -> f32 {
        value / self.factor()
    }

    /// Short label shown next to the readout.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kmh => "km/h",
            Self::Mph => "mph",
            Self::MetersPerSecond => "m/s",
        }
    }

    /// Cycle to the next unit (km/h -> mph -> m/s -> km/h).
    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Kmh => Self::Mph,
            Self::Mph => Self::MetersPerSecond,
            Self::MetersPerSecond => Self::Kmh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_default() {
        assert_eq!(SpeedUnit::default(), SpeedUnit::Kmh);
    }

    #[test]
    fn test_kmh_conversion() {
        assert!((SpeedUnit::Kmh.from_mps(10.0) - 36.0).abs() < 0.001);
        assert!((SpeedUnit::Kmh.to_mps(100.0) - 27.777_779).abs() < 0.001);
    }

    #[test]
    fn test_mph_conversion() {
        // 26.8224 m/s is exactly 60 mph
        assert!((SpeedUnit::Mph.from_mps(26.8224) - 60.0).abs() < 0.01);
        assert!((SpeedUnit::Mph.to_mps(60.0) - 26.8224).abs() < 0.01);
    }

    #[test]
    fn test_mps_is_identity() {
        assert_eq!(SpeedUnit::MetersPerSecond.from_mps(12.5), 12.5);
        assert_eq!(SpeedUnit::MetersPerSecond.to_mps(12.5), 12.5);
    }

    #[test]
    fn test_labels() {
        assert_eq!(SpeedUnit::Kmh.label(), "km/h");
        assert_eq!(SpeedUnit::Mph.label(), "mph");
        assert_eq!(SpeedUnit::MetersPerSecond.label(), "m/s");
    }

    #[test]
    fn test_toggle_cycle() {
        let unit = SpeedUnit::Kmh;
        let unit = unit.toggle(); // -> Mph
        assert_eq!(unit, SpeedUnit::Mph);
        let unit = unit.toggle(); // -> m/s
        assert_eq!(unit, SpeedUnit::MetersPerSecond);
        let unit = unit.toggle(); // -> Kmh
        assert_eq!(unit, SpeedUnit::Kmh);
    }
}
