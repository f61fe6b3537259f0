use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Currency amount with 2 decimal places, stored as a scaled integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(i64);

impl Amount {
    const SCALE: i64 = 100;

    pub const ZERO: Amount = Amount(0);

    /// Out-of-range values saturate and NaN maps to zero.
    pub fn from_float(value: f64) -> Self {
        Amount((value * Self::SCALE as f64).round() as i64)
    }

    /// `None` for non-finite values and values that do not fit once scaled.
    pub fn try_from_float(value: f64) -> Option<Self> {
        let scaled = (value * Self::SCALE as f64).round();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        if !scaled.is_finite() || scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
            return None;
        }
        Some(Amount(scaled as i64))
    }

    pub fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    /// Whole currency units, e.g. a flat tariff.
    pub const fn units(value: i64) -> Self {
        Amount(value * Self::SCALE)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn is_whole(&self) -> bool {
        self.0 % Self::SCALE == 0
    }

    fn to_float(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }
}

/// Renders like a JS number: `300`, `12.5`, `0.05`.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / Self::SCALE as u64;
        let frac = abs % Self::SCALE as u64;
        match frac {
            0 => write!(f, "{sign}{whole}"),
            tenths if tenths % 10 == 0 => write!(f, "{sign}{whole}.{}", tenths / 10),
            _ => write!(f, "{sign}{whole}.{frac:02}"),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_i64(self.0 / Self::SCALE)
        } else {
            serializer.serialize_f64(self.to_float())
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Amount::try_from_float(value)
            .ok_or_else(|| D::Error::custom(format!("amount out of range: {value}")))
    }
}

impl std::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_float_converts_correctly() {
        assert_eq!(Amount::from_float(300.0), Amount::from_scaled(30_000));
        assert_eq!(Amount::from_float(1.5), Amount::from_scaled(150));
        assert_eq!(Amount::from_float(0.01), Amount::from_scaled(1));
    }

    #[test]
    fn from_float_rounds_correctly() {
        assert_eq!(Amount::from_float(1.236), Amount::from_scaled(124));
        assert_eq!(Amount::from_float(1.234), Amount::from_scaled(123));
    }

    #[test]
    fn units_scale_whole_values() {
        assert_eq!(Amount::units(20), Amount::from_scaled(2_000));
        assert!(Amount::units(0).is_zero());
    }

    #[test]
    fn display_drops_trailing_zeros() {
        assert_eq!(Amount::units(300).to_string(), "300");
        assert_eq!(Amount::from_scaled(1_250).to_string(), "12.5");
        assert_eq!(Amount::from_scaled(1_205).to_string(), "12.05");
        assert_eq!(Amount::from_scaled(5).to_string(), "0.05");
        assert_eq!(Amount::ZERO.to_string(), "0");
    }

    #[test]
    fn display_formats_negative() {
        assert_eq!(Amount::from_scaled(-2_550).to_string(), "-25.5");
    }

    #[test]
    fn display_handles_extremes() {
        assert_eq!(Amount::from_scaled(i64::MIN).to_string(), "-92233720368547758.08");
        assert_eq!(Amount::from_scaled(i64::MAX).to_string(), "92233720368547758.07");
    }

    #[test]
    fn try_from_float_rejects_unrepresentable_values() {
        assert_eq!(Amount::try_from_float(12.5), Some(Amount::from_scaled(1_250)));
        assert_eq!(Amount::try_from_float(f64::NAN), None);
        assert_eq!(Amount::try_from_float(f64::INFINITY), None);
        assert_eq!(Amount::try_from_float(1e20), None);
        assert_eq!(Amount::try_from_float(-1e20), None);
    }

    #[test]
    fn from_float_saturates() {
        assert_eq!(Amount::from_float(1e20), Amount::from_scaled(i64::MAX));
        assert_eq!(Amount::from_float(-1e20), Amount::from_scaled(i64::MIN));
        assert_eq!(Amount::from_float(f64::NAN), Amount::ZERO);
    }

    #[test]
    fn serializes_whole_amounts_as_integers() {
        assert_eq!(serde_json::to_string(&Amount::units(330)).unwrap(), "330");
        assert_eq!(serde_json::to_string(&Amount::from_scaled(1_250)).unwrap(), "12.5");
    }

    #[test]
    fn deserializes_integers_and_floats() {
        let a: Amount = serde_json::from_str("300").unwrap();
        assert_eq!(a, Amount::units(300));
        let b: Amount = serde_json::from_str("99.99").unwrap();
        assert_eq!(b, Amount::from_scaled(9_999));
    }

    #[test]
    fn deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Amount>("1e20").is_err());
        assert!(serde_json::from_str::<Amount>("-1e20").is_err());
    }

    #[test]
    fn add_and_add_assign() {
        let mut a = Amount::units(300);
        assert_eq!(a + Amount::units(30), Amount::units(330));
        a += Amount::units(20);
        assert_eq!(a, Amount::units(320));
    }

    #[test]
    fn add_saturates_at_the_bounds() {
        let max = Amount::from_scaled(i64::MAX);
        assert_eq!(max + Amount::units(30), max);

        let mut min = Amount::from_scaled(i64::MIN);
        min += Amount::from_scaled(-1);
        assert_eq!(min, Amount::from_scaled(i64::MIN));
    }

    #[test]
    fn ordering() {
        assert!(Amount::units(20) < Amount::units(30));
        assert!(Amount::from_scaled(-1) < Amount::ZERO);
    }
}
