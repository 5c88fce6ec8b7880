//! PG/VG composition ratios and component densities
//!
//! Every ingredient in a mix is described by the share of propylene glycol
//! (PG) and vegetable glycerin (VG) it contains. The pair always sums to
//! 100, so most call sites only ever supply the PG side.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Density of propylene glycol in g/mL
pub const DENSITY_PG: Decimal = dec!(1.036);

/// Density of vegetable glycerin in g/mL
pub const DENSITY_VG: Decimal = dec!(1.261);

/// Density of pure nicotine in g/mL
pub const DENSITY_NICOTINE: Decimal = dec!(1.01);

const HUNDRED: Decimal = dec!(100);

/// Tolerance when checking that the two components sum to 100
const SUM_TOLERANCE: Decimal = dec!(0.001);

/// A PG/VG percentage pair summing to 100.
///
/// Immutable once constructed; [`ComponentRatio::new`] enforces the range
/// and sum invariants, so a value of this type is always well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRatio {
    pg: Decimal,
    vg: Decimal,
}

impl ComponentRatio {
    /// The 50/50 ratio used as the default almost everywhere
    pub const EVEN: Self = Self {
        pg: dec!(50),
        vg: dec!(50),
    };

    /// Pure PG, the usual composition of a flavoring concentrate
    pub const PURE_PG: Self = Self {
        pg: dec!(100),
        vg: Decimal::ZERO,
    };

    /// Build a ratio from both components, validating range and sum.
    pub fn new(pg: Decimal, vg: Decimal) -> Result<Self, ValidationError> {
        for value in [pg, vg] {
            if value < Decimal::ZERO || value > HUNDRED {
                return Err(ValidationError::PercentOutOfRange { value });
            }
        }
        if (pg + vg - HUNDRED).abs() > SUM_TOLERANCE {
            return Err(ValidationError::RatioSumMismatch { pg, vg });
        }
        Ok(Self { pg, vg })
    }

    /// Build a ratio from the PG share alone; VG is the complement.
    pub fn from_pg(pg: Decimal) -> Result<Self, ValidationError> {
        if pg < Decimal::ZERO || pg > HUNDRED {
            return Err(ValidationError::PercentOutOfRange { value: pg });
        }
        Ok(Self {
            pg,
            vg: HUNDRED - pg,
        })
    }

    /// Like [`ComponentRatio::from_pg`] but clamping into [0, 100].
    ///
    /// Used where the PG share is already arithmetically bounded and only
    /// rounding could push it marginally out of range.
    pub fn from_pg_clamped(pg: Decimal) -> Self {
        let pg = pg.clamp(Decimal::ZERO, HUNDRED);
        Self {
            pg,
            vg: HUNDRED - pg,
        }
    }

    /// PG share in percent
    pub fn pg(&self) -> Decimal {
        self.pg
    }

    /// VG share in percent
    pub fn vg(&self) -> Decimal {
        self.vg
    }

    /// PG share as a 0–1 fraction, the form the solver algebra wants
    pub fn pg_fraction(&self) -> Decimal {
        self.pg / HUNDRED
    }

    /// VG share as a 0–1 fraction
    pub fn vg_fraction(&self) -> Decimal {
        self.vg / HUNDRED
    }

    /// Density of a liquid with this composition, in g/mL.
    ///
    /// Linear blend of the fixed component densities weighted by the
    /// PG/VG shares.
    pub fn density(&self) -> Decimal {
        self.pg_fraction() * DENSITY_PG + self.vg_fraction() * DENSITY_VG
    }
}

impl fmt::Display for ComponentRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.pg, self.vg)
    }
}

impl FromStr for ComponentRatio {
    type Err = ValidationError;

    /// Parse a `PG/VG` pair such as `70/30`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidRatioFormat {
            input: s.to_string(),
        };
        let (pg, vg) = s.split_once('/').ok_or_else(invalid)?;
        let pg = Decimal::from_str(pg.trim()).map_err(|_| invalid())?;
        let vg = Decimal::from_str(vg.trim()).map_err(|_| invalid())?;
        Self::new(pg, vg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ratio() {
        let ratio = ComponentRatio::new(dec!(70), dec!(30)).unwrap();
        assert_eq!(ratio.pg(), dec!(70));
        assert_eq!(ratio.vg(), dec!(30));
        assert_eq!(ratio.pg_fraction(), dec!(0.7));
    }

    #[test]
    fn test_sum_must_be_hundred() {
        let err = ComponentRatio::new(dec!(70), dec!(40)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::RatioSumMismatch {
                pg: dec!(70),
                vg: dec!(40)
            }
        );
    }

    #[test]
    fn test_component_range() {
        assert!(ComponentRatio::new(dec!(120), dec!(-20)).is_err());
        assert!(ComponentRatio::from_pg(dec!(-1)).is_err());
        assert!(ComponentRatio::from_pg(dec!(100.5)).is_err());
    }

    #[test]
    fn test_clamped_constructor() {
        let ratio = ComponentRatio::from_pg_clamped(dec!(100.004));
        assert_eq!(ratio.pg(), dec!(100));
        assert_eq!(ratio.vg(), Decimal::ZERO);

        let ratio = ComponentRatio::from_pg_clamped(dec!(-0.002));
        assert_eq!(ratio.pg(), Decimal::ZERO);
        assert_eq!(ratio.vg(), dec!(100));
    }

    #[test]
    fn test_density_blend() {
        // 50/50 lands exactly between the component densities
        assert_eq!(ComponentRatio::EVEN.density(), dec!(1.1485));
        assert_eq!(ComponentRatio::PURE_PG.density(), DENSITY_PG);
    }

    #[test]
    fn test_parse() {
        let ratio: ComponentRatio = "70/30".parse().unwrap();
        assert_eq!(ratio.pg(), dec!(70));

        let ratio: ComponentRatio = " 50 / 50 ".parse().unwrap();
        assert_eq!(ratio, ComponentRatio::EVEN);

        assert!("70".parse::<ComponentRatio>().is_err());
        assert!("70/40".parse::<ComponentRatio>().is_err());
        assert!("pg/vg".parse::<ComponentRatio>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let ratio = ComponentRatio::new(dec!(62.5), dec!(37.5)).unwrap();
        assert_eq!(ratio.to_string(), "62.5/37.5");
        assert_eq!(ratio.to_string().parse::<ComponentRatio>().unwrap(), ratio);
    }
}
