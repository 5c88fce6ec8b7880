//! Solver input snapshot: targets plus available ingredients
//!
//! A [`MixSettings`] value is the complete, self-contained input of one
//! solve. Callers build a fresh snapshot per computation; the solver only
//! reads it.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;
use crate::ratio::ComponentRatio;

/// One available base stock: a named, premixed PG/VG liquid with no nicotine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseLiquid {
    pub id: Uuid,
    pub name: String,
    pub ratio: ComponentRatio,
}

impl BaseLiquid {
    pub fn new(name: impl Into<String>, ratio: ComponentRatio) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            ratio,
        }
    }
}

/// The one or two base liquids available to a mix.
///
/// Order is significant: in the two-base solve the first and second base
/// play distinct algebraic roles, and the clamp policy favors the first.
/// Using an enum rather than a Vec makes "zero bases" and "three bases"
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Bases {
    Single(BaseLiquid),
    Dual(BaseLiquid, BaseLiquid),
}

impl Bases {
    pub fn first(&self) -> &BaseLiquid {
        match self {
            Bases::Single(base) => base,
            Bases::Dual(base, _) => base,
        }
    }

    pub fn second(&self) -> Option<&BaseLiquid> {
        match self {
            Bases::Single(_) => None,
            Bases::Dual(_, base) => Some(base),
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Bases::Single(_) => 1,
            Bases::Dual(_, _) => 2,
        }
    }
}

/// Everything the solver needs for one computation.
///
/// All fields are read-only from the solver's point of view; results are
/// reported through [`crate::outcome::MixOutcome`], never by mutating the
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixSettings {
    /// Total volume of the finished mix in mL
    pub target_volume_ml: Decimal,
    /// Desired nicotine concentration in mg/mL
    pub target_nicotine_mg_ml: Decimal,
    /// Flavoring share of the total volume, in percent
    pub target_aroma_pct: Decimal,
    /// Desired PG/VG ratio of the finished mix
    pub target_ratio: ComponentRatio,
    /// Nicotine concentration of the booster in mg/mL
    pub booster_strength_mg_ml: Decimal,
    /// PG/VG composition of the booster
    pub booster_ratio: ComponentRatio,
    /// The available base liquid(s)
    pub bases: Bases,
    /// PG/VG composition of the flavoring concentrate
    pub aroma_ratio: ComponentRatio,
}

impl MixSettings {
    /// Check the numeric ranges the ratio types cannot enforce on their own.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.target_volume_ml <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveVolume {
                value: self.target_volume_ml,
            });
        }
        if self.target_nicotine_mg_ml < Decimal::ZERO {
            return Err(ValidationError::NegativeValue {
                field: "target nicotine",
                value: self.target_nicotine_mg_ml,
            });
        }
        if self.booster_strength_mg_ml < Decimal::ZERO {
            return Err(ValidationError::NegativeValue {
                field: "booster strength",
                value: self.booster_strength_mg_ml,
            });
        }
        if self.target_aroma_pct < Decimal::ZERO || self.target_aroma_pct > dec!(100) {
            return Err(ValidationError::PercentOutOfRange {
                value: self.target_aroma_pct,
            });
        }
        Ok(())
    }
}

impl Default for MixSettings {
    /// A 50 mL, 3 mg/mL, 15 % aroma mix from one 50/50 base with a
    /// 20 mg/mL booster. The usual starting point for a new recipe.
    fn default() -> Self {
        Self {
            target_volume_ml: dec!(50),
            target_nicotine_mg_ml: dec!(3),
            target_aroma_pct: dec!(15),
            target_ratio: ComponentRatio::EVEN,
            booster_strength_mg_ml: dec!(20),
            booster_ratio: ComponentRatio::EVEN,
            bases: Bases::Single(BaseLiquid::new("Base 1", ComponentRatio::EVEN)),
            aroma_ratio: ComponentRatio::PURE_PG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = MixSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.bases.count(), 1);
        assert!(settings.bases.second().is_none());
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let mut settings = MixSettings::default();
        settings.target_volume_ml = Decimal::ZERO;
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::NonPositiveVolume { .. })
        ));

        let mut settings = MixSettings::default();
        settings.target_nicotine_mg_ml = dec!(-1);
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::NegativeValue { field: "target nicotine", .. })
        ));

        let mut settings = MixSettings::default();
        settings.target_aroma_pct = dec!(101);
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::PercentOutOfRange { .. })
        ));
    }

    #[test]
    fn test_dual_base_ordering() {
        let first = BaseLiquid::new("Base 1", ComponentRatio::PURE_PG);
        let second = BaseLiquid::new("Base 2", ComponentRatio::EVEN);
        let bases = Bases::Dual(first.clone(), second.clone());
        assert_eq!(bases.first(), &first);
        assert_eq!(bases.second(), Some(&second));
        assert_eq!(bases.count(), 2);
    }
}
