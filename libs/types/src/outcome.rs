//! Solver output: tagged outcome with per-ingredient amounts
//!
//! The outcome is a discriminated union rather than a flags-and-nullable
//! record, so a caller cannot read ingredient volumes without having
//! established that the mix is feasible.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::ratio::ComponentRatio;

/// Volume and weight of one ingredient in the finished mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub volume_ml: Decimal,
    pub weight_g: Decimal,
}

impl IngredientAmount {
    pub const ZERO: Self = Self {
        volume_ml: Decimal::ZERO,
        weight_g: Decimal::ZERO,
    };

    /// Derive the weight from a volume and the liquid's density in g/mL.
    pub fn from_volume(volume_ml: Decimal, density: Decimal) -> Self {
        Self {
            volume_ml,
            weight_g: volume_ml * density,
        }
    }
}

/// The full ingredient allocation of a solved mix.
#[derive(Debug, Clone, PartialEq)]
pub struct MixBreakdown {
    pub base1: IngredientAmount,
    /// Zero in single-base mode
    pub base2: IngredientAmount,
    pub booster: IngredientAmount,
    pub aroma: IngredientAmount,
    /// The PG/VG ratio the allocation actually produces
    pub achieved_ratio: ComponentRatio,
    /// Always the requested target; the solver does not model nicotine loss
    pub nicotine_mg_per_ml: Decimal,
}

impl MixBreakdown {
    /// Sum of all ingredient volumes; equals the target volume for any
    /// outcome the solver returns.
    pub fn total_volume_ml(&self) -> Decimal {
        self.base1.volume_ml + self.base2.volume_ml + self.booster.volume_ml + self.aroma.volume_ml
    }

    /// Sum of all ingredient weights.
    pub fn total_weight_g(&self) -> Decimal {
        self.base1.weight_g + self.base2.weight_g + self.booster.weight_g + self.aroma.weight_g
    }
}

/// The single hard-failure signal: the fixed-volume ingredients alone
/// exceed the target volume.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MixError {
    #[error(
        "flavoring and booster alone need {fixed_volume_ml} mL but the target is only \
         {target_volume_ml} mL; lower the aroma percentage or the nicotine target"
    )]
    VolumeOverflow {
        fixed_volume_ml: Decimal,
        target_volume_ml: Decimal,
    },
}

/// The single soft signal: the exact target ratio cannot be reached with
/// the given bases, so the solver substituted the closest allocation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MixWarning {
    #[error(
        "the exact {requested} PG/VG target is unreachable with these bases; \
         showing the closest possible mix, which lands at {achieved}"
    )]
    UnreachableRatio {
        requested: ComponentRatio,
        achieved: ComponentRatio,
    },
}

/// Result of one solve.
#[derive(Debug, Clone, PartialEq)]
pub enum MixOutcome {
    /// Every target met exactly
    Feasible(MixBreakdown),
    /// Mixable, but the target ratio was clamped to the nearest reachable one
    Approximated {
        breakdown: MixBreakdown,
        warning: MixWarning,
    },
    /// Not mixable at all; no allocation is produced
    Infeasible(MixError),
}

impl MixOutcome {
    /// The ingredient allocation, when one exists.
    pub fn breakdown(&self) -> Option<&MixBreakdown> {
        match self {
            MixOutcome::Feasible(breakdown) => Some(breakdown),
            MixOutcome::Approximated { breakdown, .. } => Some(breakdown),
            MixOutcome::Infeasible(_) => None,
        }
    }

    /// True for both the exact and the approximated case.
    pub fn is_feasible(&self) -> bool {
        !matches!(self, MixOutcome::Infeasible(_))
    }

    pub fn warning(&self) -> Option<&MixWarning> {
        match self {
            MixOutcome::Approximated { warning, .. } => Some(warning),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&MixError> {
        match self {
            MixOutcome::Infeasible(error) => Some(error),
            _ => None,
        }
    }
}
