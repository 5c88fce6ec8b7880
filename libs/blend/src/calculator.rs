//! The recipe solver: settings snapshot in, tagged outcome out

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;
use types::{
    Bases, ComponentRatio, IngredientAmount, MixBreakdown, MixError, MixOutcome, MixSettings,
    MixWarning,
};

use crate::mix_math::{BaseSplit, BlendMath};

/// Tolerances used by the solver.
///
/// The defaults reproduce the values the calculation has always used; they
/// are small enough to absorb rounding noise and large enough not to flag
/// legitimate near-zero volumes. Nothing downstream depends on the exact
/// numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverTolerances {
    /// How far below zero a computed volume may fall before it counts as
    /// genuinely negative, in mL
    pub negative_volume_ml: Decimal,
    /// Minimum PG-fraction gap between two bases for the 2x2 system to be
    /// considered solvable
    pub ratio_degeneracy: Decimal,
}

impl Default for SolverTolerances {
    fn default() -> Self {
        Self {
            negative_volume_ml: dec!(0.01),
            ratio_degeneracy: dec!(0.001),
        }
    }
}

/// Pure closed-form recipe solver.
///
/// `solve` is total over validated settings: every outcome, including both
/// infeasibility flavors, is a value of [`MixOutcome`]. No panics, no I/O,
/// no state.
#[derive(Debug, Clone, Default)]
pub struct RecipeCalculator {
    tolerances: SolverTolerances,
}

impl RecipeCalculator {
    pub fn new(tolerances: SolverTolerances) -> Self {
        Self { tolerances }
    }

    /// Allocate the target volume across bases, booster and flavoring.
    pub fn solve(&self, settings: &MixSettings) -> MixOutcome {
        let volume = settings.target_volume_ml;

        // Fixed-volume ingredients: flavoring by percentage, booster by
        // nicotine demand. A zero-nicotine target or a boosterless mix
        // consumes no booster.
        let aroma_volume = volume * settings.target_aroma_pct / dec!(100);
        let booster_volume = if settings.booster_strength_mg_ml > Decimal::ZERO
            && settings.target_nicotine_mg_ml > Decimal::ZERO
        {
            volume * settings.target_nicotine_mg_ml / settings.booster_strength_mg_ml
        } else {
            Decimal::ZERO
        };

        let volume_for_bases = volume - aroma_volume - booster_volume;
        if volume_for_bases < -self.tolerances.negative_volume_ml {
            return MixOutcome::Infeasible(MixError::VolumeOverflow {
                fixed_volume_ml: aroma_volume + booster_volume,
                target_volume_ml: volume,
            });
        }

        // PG the fixed ingredients already contribute, and what the bases
        // must therefore supply to hit the target ratio.
        let fixed_pg = aroma_volume * settings.aroma_ratio.pg_fraction()
            + booster_volume * settings.booster_ratio.pg_fraction();
        let pg_needed_from_bases = volume * settings.target_ratio.pg_fraction() - fixed_pg;

        let (split, clamped) = match &settings.bases {
            // Single base: the remainder goes to it entirely, the ratio
            // lands wherever that composition puts it.
            Bases::Single(_) => (
                BaseSplit {
                    base1_ml: volume_for_bases,
                    base2_ml: Decimal::ZERO,
                },
                false,
            ),
            Bases::Dual(base1, base2) => {
                let split = BlendMath::two_base_split(
                    volume_for_bases,
                    pg_needed_from_bases,
                    base1.ratio.pg_fraction(),
                    base2.ratio.pg_fraction(),
                    self.tolerances.ratio_degeneracy,
                );
                let tolerance = self.tolerances.negative_volume_ml;
                if split.base1_ml < -tolerance || split.base2_ml < -tolerance {
                    // Target ratio lies outside the range the two bases
                    // span: clamp to the boundary and warn instead of
                    // failing.
                    (BlendMath::clamp_split(split, volume_for_bases), true)
                } else {
                    (split, false)
                }
            }
        };

        debug!(
            %volume_for_bases,
            base1_ml = %split.base1_ml,
            base2_ml = %split.base2_ml,
            clamped,
            "base allocation solved"
        );

        let base1_ratio = settings.bases.first().ratio;
        let base2_ratio = settings.bases.second().map(|base| base.ratio);

        let base_pg = split.base1_ml * base1_ratio.pg_fraction()
            + base2_ratio
                .map(|ratio| split.base2_ml * ratio.pg_fraction())
                .unwrap_or(Decimal::ZERO);
        let achieved_ratio =
            ComponentRatio::from_pg_clamped((fixed_pg + base_pg) / volume * dec!(100));

        let breakdown = MixBreakdown {
            base1: IngredientAmount::from_volume(split.base1_ml, base1_ratio.density()),
            base2: match base2_ratio {
                Some(ratio) => IngredientAmount::from_volume(split.base2_ml, ratio.density()),
                None => IngredientAmount::ZERO,
            },
            booster: IngredientAmount::from_volume(booster_volume, settings.booster_ratio.density()),
            aroma: IngredientAmount::from_volume(aroma_volume, settings.aroma_ratio.density()),
            achieved_ratio,
            nicotine_mg_per_ml: settings.target_nicotine_mg_ml,
        };

        if clamped {
            MixOutcome::Approximated {
                warning: MixWarning::UnreachableRatio {
                    requested: settings.target_ratio,
                    achieved: achieved_ratio,
                },
                breakdown,
            }
        } else {
            MixOutcome::Feasible(breakdown)
        }
    }
}
