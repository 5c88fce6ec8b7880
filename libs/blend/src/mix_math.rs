//! Two-base allocation math with exact calculations
//!
//! Solves the linear system behind a dual-base mix and clamps allocations
//! that land outside the reachable range. Kept free of any settings or
//! outcome types so the algebra is testable in isolation.

use rust_decimal::Decimal;

/// Volumes assigned to each base by the two-base solve, in mL.
///
/// Components may be negative straight out of [`BlendMath::two_base_split`];
/// that is how an unreachable target ratio manifests. Callers decide
/// whether to clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseSplit {
    pub base1_ml: Decimal,
    pub base2_ml: Decimal,
}

/// Base-split math functions
pub struct BlendMath;

impl BlendMath {
    /// Solve the dual-base system
    ///
    /// ```text
    /// V1 + V2           = volume_for_bases
    /// V1*p1 + V2*p2     = pg_needed
    /// ```
    ///
    /// where `p1`, `p2` are the bases' PG fractions in 0–1. Closed form:
    /// `V1 = (pg_needed - volume_for_bases*p2) / (p1 - p2)`.
    ///
    /// When `|p1 - p2| < degeneracy_tolerance` the system has no usable
    /// solution (the bases are effectively the same liquid), so the whole
    /// budget goes to base 1 instead of dividing by a near-zero number.
    pub fn two_base_split(
        volume_for_bases: Decimal,
        pg_needed: Decimal,
        p1: Decimal,
        p2: Decimal,
        degeneracy_tolerance: Decimal,
    ) -> BaseSplit {
        if (p1 - p2).abs() < degeneracy_tolerance {
            return BaseSplit {
                base1_ml: volume_for_bases,
                base2_ml: Decimal::ZERO,
            };
        }

        let base1_ml = (pg_needed - volume_for_bases * p2) / (p1 - p2);
        BaseSplit {
            base1_ml,
            base2_ml: volume_for_bases - base1_ml,
        }
    }

    /// Clamp a split with a negative component onto the boundary.
    ///
    /// The negative side is zeroed and the whole budget goes to the other
    /// base, which is the nearest reachable allocation. When both sides are
    /// negative (pathological inputs only) base 1 is the one zeroed; the
    /// choice is arbitrary and carries no business meaning.
    pub fn clamp_split(split: BaseSplit, volume_for_bases: Decimal) -> BaseSplit {
        if split.base1_ml < Decimal::ZERO {
            BaseSplit {
                base1_ml: Decimal::ZERO,
                base2_ml: volume_for_bases,
            }
        } else {
            BaseSplit {
                base1_ml: volume_for_bases,
                base2_ml: Decimal::ZERO,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pure_bases_split() {
        // 100/0 and 0/100 bases, 30 mL of PG needed out of 100 mL
        let split = BlendMath::two_base_split(dec!(100), dec!(30), dec!(1), dec!(0), dec!(0.001));
        assert_eq!(split.base1_ml, dec!(30));
        assert_eq!(split.base2_ml, dec!(70));
    }

    #[test]
    fn test_split_satisfies_both_equations() {
        let (vfb, needed, p1, p2) = (dec!(35), dec!(12.25), dec!(0.7), dec!(0.3));
        let split = BlendMath::two_base_split(vfb, needed, p1, p2, dec!(0.001));
        assert_eq!(split.base1_ml + split.base2_ml, vfb);
        assert_eq!(split.base1_ml * p1 + split.base2_ml * p2, needed);
    }

    #[test]
    fn test_degenerate_bases_get_no_split() {
        let split = BlendMath::two_base_split(dec!(40), dec!(20), dec!(0.5), dec!(0.5004), dec!(0.001));
        assert_eq!(split.base1_ml, dec!(40));
        assert_eq!(split.base2_ml, Decimal::ZERO);
    }

    #[test]
    fn test_unreachable_target_goes_negative() {
        // Bases span 90-100% PG but the target needs none
        let split = BlendMath::two_base_split(dec!(100), dec!(0), dec!(1), dec!(0.9), dec!(0.001));
        assert!(split.base1_ml < Decimal::ZERO);
    }

    #[test]
    fn test_clamp_zeroes_negative_side() {
        let clamped = BlendMath::clamp_split(
            BaseSplit {
                base1_ml: dec!(-12),
                base2_ml: dec!(52),
            },
            dec!(40),
        );
        assert_eq!(clamped.base1_ml, Decimal::ZERO);
        assert_eq!(clamped.base2_ml, dec!(40));

        let clamped = BlendMath::clamp_split(
            BaseSplit {
                base1_ml: dec!(52),
                base2_ml: dec!(-12),
            },
            dec!(40),
        );
        assert_eq!(clamped.base1_ml, dec!(40));
        assert_eq!(clamped.base2_ml, Decimal::ZERO);
    }
}
