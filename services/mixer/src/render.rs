//! Plain-text rendering of solver outcomes

use types::{IngredientAmount, MixOutcome, MixSettings};

/// Print the result of a solve: the ingredient table for a mixable
/// recipe, the warning or error text verbatim otherwise.
pub fn print_outcome(settings: &MixSettings, outcome: &MixOutcome) {
    match outcome {
        MixOutcome::Feasible(breakdown) => print_breakdown(settings, breakdown),
        MixOutcome::Approximated { breakdown, warning } => {
            print_breakdown(settings, breakdown);
            println!();
            println!("warning: {warning}");
        }
        MixOutcome::Infeasible(error) => {
            eprintln!("cannot mix: {error}");
        }
    }
}

fn print_breakdown(settings: &MixSettings, breakdown: &types::MixBreakdown) {
    println!(
        "Recipe: {} mL at {} mg/mL, target {} PG/VG",
        settings.target_volume_ml, settings.target_nicotine_mg_ml, settings.target_ratio
    );
    println!();
    println!("{:<16} {:>12} {:>12}", "ingredient", "volume (mL)", "weight (g)");

    row(&settings.bases.first().name, &breakdown.base1);
    if let Some(base2) = settings.bases.second() {
        row(&base2.name, &breakdown.base2);
    }
    row("Booster", &breakdown.booster);
    row("Aroma", &breakdown.aroma);
    println!(
        "{:<16} {:>12.2} {:>12.2}",
        "total",
        breakdown.total_volume_ml(),
        breakdown.total_weight_g()
    );

    println!();
    println!(
        "achieved ratio: {} PG/VG, nicotine {} mg/mL",
        breakdown.achieved_ratio, breakdown.nicotine_mg_per_ml
    );
}

fn row(name: &str, amount: &IngredientAmount) {
    println!(
        "{:<16} {:>12.2} {:>12.2}",
        name, amount.volume_ml, amount.weight_g
    );
}
