mod cli;
mod render;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Command, MixArgs, RecipesCommand};
use config::MixerConfig;
use mixlab_blend::{RecipeCalculator, SolverTolerances};
use recipe_store::RecipeStore;
use std::process::ExitCode;
use tracing::info;
use types::{BaseLiquid, Bases, MixOutcome, MixSettings};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let cfg = MixerConfig::load(cli.config.as_deref())?;
    init_tracing(&cfg.log.level);

    match cli.command {
        Command::Mix(args) => run_mix(&cfg, args),
        Command::Recipes { command } => run_recipes(&cfg, command),
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn calculator_from(cfg: &MixerConfig) -> RecipeCalculator {
    RecipeCalculator::new(SolverTolerances {
        negative_volume_ml: cfg.tolerances.negative_volume_ml,
        ratio_degeneracy: cfg.tolerances.ratio_degeneracy,
    })
}

fn run_mix(cfg: &MixerConfig, args: MixArgs) -> Result<ExitCode> {
    let mut store = RecipeStore::open(cfg.recipes_path())?;

    let mut settings = match &args.recipe {
        Some(name) => store
            .load(name)
            .with_context(|| format!("no saved recipe named '{name}'"))?,
        None => cfg.defaults.clone().unwrap_or_default(),
    };
    apply_overrides(&mut settings, &args)?;
    settings.validate()?;

    let outcome = calculator_from(cfg).solve(&settings);
    render::print_outcome(&settings, &outcome);

    if let MixOutcome::Infeasible(_) = outcome {
        if args.save.is_some() {
            eprintln!("refusing to save a recipe that cannot be mixed");
        }
        return Ok(ExitCode::FAILURE);
    }

    if let Some(name) = &args.save {
        let saved = store.save(name, &settings)?;
        println!();
        println!("saved as '{}' ({})", saved.name, saved.saved_at.format("%Y-%m-%d %H:%M"));
    }
    Ok(ExitCode::SUCCESS)
}

/// Layer CLI flags over the starting settings.
fn apply_overrides(settings: &mut MixSettings, args: &MixArgs) -> Result<()> {
    if let Some(volume) = args.volume {
        settings.target_volume_ml = volume;
    }
    if let Some(nicotine) = args.nicotine {
        settings.target_nicotine_mg_ml = nicotine;
    }
    if let Some(aroma) = args.aroma {
        settings.target_aroma_pct = aroma;
    }
    if let Some(ratio) = args.ratio {
        settings.target_ratio = ratio;
    }
    if let Some(strength) = args.booster_strength {
        settings.booster_strength_mg_ml = strength;
    }
    if let Some(ratio) = args.booster_ratio {
        settings.booster_ratio = ratio;
    }
    if let Some(ratio) = args.aroma_ratio {
        settings.aroma_ratio = ratio;
    }

    match args.bases.as_slice() {
        [] => {}
        [only] => settings.bases = Bases::Single(BaseLiquid::new("Base 1", *only)),
        [first, second] => {
            settings.bases = Bases::Dual(
                BaseLiquid::new("Base 1", *first),
                BaseLiquid::new("Base 2", *second),
            )
        }
        more => bail!("at most two bases are supported, got {}", more.len()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use types::ComponentRatio;

    fn no_args() -> MixArgs {
        MixArgs {
            volume: None,
            nicotine: None,
            aroma: None,
            ratio: None,
            booster_strength: None,
            booster_ratio: None,
            aroma_ratio: None,
            bases: Vec::new(),
            recipe: None,
            save: None,
        }
    }

    #[test]
    fn test_overrides_replace_targets() {
        let mut settings = MixSettings::default();
        let args = MixArgs {
            volume: Some(dec!(100)),
            ratio: Some(ComponentRatio::new(dec!(30), dec!(70)).unwrap()),
            bases: vec![ComponentRatio::PURE_PG, ComponentRatio::EVEN],
            ..no_args()
        };

        apply_overrides(&mut settings, &args).unwrap();
        assert_eq!(settings.target_volume_ml, dec!(100));
        assert_eq!(settings.target_ratio.pg(), dec!(30));
        assert_eq!(settings.bases.count(), 2);
        assert_eq!(settings.bases.first().ratio, ComponentRatio::PURE_PG);
        // Untouched fields keep their starting values
        assert_eq!(settings.target_nicotine_mg_ml, dec!(3));
    }

    #[test]
    fn test_more_than_two_bases_rejected() {
        let mut settings = MixSettings::default();
        let args = MixArgs {
            bases: vec![ComponentRatio::EVEN; 3],
            ..no_args()
        };
        assert!(apply_overrides(&mut settings, &args).is_err());
    }
}

fn run_recipes(cfg: &MixerConfig, command: RecipesCommand) -> Result<ExitCode> {
    let mut store = RecipeStore::open(cfg.recipes_path())?;

    match command {
        RecipesCommand::List => {
            if store.list().is_empty() {
                println!("no saved recipes");
                return Ok(ExitCode::SUCCESS);
            }
            println!(
                "{:<24} {:>10} {:>10} {:>10}  {}",
                "name", "mL", "mg/mL", "PG/VG", "saved"
            );
            for recipe in store.list() {
                println!(
                    "{:<24} {:>10} {:>10} {:>10}  {}",
                    recipe.name,
                    recipe.settings.target_volume_ml,
                    recipe.settings.target_nicotine_mg_ml,
                    recipe.settings.target_ratio.to_string(),
                    recipe.saved_at.format("%Y-%m-%d %H:%M"),
                );
            }
        }
        RecipesCommand::Show { name } => {
            let recipe = store
                .find(&name)
                .with_context(|| format!("no saved recipe named '{name}'"))?;
            info!(id = %recipe.id, "showing recipe");

            // Render the stored settings through a fresh solve so the shown
            // numbers always match the current tolerances.
            let outcome = calculator_from(cfg).solve(&recipe.settings);
            render::print_outcome(&recipe.settings, &outcome);
            if !outcome.is_feasible() {
                return Ok(ExitCode::FAILURE);
            }
        }
        RecipesCommand::Delete { name } => {
            if store.delete(&name)? {
                println!("deleted '{name}'");
            } else {
                bail!("no saved recipe named '{name}'");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
