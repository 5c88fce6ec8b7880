//! Command-line definitions

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use types::ComponentRatio;

#[derive(Debug, Parser)]
#[command(name = "mixlab", about = "E-liquid recipe calculator", version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute a recipe for the given targets
    Mix(MixArgs),

    /// Manage saved recipes
    Recipes {
        #[command(subcommand)]
        command: RecipesCommand,
    },
}

#[derive(Debug, Args)]
pub struct MixArgs {
    /// Target total volume in mL
    #[arg(long)]
    pub volume: Option<Decimal>,

    /// Target nicotine strength in mg/mL
    #[arg(long)]
    pub nicotine: Option<Decimal>,

    /// Flavoring share of the total volume, in percent
    #[arg(long)]
    pub aroma: Option<Decimal>,

    /// Target PG/VG ratio, e.g. 50/50
    #[arg(long, value_name = "PG/VG")]
    pub ratio: Option<ComponentRatio>,

    /// Booster nicotine strength in mg/mL
    #[arg(long)]
    pub booster_strength: Option<Decimal>,

    /// PG/VG composition of the booster
    #[arg(long, value_name = "PG/VG")]
    pub booster_ratio: Option<ComponentRatio>,

    /// PG/VG composition of the flavoring concentrate
    #[arg(long, value_name = "PG/VG")]
    pub aroma_ratio: Option<ComponentRatio>,

    /// Composition of an available base; pass twice for a two-base mix
    #[arg(long = "base", value_name = "PG/VG")]
    pub bases: Vec<ComponentRatio>,

    /// Start from a saved recipe instead of the defaults
    #[arg(long, value_name = "NAME")]
    pub recipe: Option<String>,

    /// Save the settings under this name after a successful solve
    #[arg(long, value_name = "NAME")]
    pub save: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum RecipesCommand {
    /// List all saved recipes, newest first
    List,

    /// Show a saved recipe and its computed result
    Show { name: String },

    /// Delete a saved recipe
    Delete { name: String },
}
