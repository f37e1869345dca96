use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{GenerateArgs, PlanCommands, PoolArgs, TemplateCommands};

/// Quota-driven random workout planner
///
/// Import your workout plans, then draw new workouts by asking for a number
/// of exercises per muscle-group tag. Generated plans can be pinned, rerolled
/// one slot at a time, or regenerated around the pinned exercises.
#[derive(Parser)]
#[command(version, about, name = "liftplan")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/liftplan/liftplan.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Seed for the random source, for reproducible draws
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage saved plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Show the exercise pool built from saved plans
    Pool(PoolArgs),
    /// Draw a new workout from per-tag quotas
    #[command(alias = "g")]
    Generate(GenerateArgs),
    /// Manage quota templates
    #[command(alias = "t")]
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
}
