//! Liftplan CLI application.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use liftplan_core::PlannerBuilder;
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        seed,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!("Liftplan started");

    let mut cli = Cli::new(planner, renderer, rng);
    match command {
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Pool(args)) => cli.show_pool(args).await,
        Some(Generate(args)) => cli.generate(args).await,
        Some(Template { command }) => cli.handle_template_command(command).await,
        None => cli.list_plans().await,
    }
}
