//! Command definitions and handlers.
//!
//! Each command has a clap `Args` struct that converts into the matching
//! core parameter type with `From`, so the core never sees clap types:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```
//!
//! Positions are 1-based on the command line and 0-based in the core.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use liftplan_core::{
    display::{CreateResult, DeleteResult, OperationStatus, UpdateResult},
    generator::{RerollHistory, RerollOutcome, DEFAULT_HISTORY_WINDOW},
    models::QuotaSpec,
    params::{
        DeletePlan, GenerateWorkout, Id, ImportPlans, PinSlot, RerollSlot, SaveTemplate,
        TemplateId,
    },
    Planner, PlannerError, StorageErrorKind,
};
use log::debug;
use rand::rngs::StdRng;

use crate::renderer::TerminalRenderer;

/// Converts a 1-based command-line position to a 0-based index.
fn index(position: u32) -> usize {
    position.saturating_sub(1) as usize
}

/// Import plans from a JSON file
///
/// The file holds one plan object or an array of them. Each plan has a
/// `name` and a list of `exercises` with `name`, optional `tag`, and
/// optional `sets`, `reps`, `weight` and `rest`.
#[derive(Args)]
pub struct ImportPlansArgs {
    /// Path to the JSON file
    pub file: PathBuf,
}

/// Show a plan with its exercises
#[derive(Args)]
pub struct ShowPlanArgs {
    /// ID of the plan to display
    pub id: u64,
}

impl From<ShowPlanArgs> for Id {
    fn from(val: ShowPlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a plan permanently
#[derive(Args)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Address one exercise row of a plan
#[derive(Args)]
pub struct SlotArgs {
    /// ID of the plan
    pub id: u64,
    /// Position of the exercise, starting at 1
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub position: u32,
}

impl SlotArgs {
    fn into_pin(self, pinned: bool) -> PinSlot {
        PinSlot {
            plan_id: self.id,
            position: index(self.position),
            pinned,
        }
    }
}

/// Replace one exercise with another of the same tag
///
/// Recently shown exercises at the same position are skipped. With
/// `--times`, the slot is rerolled repeatedly and the history carries over
/// between rolls.
#[derive(Args)]
pub struct RerollArgs {
    #[command(flatten)]
    pub slot: SlotArgs,
    /// How many times to reroll the slot
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub times: u32,
    /// How many recent exercises to avoid per position (0 disables)
    #[arg(long, default_value_t = DEFAULT_HISTORY_WINDOW)]
    pub history_window: usize,
}

impl From<&RerollArgs> for RerollSlot {
    fn from(val: &RerollArgs) -> Self {
        RerollSlot {
            plan_id: val.slot.id,
            position: index(val.slot.position),
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Import plans from a JSON file
    #[command(alias = "i")]
    Import(ImportPlansArgs),
    /// List all plans
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show details of a specific plan
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
    /// Pin an exercise so regeneration keeps it
    Pin(SlotArgs),
    /// Unpin an exercise
    Unpin(SlotArgs),
    /// Replace one exercise with another of the same tag
    #[command(alias = "r")]
    Reroll(RerollArgs),
    /// Redraw every unpinned exercise of a generated plan
    Regenerate(ShowPlanArgs),
}

/// Show the exercise pool
#[derive(Args)]
pub struct PoolArgs {
    /// Only show exercises with this tag
    #[arg(long)]
    pub tag: Option<String>,
}

/// Draw a new workout
///
/// Quotas are written `TAG=COUNT`, for example `Chest=2 Back=3`. Quotas
/// that cannot be met are reported; the rest are still drawn unless
/// `--strict` is given.
#[derive(Args)]
pub struct GenerateArgs {
    /// Quotas as TAG=COUNT
    pub quotas: Vec<QuotaSpec>,
    /// Use the quotas of a saved template
    #[arg(long)]
    pub template: Option<String>,
    /// Store the generated plan
    #[arg(long)]
    pub save: bool,
    /// Draw nothing if any quota fails validation
    #[arg(long)]
    pub strict: bool,
}

impl From<&GenerateArgs> for GenerateWorkout {
    fn from(val: &GenerateArgs) -> Self {
        GenerateWorkout {
            quotas: val.quotas.clone(),
            template: val.template.clone(),
            strict: val.strict,
        }
    }
}

/// Address one template
#[derive(Args)]
pub struct TemplateIdArgs {
    /// ID of the template
    pub id: String,
}

impl From<TemplateIdArgs> for TemplateId {
    fn from(val: TemplateIdArgs) -> Self {
        TemplateId { id: val.id }
    }
}

/// Save a named set of quotas
#[derive(Args)]
pub struct SaveTemplateArgs {
    /// Template name, up to 50 characters
    pub name: String,
    /// Quotas as TAG=COUNT
    #[arg(required = true)]
    pub quotas: Vec<QuotaSpec>,
}

impl From<SaveTemplateArgs> for SaveTemplate {
    fn from(val: SaveTemplateArgs) -> Self {
        SaveTemplate {
            name: val.name,
            quotas: val.quotas,
        }
    }
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List saved templates
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show one template
    #[command(alias = "s")]
    Show(TemplateIdArgs),
    /// Save a new template
    Save(SaveTemplateArgs),
    /// Delete a template
    #[command(aliases = ["d", "rm"])]
    Delete(TemplateIdArgs),
    /// Check a template against the current exercise pool
    Check(TemplateIdArgs),
}

/// Runs commands against a planner and renders the results.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
    rng: StdRng,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer, rng: StdRng) -> Self {
        Self {
            planner,
            renderer,
            rng,
        }
    }

    pub async fn handle_plan_command(&mut self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Import(args) => self.import_plans(args).await,
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Show(args) => self.show_plan(args.into()).await,
            PlanCommands::Delete(args) => self.delete_plan(args.into()).await,
            PlanCommands::Pin(args) => self.set_pin(args.into_pin(true)).await,
            PlanCommands::Unpin(args) => self.set_pin(args.into_pin(false)).await,
            PlanCommands::Reroll(args) => self.reroll(args).await,
            PlanCommands::Regenerate(args) => self.regenerate(args.into()).await,
        }
    }

    pub async fn handle_template_command(&mut self, command: TemplateCommands) -> Result<()> {
        match command {
            TemplateCommands::List => self.list_templates().await,
            TemplateCommands::Show(args) => self.show_template(args.into()).await,
            TemplateCommands::Save(args) => self.save_template(args.into()).await,
            TemplateCommands::Delete(args) => self.delete_template(args.into()).await,
            TemplateCommands::Check(args) => self.check_template(args.into()).await,
        }
    }

    async fn import_plans(&self, args: ImportPlansArgs) -> Result<()> {
        let content = std::fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        let plans: ImportPlans = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse plans from {}", args.file.display()))?;

        let stored = self
            .planner
            .import_plans(plans)
            .await
            .context("Failed to import plans")?;

        self.renderer.render(&OperationStatus::success(format!(
            "Imported {} plans",
            stored.len()
        )));
        for plan in &stored {
            self.renderer.render_markdown(&format!(
                "- {}. {} ({} exercises)\n",
                plan.id,
                plan.name,
                plan.exercises.len()
            ));
        }
        Ok(())
    }

    pub async fn list_plans(&self) -> Result<()> {
        let summaries = self
            .planner
            .list_plans()
            .await
            .context("Failed to list plans")?;
        self.renderer.render(&summaries);
        Ok(())
    }

    async fn show_plan(&self, params: Id) -> Result<()> {
        let plan = self
            .planner
            .get_plan(&params)
            .await
            .context("Failed to get plan")?
            .ok_or(PlannerError::PlanNotFound { id: params.id })?;
        self.renderer.render(&plan);
        Ok(())
    }

    async fn delete_plan(&self, params: DeletePlan) -> Result<()> {
        let deleted = self
            .planner
            .delete_plan_with_confirmation(&params)
            .await
            .context("Failed to delete plan")?
            .ok_or(PlannerError::PlanNotFound { id: params.id })?;
        self.renderer.render(&DeleteResult::new(deleted));
        Ok(())
    }

    async fn set_pin(&self, params: PinSlot) -> Result<()> {
        let plan = self
            .planner
            .set_pin(&params)
            .await
            .context("Failed to update pin")?;

        let verb = if params.pinned { "Pinned" } else { "Unpinned" };
        let change = format!("{verb} position {}", params.position + 1);
        self.renderer.render(&UpdateResult::with_changes(plan, vec![change]));
        Ok(())
    }

    async fn reroll(&mut self, args: RerollArgs) -> Result<()> {
        let params = RerollSlot::from(&args);
        let mut history = RerollHistory::new(args.history_window);
        let mut changes = Vec::new();
        let mut latest = None;

        for _ in 0..args.times {
            match self
                .planner
                .reroll_slot(&params, &history, &mut self.rng)
                .await
                .context("Failed to reroll exercise")?
            {
                RerollOutcome::Replaced {
                    plan,
                    history: next,
                    previous,
                    chosen,
                } => {
                    changes.push(format!(
                        "Replaced {} with {} at position {}",
                        previous.name,
                        chosen.name,
                        params.position + 1
                    ));
                    history = next;
                    latest = Some(plan);
                }
                RerollOutcome::NoAlternative => {
                    debug!("Reroll stopped after {} replacements", changes.len());
                    self.renderer.render(&OperationStatus::failure(format!(
                        "No alternative exercise left for position {}",
                        params.position + 1
                    )));
                    break;
                }
            }
        }

        if let Some(plan) = latest {
            self.renderer.render(&UpdateResult::with_changes(plan, changes));
        }
        Ok(())
    }

    async fn regenerate(&mut self, params: Id) -> Result<()> {
        let workout = self
            .planner
            .regenerate_plan(&params, &mut self.rng)
            .await
            .context("Failed to regenerate plan")?;

        let notes = workout.diagnostics.iter().map(ToString::to_string).collect();
        self.renderer.render(&UpdateResult::with_changes(workout.plan, notes));
        Ok(())
    }

    pub async fn show_pool(&self, args: PoolArgs) -> Result<()> {
        let pool = self
            .planner
            .exercise_pool()
            .await
            .context("Failed to build exercise pool")?;

        let Some(tag) = args.tag else {
            self.renderer.render(&pool);
            return Ok(());
        };

        let exercises = pool.get(&tag);
        if exercises.is_empty() {
            self.renderer.render_markdown(&format!("No exercises tagged '{tag}' in saved plans.\n"));
            return Ok(());
        }

        let mut markdown = format!("## {tag} ({})\n\n", exercises.len());
        for exercise in exercises {
            markdown.push_str(&format!("- {}\n", exercise.name));
        }
        self.renderer.render_markdown(&markdown);
        Ok(())
    }

    pub async fn generate(&mut self, args: GenerateArgs) -> Result<()> {
        let generation = self
            .planner
            .generate_workout(&GenerateWorkout::from(&args), &mut self.rng)
            .await
            .context("Failed to generate workout")?;

        if !generation.report.valid {
            self.renderer.render(&generation.report);
        }

        let Some(workout) = generation.workout else {
            bail!("Quota validation failed; nothing was generated");
        };

        if !args.save {
            self.renderer.render(&workout);
            self.renderer
                .render_markdown("\nNot saved. Run again with --save to keep this workout.\n");
            return Ok(());
        }

        let saved = self
            .planner
            .save_generated(&workout.plan)
            .await
            .context("Failed to save generated plan")?;
        self.renderer.render(&CreateResult::new(saved));
        for diagnostic in &workout.diagnostics {
            self.renderer.render_markdown(&format!("- {diagnostic}\n"));
        }
        Ok(())
    }

    async fn list_templates(&self) -> Result<()> {
        let templates = self
            .planner
            .list_templates()
            .await
            .context("Failed to list templates")?;
        self.renderer.render(&templates);
        Ok(())
    }

    async fn show_template(&self, params: TemplateId) -> Result<()> {
        let template = self
            .planner
            .list_templates()
            .await
            .context("Failed to list templates")?
            .0
            .into_iter()
            .find(|template| template.id == params.id)
            .ok_or(PlannerError::TemplateNotFound { id: params.id })?;
        self.renderer.render(&template);
        Ok(())
    }

    async fn save_template(&self, params: SaveTemplate) -> Result<()> {
        let write = self
            .planner
            .save_template(&params)
            .await
            .context("Failed to save template")?;

        if !write.storage.success {
            let kind = write.storage.error.unwrap_or(StorageErrorKind::Unknown);
            let hint = if kind.is_recoverable() {
                " Free some space and try again."
            } else {
                ""
            };
            bail!(
                "Template store rejected the write ({kind}): {}.{hint}",
                write.storage.message.as_deref().unwrap_or("no details")
            );
        }

        self.renderer.render(&CreateResult::new(write.template));
        Ok(())
    }

    async fn delete_template(&self, params: TemplateId) -> Result<()> {
        let write = self
            .planner
            .delete_template(&params)
            .await
            .context("Failed to delete template")?;

        if !write.storage.success {
            bail!(
                "Template store rejected the write: {}",
                write.storage.message.as_deref().unwrap_or("no details")
            );
        }

        self.renderer.render(&DeleteResult::new(write.template));
        Ok(())
    }

    async fn check_template(&self, params: TemplateId) -> Result<()> {
        let (template, report) = self
            .planner
            .check_template(&params)
            .await
            .context("Failed to check template")?;
        self.renderer.render(&template);
        self.renderer.render(&report);
        Ok(())
    }
}
