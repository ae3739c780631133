// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ativvo command line client
//!
//! Usage:
//! ```bash
//! ativvo auth login --email ana@example.com --password secret
//! ativvo workouts show
//! ativvo workouts set --day 1 --name "Treino A" --exercise "Supino 4x10"
//! ativvo events day --date 2024-01-15
//! ativvo diet save --file plan.json
//! ativvo dashboard
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use ativvo::{
    config::Config,
    models::{ActivityLevel, Goal, NewEvent, NewFood, ProfileUpdate},
    planner::{BodyProfile, DayAgenda, MacroSelection, MacroSplit, MealPlanDraft, WeekDraft},
    time_utils::{display_week_start, format_date, parse_date, parse_time},
    AppState,
};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "ativvo",
    about = "Ativvo fitness tracker client",
    long_about = "Command-line client for the Ativvo API: workouts, reminders, foods and diet plans."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Account and session
    Auth {
        #[command(subcommand)]
        action: AuthCommand,
    },
    /// Show or edit the profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },
    /// Weekly workout plan
    Workouts {
        #[command(subcommand)]
        action: WorkoutCommand,
    },
    /// Calendar reminders
    Events {
        #[command(subcommand)]
        action: EventCommand,
    },
    /// Food database and TACO table
    Foods {
        #[command(subcommand)]
        action: FoodCommand,
    },
    /// Diet plans
    Diet {
        #[command(subcommand)]
        action: DietCommand,
    },
    /// Weekly progress, today's reminders and the active diet
    Dashboard,
}

#[derive(Subcommand)]
enum AuthCommand {
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Print the cached user
    Whoami,
}

#[derive(Subcommand)]
enum ProfileCommand {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        /// cm
        #[arg(long)]
        height: Option<f64>,
        /// kg
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        body_fat: Option<f64>,
        #[arg(long)]
        weekly_workouts: Option<u32>,
        /// minutes per week
        #[arg(long)]
        cardio_time: Option<u32>,
        #[arg(long)]
        goal: Option<Goal>,
    },
}

#[derive(Subcommand)]
enum WorkoutCommand {
    Show,
    /// Set a training day's name and exercises, then save the week
    Set {
        /// 0 = Sunday ... 6 = Saturday
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
        day: u8,
        #[arg(long)]
        name: String,
        #[arg(long = "exercise")]
        exercises: Vec<String>,
    },
    /// Mark a day as rest (or back to training with --off), then save
    Rest {
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
        day: u8,
        #[arg(long)]
        off: bool,
    },
    /// Flip the completed flag of a saved training day
    Toggle {
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
        day: u8,
    },
    Stats,
}

#[derive(Subcommand)]
enum EventCommand {
    /// All reminders
    List,
    /// Reminders on one day
    Day {
        #[arg(long, value_parser = parse_date_arg)]
        date: NaiveDate,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_date_arg)]
        date: NaiveDate,
        /// HH:mm
        #[arg(long, value_parser = parse_time_arg)]
        time: NaiveTime,
    },
    Delete {
        #[arg(long, value_parser = parse_date_arg)]
        date: NaiveDate,
        #[arg(long)]
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum FoodCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Get {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        calories: f64,
        #[arg(long)]
        protein: f64,
        #[arg(long)]
        carbs: f64,
        #[arg(long)]
        fat: f64,
        /// grams; the API defaults to 100
        #[arg(long)]
        serving_size: Option<f64>,
    },
    TacoSearch {
        query: String,
    },
    TacoImport {
        taco_id: u64,
    },
}

#[derive(Subcommand)]
enum DietCommand {
    /// Show the server's targets for a profile and goal
    Calculate {
        #[arg(long)]
        age: u32,
        #[arg(long)]
        gender: String,
        #[arg(long)]
        height: f64,
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        activity_level: ActivityLevel,
        #[arg(long)]
        goal: Goal,
        /// Custom split as protein,carbs,fat (must add up to 100)
        #[arg(long, value_delimiter = ',')]
        macros: Option<Vec<u32>>,
    },
    Active,
    Plans,
    /// Create a plan with its meals from a JSON draft file
    Save {
        #[arg(long)]
        file: PathBuf,
    },
}

/// Diet draft file read by `diet save`.
#[derive(Debug, Deserialize)]
struct DietDraftFile {
    profile: BodyProfile,
    goal: Goal,
    #[serde(default)]
    macros: Option<MacroSplit>,
    meals: Vec<DraftMealFile>,
}

#[derive(Debug, Deserialize)]
struct DraftMealFile {
    name: String,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    foods: Vec<DraftFoodFile>,
}

#[derive(Debug, Deserialize)]
struct DraftFoodFile {
    food_id: String,
    #[serde(default = "default_quantity")]
    quantity: f64,
}

fn default_quantity() -> f64 {
    ativvo::planner::meals::DEFAULT_QUANTITY_GRAMS
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).ok_or_else(|| format!("expected YYYY-MM-DD, got {:?}", raw))
}

fn parse_time_arg(raw: &str) -> Result<NaiveTime, String> {
    parse_time(raw).ok_or_else(|| format!("expected HH:mm, got {:?}", raw))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(api_url = %config.api_url, "Configuration loaded");
    let state = AppState::new(config)?;

    match cli.command {
        Command::Auth { action } => run_auth(&state, action).await?,
        Command::Profile { action } => run_profile(&state, action).await?,
        Command::Workouts { action } => run_workouts(&state, action).await?,
        Command::Events { action } => run_events(&state, action).await?,
        Command::Foods { action } => run_foods(&state, action).await?,
        Command::Diet { action } => run_diet(&state, action).await?,
        Command::Dashboard => run_dashboard(&state).await?,
    }
    Ok(())
}

async fn run_auth(state: &AppState, action: AuthCommand) -> anyhow::Result<()> {
    match action {
        AuthCommand::Register {
            email,
            password,
            name,
        } => {
            let response = state.auth.register(&email, &password, &name).await?;
            println!("Welcome, {}!", response.user.name);
        }
        AuthCommand::Login { email, password } => {
            let response = state.auth.login(&email, &password).await?;
            println!("Logged in as {}", response.user.email);
        }
        AuthCommand::Logout => {
            state.auth.logout()?;
            println!("Logged out");
        }
        AuthCommand::Whoami => match state.auth.current_user()? {
            Some(user) => println!("{} <{}>", user.name, user.email),
            None => println!("Not logged in"),
        },
    }
    Ok(())
}

async fn run_profile(state: &AppState, action: ProfileCommand) -> anyhow::Result<()> {
    let user = match action {
        ProfileCommand::Show => state.auth.get_profile().await?,
        ProfileCommand::Update {
            name,
            gender,
            height,
            weight,
            body_fat,
            weekly_workouts,
            cardio_time,
            goal,
        } => {
            let update = ProfileUpdate {
                name,
                gender,
                height,
                weight,
                body_fat,
                weekly_workouts,
                cardio_time,
                goal: goal.map(|g| g.to_string()),
            };
            state.auth.update_profile(&update).await?
        }
    };
    println!("{}", serde_json::to_string_pretty(&user)?);
    Ok(())
}

async fn run_workouts(state: &AppState, action: WorkoutCommand) -> anyhow::Result<()> {
    match action {
        WorkoutCommand::Show => {
            let draft = state.workouts.load_draft().await;
            print_week(&draft);
        }
        WorkoutCommand::Set {
            day,
            name,
            exercises,
        } => {
            let saved = state
                .workouts
                .update_week(|draft| {
                    draft.set_rest(day, false)?;
                    draft.set_name(day, &name)?;
                    draft.clear_exercises(day)?;
                    for exercise in &exercises {
                        let index = draft.add_exercise(day)?;
                        draft.update_exercise(day, index, exercise)?;
                    }
                    if !draft.day(day)?.is_savable() {
                        eprintln!(
                            "Note: a training day needs a name and at least one exercise to be saved"
                        );
                    }
                    Ok(())
                })
                .await?;
            print_week(&saved);
        }
        WorkoutCommand::Rest { day, off } => {
            let saved = state
                .workouts
                .update_week(|draft| draft.set_rest(day, !off))
                .await?;
            print_week(&saved);
        }
        WorkoutCommand::Toggle { day } => {
            let draft = state.workouts.load_week().await?;
            let slot = draft.day(day)?;
            let id = match (&slot.id, slot.can_toggle_complete()) {
                (Some(id), true) => id.clone(),
                _ => anyhow::bail!("{} has no saved training to mark", slot.day_name()),
            };
            let completed = state.workouts.toggle_complete(&id).await?;
            println!(
                "{}: {}",
                slot.day_name(),
                if completed { "done" } else { "not done" }
            );
        }
        WorkoutCommand::Stats => {
            let stats = state.workouts.weekly_stats().await;
            println!(
                "{} {}/{} workouts ({:.0}%)",
                stats.emoji,
                stats.completed,
                stats.goal,
                stats.progress_percent()
            );
        }
    }
    Ok(())
}

fn print_week(draft: &WeekDraft) {
    if !draft.week_start.is_empty() {
        println!("Week of {}", display_week_start(&draft.week_start));
    }
    for day in draft.in_display_order() {
        let mark = if day.completed { "[x]" } else { "[ ]" };
        if day.is_rest {
            println!("{:<8} {}", day.day_name(), day.name);
        } else if day.name.is_empty() {
            println!("{:<8} -", day.day_name());
        } else {
            println!("{:<8} {} {}", day.day_name(), mark, day.name);
            for exercise in &day.exercises {
                println!("           - {}", exercise);
            }
        }
    }
}

async fn run_events(state: &AppState, action: EventCommand) -> anyhow::Result<()> {
    match action {
        EventCommand::List => {
            for event in state.events.list().await? {
                println!(
                    "{} {} {} ({})",
                    event.event_date, event.event_time, event.title, event.id
                );
            }
        }
        EventCommand::Day { date } => {
            let agenda = state.events.agenda(&format_date(date)).await;
            print_agenda(&agenda);
        }
        EventCommand::Create {
            title,
            description,
            date,
            time,
        } => {
            let event = state
                .events
                .create(&NewEvent::new(&title, description.as_deref(), date, time))
                .await?;
            println!("Created {} ({})", event.title, event.id);
        }
        EventCommand::Delete { date, id, yes } => {
            let mut agenda = state.events.agenda(&format_date(date)).await;
            let Some(event) = agenda.events().iter().find(|e| e.id == id).cloned() else {
                anyhow::bail!("No event {} on {}", id, agenda.date);
            };
            if !yes && !confirm(&format!("Delete \"{}\"?", event.title))? {
                println!("Cancelled");
                return Ok(());
            }
            state
                .events
                .delete_with_progress(&mut agenda, &id, |p| eprintln!("Deleting... {}%", p))
                .await?;
            print_agenda(&agenda);
        }
    }
    Ok(())
}

fn print_agenda(agenda: &DayAgenda) {
    if agenda.is_empty() {
        println!("No reminders on {}", agenda.date);
        return;
    }
    for event in agenda.events() {
        println!("{} {} ({})", event.event_time, event.title, event.id);
        if !event.description.is_empty() {
            println!("      {}", event.description);
        }
    }
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    use std::io::{BufRead, Write};

    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "s" | "sim"))
}

async fn run_foods(state: &AppState, action: FoodCommand) -> anyhow::Result<()> {
    match action {
        FoodCommand::List {
            search,
            page,
            limit,
        } => {
            let page = state.foods.list(search.as_deref(), page, limit).await?;
            for food in &page.foods {
                println!(
                    "{:<36} {} ({} kcal / {} g)",
                    food.id, food.name, food.calories, food.serving_size
                );
            }
            println!("page {} ({} total)", page.page, page.total);
        }
        FoodCommand::Get { id } => {
            let food = state.foods.get(&id).await?;
            println!("{}", serde_json::to_string_pretty(&food)?);
        }
        FoodCommand::Create {
            name,
            calories,
            protein,
            carbs,
            fat,
            serving_size,
        } => {
            let food = state
                .foods
                .create(&NewFood {
                    name,
                    calories,
                    protein,
                    carbs,
                    fat,
                    serving_size,
                })
                .await?;
            println!("Created {} ({})", food.name, food.id);
        }
        FoodCommand::TacoSearch { query } => {
            let result = state.foods.taco_search(&query).await?;
            for food in &result.foods {
                println!(
                    "{:>5} {} [{}] {} kcal",
                    food.taco_id, food.name, food.category, food.calories
                );
            }
            println!("{} results from {}", result.total, result.source);
        }
        FoodCommand::TacoImport { taco_id } => {
            let food = state.foods.taco_import(taco_id).await?;
            println!("Imported {} ({})", food.name, food.id);
        }
    }
    Ok(())
}

async fn run_diet(state: &AppState, action: DietCommand) -> anyhow::Result<()> {
    match action {
        DietCommand::Calculate {
            age,
            gender,
            height,
            weight,
            activity_level,
            goal,
            macros,
        } => {
            let profile = BodyProfile {
                age,
                gender,
                height,
                weight,
                activity_level,
            };
            let selection = match macros.as_deref() {
                Some([protein, carbs, fat]) => {
                    MacroSelection::custom(goal, MacroSplit::new(*protein, *carbs, *fat))
                }
                Some(_) => anyhow::bail!("--macros takes protein,carbs,fat"),
                None => MacroSelection::new(goal),
            };
            for warning in selection.range_warnings() {
                eprintln!("Note: {}", warning);
            }
            let calculation = state.diet.calculate(&profile.plan_input(&selection)?).await?;
            println!("{}", serde_json::to_string_pretty(&calculation)?);
        }
        DietCommand::Active => match state.diet.active_plan().await {
            Some(plan) => println!("{}", serde_json::to_string_pretty(&plan)?),
            None => println!("No active diet plan"),
        },
        DietCommand::Plans => {
            for plan in state.diet.plans().await? {
                println!(
                    "{} {} {:.0} kcal{}",
                    plan.id,
                    plan.goal,
                    plan.target_calories,
                    if plan.is_active { " (active)" } else { "" }
                );
            }
        }
        DietCommand::Save { file } => save_diet(state, &file).await?,
    }
    Ok(())
}

async fn save_diet(state: &AppState, file: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let draft_file: DietDraftFile = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid diet draft in {}", file.display()))?;

    let selection = match draft_file.macros {
        Some(split) => MacroSelection::custom(draft_file.goal, split),
        None => MacroSelection::new(draft_file.goal),
    };
    let input = draft_file.profile.plan_input(&selection)?;
    let targets = state.diet.calculate(&input).await?;

    let mut draft = MealPlanDraft::new();
    for meal in &draft_file.meals {
        let index = draft.add_meal(&meal.name, meal.time.as_deref())?;
        for item in &meal.foods {
            let food = state.foods.get(&item.food_id).await?;
            draft.add_food(index, food, item.quantity)?;
        }
    }

    let totals = draft.day_totals();
    println!(
        "Day total: {:.0}/{:.0} kcal, P {:.1}/{:.0} g, C {:.1}/{:.0} g, F {:.1}/{:.0} g",
        totals.calories,
        targets.target_calories,
        totals.protein,
        targets.protein_grams,
        totals.carbs,
        targets.carbs_grams,
        totals.fat,
        targets.fat_grams
    );
    if draft.check_targets(&targets).any() {
        eprintln!("Note: some totals are more than 10% above target");
    }

    let saved = state.diet.save_plan(&input, &draft).await?;
    println!(
        "Saved plan {} with {} meals and {} foods",
        saved.plan.id,
        saved.meals.len(),
        saved.foods_created
    );
    Ok(())
}

async fn run_dashboard(state: &AppState) -> anyhow::Result<()> {
    let summary = state.dashboard().await?;
    println!(
        "{} Workouts: {}/{} ({:.0}%), {} to go",
        summary.emoji,
        summary.workouts_completed,
        summary.workouts_goal,
        summary.weekly_progress_percent,
        summary.workouts_remaining
    );
    println!(
        "Cardio: {} min ({:.0}%)",
        summary.cardio_minutes, summary.cardio_progress_percent
    );

    let today = format_date(chrono::Local::now().date_naive());
    print_agenda(&state.events.agenda(&today).await);

    match state.diet.active_plan().await {
        Some(plan) => println!(
            "Diet: {} {:.0} kcal ({} meals)",
            plan.goal,
            plan.target_calories,
            plan.meals.len()
        ),
        None => println!("Diet: no active plan"),
    }
    Ok(())
}

/// Initialize logging to stderr; JSON when requested.
fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ativvo=info,warn"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
