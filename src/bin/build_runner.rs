//! Headless Build Runner
//!
//! Applies a JSON script of build steps to a fresh subject and prints the
//! resulting subject, skill sheet and point totals as JSON.

use clap::Parser;
use serde::{Deserialize, Serialize};
use skillforge::attributes::RaceTable;
use skillforge::build::{BuildSession, BuildSubject, SubjectKind};
use skillforge::core::config::{BudgetConfigResolver, FileBudgetConfigProvider};
use skillforge::core::error::{BuildError, Result};
use skillforge::core::types::{AllocationKey, AttributeKind, SkillId};
use skillforge::skills::{load_skill_catalog_file, SheetRow};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Headless Build Runner - replay build steps against the engine
#[derive(Parser, Debug)]
#[command(name = "build_runner")]
#[command(about = "Apply a script of build steps and print the resulting build")]
struct Args {
    /// JSON file holding a list of build steps
    script: PathBuf,

    /// Skill catalog TOML
    #[arg(long, default_value = "data/skills/core.toml")]
    catalog: PathBuf,

    /// Race table TOML
    #[arg(long, default_value = "data/races/core.toml")]
    races: PathBuf,

    /// Directory of per-campaign budget files (<campaign>.toml)
    #[arg(long, default_value = "data/campaigns")]
    campaigns: PathBuf,

    /// Campaign whose budgets apply (defaults when unset)
    #[arg(long)]
    campaign: Option<String>,

    /// Race id for the subject
    #[arg(long)]
    race: Option<String>,

    /// Build an NPC instead of a player character
    #[arg(long)]
    npc: bool,

    /// Subject display name
    #[arg(long, default_value = "Unnamed")]
    name: String,
}

/// One scripted intent
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Step {
    SetAttribute { attribute: String, value: i32 },
    Allocate { path: Vec<String>, points: i32 },
    Lock,
    Checkpoint,
    Rollback,
    ChallengeRating { value: u32 },
}

#[derive(Serialize)]
struct Rejection {
    step: usize,
    error: String,
}

/// JSON output structure
#[derive(Serialize)]
struct RunOutput {
    subject: BuildSubject,
    sheet: Vec<SheetRow>,
    remaining_attribute_points: u32,
    remaining_skill_points: u32,
    available_xp: u32,
    remaining_xp: i64,
    purchasable: Vec<AllocationKey>,
    rejected: Vec<Rejection>,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skillforge=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let catalog = load_skill_catalog_file(&args.catalog)?;
    let races = if args.races.exists() {
        RaceTable::load(&args.races)?
    } else {
        tracing::warn!("Race table {:?} not found - using race defaults", args.races);
        RaceTable::new()
    };
    let budgets = BudgetConfigResolver::with_provider(FileBudgetConfigProvider::new(&args.campaigns));

    let kind = if args.npc {
        SubjectKind::Npc
    } else {
        SubjectKind::PlayerCharacter
    };
    let mut subject = BuildSubject::new(kind, args.name.clone());
    if let Some(campaign) = &args.campaign {
        subject = subject.with_campaign(campaign.clone());
    }
    if let Some(race) = &args.race {
        subject = subject.with_race(race.clone());
    }

    let session = BuildSession::for_subject(&subject, catalog, &budgets, &races)?;
    session.recompute(&mut subject)?;

    let steps: Vec<Step> = serde_json::from_str(&fs::read_to_string(&args.script)?)?;
    let mut rejected = Vec::new();
    for (i, step) in steps.iter().enumerate() {
        if let Err(e) = apply_step(&session, &mut subject, step) {
            tracing::info!("Step {} rejected: {}", i, e);
            rejected.push(Rejection {
                step: i,
                error: e.to_string(),
            });
        }
    }

    let output = RunOutput {
        sheet: session.sheet(&subject)?,
        remaining_attribute_points: session.remaining_attribute_points(&subject),
        remaining_skill_points: session.remaining_skill_points(&subject),
        available_xp: session.available_xp(&subject),
        remaining_xp: session.remaining_xp(&subject),
        purchasable: session.purchasable(&subject),
        rejected,
        subject,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn apply_step(session: &BuildSession, subject: &mut BuildSubject, step: &Step) -> Result<()> {
    match step {
        Step::SetAttribute { attribute, value } => {
            let attr = AttributeKind::from_code(attribute)
                .ok_or_else(|| BuildError::InvalidConfig(format!("unknown attribute '{}'", attribute)))?;
            session.set_attribute(subject, attr, *value)?;
        }
        Step::Allocate { path, points } => {
            let path = path.iter().map(|s| SkillId::new(s.as_str())).collect();
            let key = AllocationKey::from_path(path)
                .ok_or_else(|| BuildError::InvalidConfig("empty allocation path".into()))?;
            session.allocate(subject, &key, *points)?;
        }
        Step::Lock => session.lock(subject)?,
        Step::Checkpoint => session.checkpoint(subject)?,
        Step::Rollback => session.rollback(subject)?,
        Step::ChallengeRating { value } => session.set_challenge_rating(subject, *value)?,
    }
    Ok(())
}
