#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Island Survival sessions headlessly.

mod headless;
mod high_score_file;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use island_survival_core::ResourceKind;
use island_survival_rendering::{FrameControl, GameOverSummary, RenderingBackend};
use island_survival_simulation::Simulation;
use island_survival_world::query;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    headless::{HeadlessBackend, Pilot},
    high_score_file::JsonHighScoreFile,
    settings::{load_config, Overrides},
};

/// Command-line arguments accepted by the Island Survival binary.
#[derive(Debug, Parser)]
#[command(name = "island-survival", about = "Runs an Island Survival session")]
struct CliArgs {
    /// TOML file with gameplay tunables; omitted fields keep their defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for terrain, resources and enemy spawns.
    #[arg(long)]
    seed: Option<u64>,
    /// Length of the session in seconds.
    #[arg(long, value_name = "SECONDS")]
    session_seconds: Option<f32>,
    /// JSON file holding the best score across sessions.
    #[arg(long, value_name = "PATH", default_value = "island-survival-highscore.json")]
    high_score_file: PathBuf,
    /// Simulated frames per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=1_000))]
    tick_hz: u32,
    /// Upper bound on the number of frames before the run stops.
    #[arg(long, default_value_t = 18_000)]
    max_ticks: u64,
    /// Let a scripted player gather and build (the default).
    #[arg(long, conflicts_with = "idle")]
    autopilot: bool,
    /// Stand still until the session ends.
    #[arg(long)]
    idle: bool,
}

impl CliArgs {
    fn pilot(&self) -> Pilot {
        if self.idle && !self.autopilot {
            Pilot::Idle
        } else {
            Pilot::Autopilot
        }
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            seed: self.seed,
            session_seconds: self.session_seconds,
        }
    }
}

/// Entry point for the Island Survival command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let mut config = load_config(args.config.as_deref())?;
    args.overrides().apply(&mut config);

    let store = JsonHighScoreFile::new(&args.high_score_file);
    info!(path = %store.path().display(), "using high score file");

    let mut simulation = Simulation::new(config, store);
    println!("{}", query::welcome_banner(simulation.world()));
    let presentation = simulation
        .presentation("Island Survival")
        .context("failed to describe the island for presentation")?;

    HeadlessBackend::new(args.tick_hz, args.max_ticks, args.pilot()).run(
        presentation,
        move |dt, input, scene, hud| {
            simulation.step(dt, input);
            simulation.populate_scene(scene);
            simulation.populate_hud(hud);

            match hud.game_over {
                Some(summary) => {
                    print_summary(&summary);
                    FrameControl::Exit
                }
                None => FrameControl::Continue,
            }
        },
    )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn print_summary(summary: &GameOverSummary) {
    let stats = summary.stats;
    println!("{}", summary.headline());
    println!("Final score: {}", summary.final_score);
    if summary.new_record {
        println!("High score: {} (new record!)", summary.high_score);
    } else {
        println!("High score: {}", summary.high_score);
    }
    println!(
        "Harvested: {} wood, {} stone, {} iron from {} nodes",
        stats.harvested.amount(ResourceKind::Wood),
        stats.harvested.amount(ResourceKind::Stone),
        stats.harvested.amount(ResourceKind::Iron),
        stats.nodes_collected
    );
    println!(
        "Buildings: {} placed, {} lost",
        stats.buildings_placed, stats.buildings_lost
    );
    println!(
        "Enemies: {} spawned, {} destroyed",
        stats.enemies_spawned, stats.enemies_killed
    );
    println!(
        "Projectiles: {} fired, {} hits",
        stats.projectiles_fired, stats.projectile_hits
    );
}
