#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays the Gift Hunt room from a pointer script.

mod config;
mod presenter;
mod room;
mod script;

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use gift_hunt_core::Outcome;
use gift_hunt_session::Session;
use gift_hunt_system_picker::Viewport;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{config::GameConfig, presenter::LoggingPresenter};

/// Plays one Gift Hunt playthrough driven by scripted pointer input.
#[derive(Debug, Parser)]
#[command(name = "gift-hunt", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the letter draw, overriding the configuration file.
    #[arg(long)]
    seed: Option<u64>,
    /// Script of pointer commands; read from stdin when omitted.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f32,
    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f32,
}

/// Entry point for the Gift Hunt command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let commands = script::parse(&read_script(cli.script.as_ref())?)?;

    let mut rng = match cli.seed.or(config.seed) {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let viewport = Viewport::new(cli.width, cli.height);
    let mut session = Session::new(config.session_config(), viewport, &mut rng)
        .context("failed to start the playthrough")?;
    let mut presenter = LoggingPresenter::new((cli.width, cli.height), config.assets.modal_size);

    for command in commands {
        script::execute(&mut session, &mut presenter, command);
    }

    let state = session.game_state();
    println!("letter: {}", session.letter().as_str());
    println!("attempts: {}", state.attempts());
    println!("outcome: {}", outcome_label(state.outcome()));
    println!("gifts in scene: {}", presenter.gifts().len());
    Ok(())
}

fn read_script(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display())),
        None => {
            let mut source = String::new();
            let _ = io::stdin()
                .read_to_string(&mut source)
                .context("failed to read script from stdin")?;
            Ok(source)
        }
    }
}

fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Pending => "pending",
        Outcome::Won => "won",
        Outcome::LostRetry => "lost-retry",
        Outcome::LostFinal => "lost-final",
    }
}
