use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use gofish_cli::config::CliConfig;
use gofish_cli::controller::{Command, GameController};
use gofish_cli::logging::init_logging;
use gofish_cli::render::render;
use gofish_cli::store::SaveStore;
use gofish_core::{AppInfo, GameEngine};

const HELP: &str = "Commands: [enter] advance, a/d move the cursor, new, save, json, q quit";

/// Two-player Go Fish against the computer in the terminal.
#[derive(Debug, Parser)]
#[command(name = "gofish", author, version, about = "Go Fish against a belief-tracking opponent")]
struct Cli {
    /// Path to an optional YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the save file location.
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Override the RNG seed for shuffling and the opponent.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Ignore any existing save and deal a fresh game.
    #[arg(long)]
    new: bool,

    /// Override the tracing level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => CliConfig::from_path(path)?,
        None => CliConfig::default(),
    };

    if let Some(save) = cli.save {
        config.save_path = save;
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    config.validate()?;

    let _logging_guard = init_logging(&config.logging)?;

    let engine = match config.seed {
        Some(seed) => GameEngine::with_seed(seed),
        None => GameEngine::new(),
    };
    let store = SaveStore::new(config.save_path.clone());
    let controller = GameController::new(engine, store, config.autoplay_opponent);
    if !cli.new && controller.resume() {
        println!("Resumed game from {}", config.save_path.display());
    }
    controller.autoplay();

    println!("{} {} ({})", AppInfo::name(), AppInfo::version(), AppInfo::codename());
    println!("{HELP}");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        for message in controller.take_messages() {
            println!("* {message}");
        }
        println!("\n{}", render(&controller.view()));
        print!("> ");
        stdout.flush().context("flushing prompt")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("reading command")?;
        let Some(command) = Command::parse(&line) else {
            println!("Unknown command '{}'. {HELP}", line.trim());
            continue;
        };
        match command {
            Command::ShowJson => println!("{}", controller.view().to_json()?),
            Command::Help => println!("{HELP}"),
            _ => {}
        }
        if !controller.handle(command) {
            break;
        }
    }

    controller
        .save()
        .with_context(|| format!("saving game to {}", config.save_path.display()))?;
    println!("Saved to {}", config.save_path.display());
    Ok(())
}
