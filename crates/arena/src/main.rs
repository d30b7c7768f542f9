//! llm-arena CLI
//!
//! Play a UCI engine (White) against a language model (Black), or play Black
//! yourself.

use anyhow::{Context, Result};
use chess_core::{CompletionModel, MoveEngine};
use clap::{ArgAction, Args, Parser, Subcommand};
use llm_arena::{play_game, ArenaConfig, Notation, Session};
use model_client::{ChatModel, HumanPlayer};
use random_engine::{RandomEngine, RandomModel};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uci_engine::UciEngine;

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG_FILE: &str = "arena.toml";

/// Engine path / model name that selects the built-in random players
const RANDOM: &str = "random";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Play a UCI engine against a language model and score the model's moves"
)]
struct Cli {
    /// TOML config file (defaults to ./arena.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a session of engine-vs-model games and print the report
    Run(RunArgs),
    /// Play Black against the engine from the terminal
    Play(PlayArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Number of games to play
    #[arg(long)]
    games: Option<u32>,

    /// UCI engine executable, or `random`
    #[arg(long)]
    engine: Option<String>,

    /// Model name, or `random`
    #[arg(long)]
    model: Option<String>,

    /// Token cap for each model reply
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Seed for the random players
    #[arg(long)]
    seed: Option<u64>,

    /// How often the random model answers with an invalid move (0.0-1.0)
    #[arg(long, default_value_t = 0.0)]
    error_rate: f64,

    /// Also write the session report as JSON
    #[arg(long)]
    json_out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// UCI engine executable, or `random`
    #[arg(long)]
    engine: Option<String>,

    /// Seed for the random engine
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Run(args) => run(&mut config, args),
        Command::Play(args) => play(&mut config, args),
    }
}

fn init_tracing(verbose: u8) {
    let filter = if verbose > 0 {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ArenaConfig> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => Path::new(DEFAULT_CONFIG_FILE),
        None => return Ok(ArenaConfig::default()),
    };
    let config = ArenaConfig::load(path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

fn run(config: &mut ArenaConfig, args: RunArgs) -> Result<()> {
    if let Some(games) = args.games {
        config.games = games;
    }
    if let Some(engine) = args.engine {
        config.engine.path = engine;
    }
    if let Some(model) = args.model {
        config.model.name = model;
    }
    if let Some(max_tokens) = args.max_tokens {
        config.model.max_tokens = max_tokens;
    }
    config.validate().context("invalid settings")?;

    let mut engine = open_engine(config, args.seed)?;
    let mut model = open_model(config, args.seed, args.error_rate)?;

    let session = Session::new(config.session_config());
    let report = session.run(engine.as_mut(), model.as_mut(), config.games);
    report.print_report();

    if let Some(path) = args.json_out {
        report
            .save(&path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!("report written to {}", path.display());
    }
    Ok(())
}

fn play(config: &mut ArenaConfig, args: PlayArgs) -> Result<()> {
    if let Some(engine) = args.engine {
        config.engine.path = engine;
    }
    config.model.notation = Notation::Human;
    config.validate().context("invalid settings")?;

    let mut engine = open_engine(config, args.seed)?;
    let stdin = std::io::stdin();
    let mut human = HumanPlayer::new(stdin.lock(), std::io::stdout());

    let game_config = config.session_config().game;
    let outcome = play_game(engine.as_mut(), &mut human, &game_config);

    println!("\n{}\n", outcome.position);
    match outcome.failing_move_number {
        Some(number) => println!(
            "Result: {} (invalid move on move {number}: {})",
            outcome.result, outcome.termination
        ),
        None => println!("Result: {} ({})", outcome.result, outcome.termination),
    }
    println!("Moves: {}", outcome.move_text());
    Ok(())
}

fn open_engine(config: &ArenaConfig, seed: Option<u64>) -> Result<Box<dyn MoveEngine>> {
    if config.engine.path.eq_ignore_ascii_case(RANDOM) {
        let engine = seed.map_or_else(RandomEngine::new, RandomEngine::seeded);
        return Ok(Box::new(engine));
    }
    let engine = UciEngine::spawn(&config.uci_config())
        .with_context(|| format!("failed to start engine {}", config.engine.path))?;
    info!("engine ready: {}", engine.name());
    Ok(Box::new(engine))
}

fn open_model(
    config: &ArenaConfig,
    seed: Option<u64>,
    error_rate: f64,
) -> Result<Box<dyn CompletionModel>> {
    if config.model.name.eq_ignore_ascii_case(RANDOM) {
        // Offset so a shared seed does not mirror the engine's choices.
        let model = seed
            .map_or_else(RandomModel::new, |s| RandomModel::seeded(s.wrapping_add(1)))
            .with_error_rate(error_rate);
        return Ok(Box::new(model));
    }
    if error_rate > 0.0 {
        warn!("--error-rate only applies to the random model; ignoring it");
    }
    let chat = config
        .chat_config()
        .with_key_from_env(&config.model.api_key_env)
        .context("no API key for the model")?;
    let model = ChatModel::new(chat).context("failed to create model client")?;
    Ok(Box::new(model))
}
