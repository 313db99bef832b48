//! Console front end: plays a game on stdin/stdout.
//!
//! Commands:
//!   `<row> <column>`  place a mark (0-2 each)
//!   `g`               toggle human-vs-human / human-vs-engine
//!   `r`               reset the game
//!   `0` / `1`         random / optimal engine policy
//!   `q`               quit

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tictactoe_engine::engine::config::{load_config, load_default_config};
use tictactoe_engine::{GameMode, MatchController, MatchState, Policy};

#[derive(Parser)]
#[command(name = "tictactoe", about = "Play tic-tac-toe against an unbeatable engine")]
struct Cli {
    /// Path to tictactoe.toml (default: auto-discover)
    #[arg(long, env = "TICTACTOE_CONFIG")]
    config: Option<PathBuf>,

    /// Game mode: "pvp" or "engine"
    #[arg(long)]
    mode: Option<GameMode>,

    /// Engine policy: "random" or "optimal"
    #[arg(long)]
    policy: Option<Policy>,

    /// RNG seed for the random policy
    #[arg(long, env = "TICTACTOE_SEED")]
    seed: Option<u64>,
}

enum Command {
    Place(usize, usize),
    ToggleMode,
    Reset,
    SetPolicy(Policy),
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    match line {
        "q" | "quit" => return Ok(Command::Quit),
        "g" => return Ok(Command::ToggleMode),
        "r" => return Ok(Command::Reset),
        "0" | "1" => return line.parse().map(Command::SetPolicy),
        _ => {}
    }
    let coords: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect();
    match coords.as_slice() {
        [row, column] => {
            let row = row.parse().map_err(|_| format!("bad row '{row}'"))?;
            let column = column.parse().map_err(|_| format!("bad column '{column}'"))?;
            Ok(Command::Place(row, column))
        }
        _ => Err(format!("unrecognized command '{line}'")),
    }
}

fn show(controller: &MatchController) {
    println!("\n{}\n", controller.board());
    match controller.state() {
        MatchState::AwaitingMove(player) => println!("{player} to move ({})", controller.mode()),
        MatchState::Over(outcome) => println!("Game over: {outcome}. Press r to play again."),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => load_default_config(),
    };
    if let Some(mode) = cli.mode {
        config.match_config.mode = mode;
    }
    if let Some(policy) = cli.policy {
        config.engine.policy = policy;
    }
    if cli.seed.is_some() {
        config.match_config.seed = cli.seed;
    }

    let mut controller = config.build_controller();
    tracing::info!(
        mode = %controller.mode(),
        policy = %controller.engine().policy,
        engine_player = ?controller.engine().controlled_player,
        "starting game"
    );
    show(&controller);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if controller.is_engine_turn() {
            let mv = controller.engine_turn()?;
            println!("Engine plays {mv}");
            show(&controller);
            continue;
        }

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::ToggleMode) => {
                let mode = controller.toggle_mode();
                println!("Mode: {mode}");
            }
            Ok(Command::Reset) => {
                controller.reset();
                show(&controller);
            }
            Ok(Command::SetPolicy(policy)) => {
                controller.set_policy(policy);
                println!("Engine policy: {policy}");
            }
            Ok(Command::Place(row, column)) => match controller.submit_move(row, column) {
                Ok(_) => show(&controller),
                Err(e) => println!("{e}"),
            },
            Err(e) => println!("{e}"),
        }
    }

    Ok(())
}
