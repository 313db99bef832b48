//! Arena CLI: run bot-vs-bot experiments from the command line.
//!
//! Usage:
//!   cargo run --release --bin arena -- --games 100 --p1-type optimal --p2-type random
//!   cargo run --release --bin arena -- --games 20 --p1-type optimal --p2-type optimal --json

use std::sync::atomic::{AtomicUsize, Ordering};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tictactoe_engine::engine::arena::{run_arena, NamedStrategy};
use tictactoe_engine::engine::bot_strategy::{BotStrategy, MinimaxStrategy, RandomStrategy};
use tictactoe_engine::engine::minimax::{RootOrientation, SearchParams};
use tictactoe_engine::Policy;

#[derive(Parser)]
#[command(name = "arena", about = "Run bot-vs-bot arena experiments for tic-tac-toe")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    games: usize,

    /// Base random seed; game i uses seed + i
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Alternate seat positions between games (`--alternate-seats false` keeps
    /// p1 in the First seat)
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    alternate_seats: bool,

    /// P1 display name
    #[arg(long, default_value = "p1")]
    p1_name: String,

    /// P1 policy: "optimal" or "random"
    #[arg(long, default_value = "optimal")]
    p1_type: Policy,

    /// P2 display name
    #[arg(long, default_value = "p2")]
    p2_name: String,

    /// P2 policy: "optimal" or "random"
    #[arg(long, default_value = "random")]
    p2_type: Policy,

    /// Search root branches in parallel
    #[arg(long)]
    parallel_root: bool,

    /// Print the full result as JSON instead of the summary table
    #[arg(long)]
    json: bool,
}

fn build_strategy(policy: Policy, parallel_root: bool) -> Box<dyn BotStrategy> {
    match policy {
        Policy::Random => Box::new(RandomStrategy),
        Policy::Optimal => Box::new(MinimaxStrategy::new(SearchParams {
            root_orientation: RootOrientation::SideToMove,
            parallel_root,
        })),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.p1_name == cli.p2_name {
        return Err("player names must differ".into());
    }

    eprintln!(
        "Arena: {} games, seed={}, alternate_seats={}",
        cli.games, cli.seed, cli.alternate_seats
    );
    eprintln!("  {}: policy={}", cli.p1_name, cli.p1_type);
    eprintln!("  {}: policy={}", cli.p2_name, cli.p2_type);
    eprintln!();

    let strategies: [NamedStrategy; 2] = [
        (cli.p1_name.clone(), build_strategy(cli.p1_type, cli.parallel_root)),
        (cli.p2_name.clone(), build_strategy(cli.p2_type, cli.parallel_root)),
    ];

    let completed = AtomicUsize::new(0);
    let total = cli.games;
    let progress_cb = |done: usize, _total: usize| {
        let prev = completed.fetch_max(done, Ordering::Relaxed);
        if done > prev {
            eprint!("\r  [{}/{}] games completed", done, total);
        }
    };

    let result = run_arena(
        &strategies,
        cli.games,
        cli.seed,
        cli.alternate_seats,
        Some(&progress_cb),
    )?;

    eprintln!("\r                                    "); // clear progress line
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.summary());
    }
    Ok(())
}
