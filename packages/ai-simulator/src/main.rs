//! AI Simulator CLI: plays AI-only Jøssing games on the in-memory engine
//! and records per-game metrics.

mod metrics;
mod output;
mod simulator;
mod types;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use metrics::{build_game_metrics, GameConfig, TierSummary};
use output::{OutputWriter, RunSummary, TierLine};
use simulator::{Simulator, TableSetup};
use tracing::{info, warn};
use types::{DifficultyArg, GameTypeArg, OutputFormat, ScoringArg};

#[derive(Parser)]
#[command(name = "ai-simulator")]
#[command(about = "Play AI-only Jossing games and record bidding accuracy")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// AI tier for every seat; `mixed` rotates easy, medium, hard by seat
    #[arg(long, default_value = "medium")]
    difficulty: DifficultyArg,

    /// Seats at the table
    #[arg(long, default_value = "4", value_parser = clap::value_parser!(u8).range(3..=7))]
    players: u8,

    #[arg(long, default_value = "up")]
    game_type: GameTypeArg,

    #[arg(long, default_value = "classic")]
    scoring: ScoringArg,

    /// Bar the dealer's bid that would make the total equal the hand size
    #[arg(long)]
    dealer_restriction: bool,

    /// Base seed; game N uses seed + N. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log as JSON lines, the engine's service format
    #[arg(long)]
    json_logs: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: PathBuf,

    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Gzip the JSONL file
    #[arg(long)]
    compress: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.json_logs {
        jossing_engine::telemetry::init_tracing();
    } else {
        init_plain_logging(args.verbose);
    }

    let setup = TableSetup {
        game_type: args.game_type.into(),
        scoring: args.scoring.into(),
        seats: args.difficulty.seats(args.players),
        dealer_restriction: args.dealer_restriction,
    };
    info!(games = args.games, players = args.players, ?setup, "Starting AI simulator");

    let simulator = Simulator::new(setup);
    let mut writer = OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;
    let mut tiers = TierSummary::default();
    let base_seed = args.seed.unwrap_or_else(rand::random);

    let start = Instant::now();
    let mut completed = 0u32;
    let mut failed = 0u32;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let seed = base_seed.wrapping_add(game_num as u64);
        match simulator.simulate_game(seed) {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let config = GameConfig {
                    game_type: simulator.setup().game_type,
                    scoring: simulator.setup().scoring,
                    difficulties: simulator.setup().seats.clone(),
                    total_games: args.games,
                };
                let metrics = build_game_metrics(game_num, config, &result, duration_ms);
                tiers.add(&metrics);
                if let Err(e) = writer.write_game(&metrics) {
                    warn!(game_num, error = %e, "Failed to write metrics");
                }
                info!(game_num, seed, scores = ?metrics.result.final_scores, "Game completed");
                completed += 1;
            }
            Err(e) => {
                failed += 1;
                warn!(game_num, seed, error = %e, "Game failed");
            }
        }
    }

    let rows = tiers.rows();
    let summary = RunSummary {
        games: completed,
        failed,
        tiers: rows
            .iter()
            .map(|&(difficulty, exact_bid_pct, seats_played, wins)| TierLine {
                difficulty,
                seats_played,
                wins,
                exact_bid_pct,
            })
            .collect(),
    };

    let (jsonl_path, csv_path) = writer.output_paths();
    let (jsonl_path, csv_path) = (jsonl_path.map(|p| p.to_path_buf()), csv_path.to_path_buf());
    writer.finish(&summary)?;

    let elapsed = start.elapsed();
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {completed}/{}", args.games);
    if failed > 0 {
        println!("Errors: {failed}");
    }
    println!("Total time: {elapsed:?}");
    if completed > 0 {
        println!("Average time per game: {:?}", elapsed / completed);
    }
    println!("\n=== Exact Bids by Tier ===");
    for line in &summary.tiers {
        println!(
            "{:<6} exact={:.1}% seats={} wins={}",
            line.difficulty, line.exact_bid_pct, line.seats_played, line.wins
        );
    }
    if let Some(path) = jsonl_path {
        println!("\nDetailed results: {}", path.display());
    }
    println!("Summary CSV: {}", csv_path.display());

    Ok(())
}

/// Silent by default; `RUST_LOG` still wins.
fn init_plain_logging(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
