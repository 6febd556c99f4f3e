//! Match command - Monte Carlo self-play
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hexplay_core::{Game, Player};
use hexplay_mcts::{MonteCarloConfig, MonteCarloPlayer};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Board size (N for an NxN board)
    #[arg(long, default_value = "7")]
    pub size: usize,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Playouts per move for player A
    #[arg(long, default_value = "200")]
    pub simulations: usize,

    /// Playouts per move for player B (defaults to --simulations)
    #[arg(long)]
    pub simulations_b: Option<usize>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    winner: Player,
    moves: usize,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    a_wins: usize,
    b_wins: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting match on {}x{}: {} games, {} vs {} simulations",
        args.size,
        args.size,
        args.games,
        args.simulations,
        args.simulations_b.unwrap_or(args.simulations)
    );

    let results = play_match(&args, seed)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match
fn play_match(args: &MatchArgs, seed: Option<u64>) -> Result<MatchResults> {
    let mut rng = create_rng(seed);
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        let record = play_single_game(args, game_num + 1, &mut rng)
            .with_context(|| format!("Game {} failed", game_num + 1))?;

        tracing::info!(
            "Game {}: {} wins in {} moves",
            record.game_number,
            record.winner,
            record.moves
        );

        games.push(record);
    }

    Ok(compute_match_statistics(games))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) {
    if args.json {
        print_json_results(results, args);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play a single game, each player seeded from the match rng
fn play_single_game(
    args: &MatchArgs,
    game_number: usize,
    rng: &mut ChaCha8Rng,
) -> Result<GameRecord> {
    let config_a = MonteCarloConfig::new(args.simulations).with_seed(rng.gen());
    let config_b =
        MonteCarloConfig::new(args.simulations_b.unwrap_or(args.simulations)).with_seed(rng.gen());

    let mut player_a = MonteCarloPlayer::new(config_a).with_name("A");
    let mut player_b = MonteCarloPlayer::new(config_b).with_name("B");

    let mut game = Game::new(args.size)?;
    let record = game.play(&mut player_a, &mut player_b)?;

    Ok(GameRecord {
        game_number,
        winner: record.winner,
        moves: record.moves.len(),
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let a_wins = games.iter().filter(|g| g.winner == Player::A).count();
    let b_wins = games.iter().filter(|g| g.winner == Player::B).count();

    let total_moves: usize = games.iter().map(|g| g.moves).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        a_wins,
        b_wins,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn percentage(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults, args: &MatchArgs) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        winner: Player,
        moves: usize,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        size: usize,
        total_games: usize,
        a_wins: usize,
        b_wins: usize,
        avg_moves: f32,
        a_win_rate: f32,
        games: Vec<JsonGame>,
    }

    let total = results.games.len();
    let output = JsonOutput {
        size: args.size,
        total_games: total,
        a_wins: results.a_wins,
        b_wins: results.b_wins,
        avg_moves: results.avg_moves,
        a_win_rate: percentage(results.a_wins, total) / 100.0,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                winner: g.winner,
                moves: g.moves,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!(
        "A wins:      {} ({:.1}%)",
        results.a_wins,
        percentage(results.a_wins, total)
    );
    println!(
        "B wins:      {} ({:.1}%)",
        results.b_wins,
        percentage(results.b_wins, total)
    );
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {} in {} moves",
            game.game_number, game.winner, game.moves
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
