//! Play command - a human against the Monte Carlo engine
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_game() - turn loop with drawing
//! - Level 3: (delegated to hexplay-core Game::play_turn)
//! - Level 4: announcements

use std::io;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use hexplay_core::{Game, HexError, MoveSource, Player, TurnOutcome};
use hexplay_mcts::{MonteCarloConfig, MonteCarloPlayer};

use crate::human::HumanPlayer;
use crate::render;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Side {
    /// Connect left to right, move first
    A,
    /// Connect top to bottom, move second
    B,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::A => Player::A,
            Side::B => Player::B,
        }
    }
}

#[derive(Args)]
pub struct PlayArgs {
    /// Board size (N for an NxN board)
    #[arg(long, default_value = "11")]
    pub size: usize,

    /// Monte Carlo playouts per engine move
    #[arg(long, default_value = "1000")]
    pub simulations: usize,

    /// Side the human plays
    #[arg(long, value_enum, default_value = "a")]
    pub human_side: Side,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let mut game = Game::new(args.size).context("Failed to create board")?;

    let mut config = MonteCarloConfig::new(args.simulations);
    config.seed = seed;
    let mut engine = MonteCarloPlayer::new(config).with_name("computer");

    let stdin = io::stdin();
    let mut human = HumanPlayer::new("you", stdin.lock(), io::stdout());

    tracing::info!(
        "Starting {}x{} game, human plays {:?}, engine uses {} simulations",
        args.size,
        args.size,
        args.human_side,
        args.simulations
    );

    print_intro(args.size);

    match play_game(&mut game, &mut human, &mut engine, args.human_side.into()) {
        Ok(winner) => {
            announce_winner(winner, args.human_side.into());
            Ok(())
        }
        Err(HexError::InputClosed) => {
            println!("Input closed, leaving the game.");
            Ok(())
        }
        Err(err) => Err(err).context("Game aborted"),
    }
}

// ============================================================================
// LEVEL 2 - TURN LOOP
// ============================================================================

/// Alternate human and engine turns, drawing the board before each one
fn play_game(
    game: &mut Game,
    human: &mut dyn MoveSource,
    engine: &mut dyn MoveSource,
    human_player: Player,
) -> Result<Player, HexError> {
    loop {
        print!("{}", render::draw(game.board()));

        let source: &mut dyn MoveSource = if game.board().active_player() == human_player {
            &mut *human
        } else {
            println!("Computer is thinking...");
            &mut *engine
        };

        if let TurnOutcome::Won(winner) = game.play_turn(source)? {
            print!("{}", render::draw(game.board()));
            return Ok(winner);
        }

        if let Some(last) = game.history().last() {
            println!("{} played ({},{})", last.player, last.row, last.col);
        }
    }
}

// ============================================================================
// LEVEL 4 - ANNOUNCEMENTS
// ============================================================================

fn print_intro(size: usize) {
    println!("Game started. Press Ctrl+C to quit.");
    println!("The grid is {}x{}.", size, size);
    println!(
        "Cells are indexed from 0,0 at the top left to {},{} at the bottom right.",
        size - 1,
        size - 1
    );
    println!("X (player A) connects left to right, O (player B) connects top to bottom.");
    println!("Enter a move as `row col`.");
}

fn announce_winner(winner: Player, human: Player) {
    let who = if winner == human { "you" } else { "the computer" };
    println!("Game over! The winner is {} ({}).", winner, who);
}
