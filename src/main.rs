//! Demo driver: replays scripted matches through the engine and prints
//! the resulting settlement, statistics, and balances.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, Scenario};
use tracing::info;
use tracing_subscriber::EnvFilter;
use xox_engine::{GameEngine, Principal, TIMEOUT_BLOCKS};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Demo { scenario, bet } => run_demo(scenario, bet),
    }
}

fn run_demo(scenario: Scenario, bet: u128) -> Result<()> {
    let mut engine = GameEngine::new(Principal::new("xox-contract"));
    let alice = Principal::new("alice");
    let bob = Principal::new("bob");
    engine.fund(&alice, bet * 10);
    engine.fund(&bob, bet * 10);

    info!(?scenario, bet, "Running scripted match");

    let game_id = engine.create_game(&alice, bet, 0, 1)?;

    match scenario {
        Scenario::Win => {
            engine.join_game(&bob, game_id, 3, 2)?;
            engine.play(&alice, game_id, 1, 1)?;
            engine.play(&bob, game_id, 4, 2)?;
            engine.play(&alice, game_id, 2, 1)?;
        }
        Scenario::Draw => {
            engine.join_game(&bob, game_id, 4, 2)?;
            engine.play(&alice, game_id, 2, 1)?;
            engine.play(&bob, game_id, 1, 2)?;
            engine.play(&alice, game_id, 3, 1)?;
            engine.play(&bob, game_id, 5, 2)?;
            engine.play(&alice, game_id, 7, 1)?;
            engine.play(&bob, game_id, 6, 2)?;
            engine.play(&alice, game_id, 8, 1)?;
        }
        Scenario::Timeout => {
            engine.join_game(&bob, game_id, 1, 2)?;
            engine.play(&alice, game_id, 2, 1)?;
            engine.advance_blocks(TIMEOUT_BLOCKS);
            engine.claim_timeout(&bob, game_id)?;
        }
    }

    let game = engine.get_game(game_id).context("game record exists")?;
    println!("{}", game.board().display());
    match game.winner() {
        Some(winner) => println!("\nwinner: {winner}"),
        None => println!("\ndraw - bets refunded"),
    }

    println!("\nplayer stats:");
    println!(
        "{}",
        serde_json::to_string_pretty(&engine.get_all_player_stats())?
    );

    let contract = engine.contract().clone();
    println!("\nbalances:");
    for account in [&alice, &bob, &contract] {
        println!("  {account}: {}", engine.balance_of(account));
    }

    Ok(())
}
