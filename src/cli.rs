//! Command-line interface for the demo binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Wager-backed tic-tac-toe settlement engine demo.
#[derive(Debug, Parser)]
#[command(name = "xox-engine", version, about)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a scripted match through the engine and print the
    /// settlement.
    Demo {
        /// Which scripted match to run.
        #[arg(long, value_enum, default_value_t = Scenario::Win)]
        scenario: Scenario,

        /// Bet escrowed by each player, in micro-STX.
        #[arg(long, default_value_t = 100)]
        bet: u128,
    },
}

/// Scripted match outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Player one wins the top row.
    Win,
    /// The board fills with no line complete; bets are refunded.
    Draw,
    /// Player two stalls the game out and claims the pot.
    Timeout,
}
