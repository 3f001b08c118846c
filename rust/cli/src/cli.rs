//! Command-line grammar for `line98`.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "line98",
    version,
    about = "Line98 ball puzzle: play, simulate and inspect games"
)]
pub struct Line98Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a game and print its board, spawn queue and board string
    New {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play interactively: `r,c r,c` or `from to` moves, `hint`, `quit`
    Play {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Suggest a move for a board given as an 81-character string
    Hint {
        /// One symbol per cell, row-major: `-` or a color letter
        #[arg(long, allow_hyphen_values = true)]
        board: String,
        /// The three queued colors, e.g. `RGB`
        #[arg(long)]
        next: String,
        /// Print every candidate, not just the best one
        #[arg(long)]
        all: bool,
    },
    /// Autoplay games by following the advisor and log them as JSONL
    Sim {
        #[arg(long)]
        games: u64,
        /// Base seed; game `i` uses `seed + i`
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        output: Option<String>,
        #[arg(long)]
        max_moves: Option<u32>,
    },
    /// Aggregate scores from simulation logs (file or directory, `.zst` ok)
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// Print a ChaCha20 sample for a seed
    Rng {
        #[arg(long)]
        seed: Option<u64>,
    },
}
