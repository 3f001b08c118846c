//! # Line98 CLI Library
//!
//! Command-line driver for the Line98 rules engine: start and play games on
//! the terminal, ask the advisor for hints on arbitrary boards, autoplay
//! batches of games into JSONL logs, and summarize those logs.
//!
//! The entry point is [`run`], which takes the argument list and the two
//! output streams so the whole CLI can be driven from tests.
//!
//! ```no_run
//! use std::io;
//! let args = ["line98", "sim", "--games", "10", "--seed", "1", "--output", "runs/sim.jsonl"];
//! let code = line98_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Subcommands
//!
//! - `new`: start a game and print it
//! - `play`: interactive game on stdin/stdout
//! - `hint`: best move for a board string
//! - `sim`: autoplay N games following the advisor
//! - `stats`: aggregate simulation logs (`.jsonl`, `.jsonl.zst`, or a directory)
//! - `cfg`: resolved configuration with value sources
//! - `rng`: seed sample

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod ui;
pub mod validation;

use cli::{Commands, Line98Cli};
use commands::{
    handle_cfg_command, handle_hint_command, handle_new_command, handle_play_command,
    handle_rng_command, handle_sim_command, handle_stats_command,
};

pub use error::{BatchValidationError, CliError};

const COMMANDS: &[&str] = &["new", "play", "hint", "sim", "stats", "cfg", "rng"];

/// Parses `args` and runs the selected command.
///
/// Returns the process exit code: `0` on success, `2` on any error, `130`
/// when a command was interrupted.
///
/// ```
/// use std::io;
/// let code = line98_cli::run(["line98", "rng", "--seed", "42"], &mut io::sink(), &mut io::sink());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match Line98Cli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let result = dispatch(cli.cmd, out, err);

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

/// Runs one command. Flags win over config values; config is only loaded
/// by the commands that use it, so `stats` and `rng` work with a broken one.
fn dispatch(cmd: Commands, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    match cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Rng { seed } => handle_rng_command(seed, out),
        Commands::Stats { input } => handle_stats_command(&input, out, err),
        Commands::New { seed } => {
            let cfg = config::load()?;
            handle_new_command(seed.or(cfg.seed), out)
        }
        Commands::Play { seed } => {
            let cfg = config::load()?;
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(seed.or(cfg.seed), &cfg.advisor, out, err, &mut stdin_lock)
        }
        Commands::Hint { board, next, all } => {
            let cfg = config::load()?;
            handle_hint_command(&board, &next, all, &cfg.advisor, out)
        }
        Commands::Sim {
            games,
            seed,
            output,
            max_moves,
        } => {
            let cfg = config::load()?;
            handle_sim_command(
                games,
                seed.or(cfg.seed),
                output,
                max_moves.unwrap_or(cfg.max_moves),
                &cfg.advisor,
                out,
                err,
            )
        }
    }
}

/// Help and version go to `out` with success; anything else prints the
/// clap message and a command list to `err`.
fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    if matches!(
        e.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    ) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err, "\nLine98 CLI\nUsage: line98 <command> [options]\n\nCommands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: line98 --help");
    exit_code::ERROR
}
