//! Process exit codes returned by [`crate::run`].

pub const SUCCESS: i32 = 0;

/// Any failure: bad arguments, invalid config, unreadable input.
pub const ERROR: i32 = 2;

/// The command stopped early (`CliError::Interrupted`).
pub const INTERRUPTED: i32 = 130;
