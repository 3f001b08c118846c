//! `line98 rng`: show what a seed produces.
//!
//! Prints raw ChaCha20 output and the colors a [`Spawner`] with the same
//! seed draws first, which is enough to confirm two machines agree on a seed.

use crate::error::CliError;
use line98_engine::spawner::Spawner;
use rand::{RngCore, SeedableRng};
use std::io::Write;

pub fn handle_rng_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let s = seed.unwrap_or_else(rand::random);
    let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(s);
    let vals: Vec<u64> = (0..5).map(|_| rng.next_u64()).collect();

    let mut spawner = Spawner::new_with_seed(s);
    let colors: String = spawner
        .random_colors(9)
        .into_iter()
        .map(|c| c.symbol())
        .collect();

    writeln!(out, "Seed: {}", s)?;
    writeln!(out, "RNG sample: {:?}", vals)?;
    writeln!(out, "Colors: {}", colors)?;
    Ok(())
}
