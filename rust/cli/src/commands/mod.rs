//! Command handlers. Each takes its parsed arguments plus output streams and
//! returns `Result<(), CliError>`; `crate::run` maps the result to an exit code.

pub mod cfg;
pub mod hint;
pub mod new;
pub mod play;
pub mod rng;
pub mod sim;
pub mod stats;

pub use cfg::handle_cfg_command;
pub use hint::handle_hint_command;
pub use new::handle_new_command;
pub use play::handle_play_command;
pub use rng::handle_rng_command;
pub use sim::handle_sim_command;
pub use stats::handle_stats_command;
