//! `line98 cfg`: print the resolved configuration as JSON.
//!
//! ```json
//! {
//!   "seed": { "value": null, "source": "default" },
//!   "advisor": { "value": "greedy", "source": "env" },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(e.into());
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": { "value": config.seed, "source": sources.seed },
        "advisor": { "value": config.advisor, "source": sources.advisor },
        "max_moves": { "value": config.max_moves, "source": sources.max_moves },
        "log": { "value": config.log, "source": sources.log },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
