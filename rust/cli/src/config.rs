//! Layered CLI configuration.
//!
//! Values resolve in order: built-in defaults, then the TOML file named by
//! `LINE98_CONFIG`, then the `LINE98_*` environment variables. Command-line
//! flags override the result at the call site. Every value remembers where
//! it came from so `line98 cfg` can show it.

use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "LINE98_CONFIG";
pub const SEED_ENV: &str = "LINE98_SEED";
pub const ADVISOR_ENV: &str = "LINE98_ADVISOR";
pub const MAX_MOVES_ENV: &str = "LINE98_MAX_MOVES";
pub const LOG_ENV: &str = "LINE98_LOG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Base seed for `new`, `play` and `sim`; random when unset.
    pub seed: Option<u64>,
    /// Advisor name passed to `line98_ai::create_advisor`.
    pub advisor: String,
    /// Move cap per simulated game.
    pub max_moves: u32,
    /// `tracing` filter directive for diagnostics on stderr; `RUST_LOG` wins when set.
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            advisor: "greedy".into(),
            max_moves: 500,
            log: "warn".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub advisor: ValueSource,
    pub max_moves: ValueSource,
    pub log: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            advisor: ValueSource::Default,
            max_moves: ValueSource::Default,
            log: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.advisor {
            cfg.advisor = v;
            sources.advisor = ValueSource::File;
        }
        if let Some(v) = f.max_moves {
            cfg.max_moves = v;
            sources.max_moves = ValueSource::File;
        }
        if let Some(v) = f.log {
            cfg.log = v;
            sources.log = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", SEED_ENV, seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(advisor) = std::env::var(ADVISOR_ENV)
        && !advisor.is_empty()
    {
        cfg.advisor = advisor;
        sources.advisor = ValueSource::Env;
    }
    if let Ok(max) = std::env::var(MAX_MOVES_ENV)
        && !max.is_empty()
    {
        cfg.max_moves = max.parse().map_err(|_| {
            ConfigError::Invalid(format!("Invalid {}: {}", MAX_MOVES_ENV, max))
        })?;
        sources.max_moves = ValueSource::Env;
    }
    if let Ok(log) = std::env::var(LOG_ENV)
        && !log.is_empty()
    {
        cfg.log = log;
        sources.log = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    advisor: Option<String>,
    #[serde(default)]
    max_moves: Option<u32>,
    #[serde(default)]
    log: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Err(e) = line98_ai::create_advisor(&cfg.advisor) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: {}",
            e
        )));
    }
    if cfg.max_moves == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: max_moves must be >0".into(),
        ));
    }
    if cfg.log.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: log filter must not be empty".into(),
        ));
    }
    Ok(())
}
