use line98_ai::create_advisor;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use std::time::Duration;
use thiserror::Error;

/// Service settings that can be changed while sessions are live
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppSettings {
    /// Advisor used for hints (see `line98_ai::create_advisor`)
    pub advisor: String,
    /// Idle minutes before a session expires
    pub session_timeout_minutes: u64,
    /// Seed mixed into the advisor's simulated spawns
    pub hint_seed: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            advisor: "greedy".to_string(),
            session_timeout_minutes: 30,
            hint_seed: 0,
        }
    }
}

impl AppSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.advisor.is_empty() {
            return Err(SettingsError::InvalidValue(
                "advisor cannot be empty".to_string(),
            ));
        }
        create_advisor(&self.advisor)
            .map_err(|err| SettingsError::InvalidValue(err.to_string()))?;

        if self.session_timeout_minutes == 0 {
            return Err(SettingsError::InvalidValue(
                "session_timeout_minutes must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_timeout_minutes.saturating_mul(60))
    }
}

/// In-memory settings store with validation
#[derive(Debug, Default)]
pub struct SettingsStore {
    settings: RwLock<AppSettings>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: AppSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            settings: RwLock::new(settings),
        })
    }

    pub fn get(&self) -> Result<AppSettings, SettingsError> {
        self.settings
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| SettingsError::StoragePoisoned)
    }

    /// Replace all settings; nothing changes when validation fails.
    pub fn update(&self, new_settings: AppSettings) -> Result<AppSettings, SettingsError> {
        new_settings.validate()?;

        let mut guard = self
            .settings
            .write()
            .map_err(|_| SettingsError::StoragePoisoned)?;
        *guard = new_settings.clone();
        Ok(new_settings)
    }

    pub fn update_field(
        &self,
        field: &str,
        value: serde_json::Value,
    ) -> Result<AppSettings, SettingsError> {
        let mut current = self.get()?;

        match field {
            "advisor" => {
                let name = value.as_str().ok_or_else(|| {
                    SettingsError::InvalidValue("advisor must be a string".to_string())
                })?;
                current.advisor = name.to_string();
            }
            "session_timeout_minutes" => {
                current.session_timeout_minutes = value.as_u64().ok_or_else(|| {
                    SettingsError::InvalidValue(
                        "session_timeout_minutes must be a number".to_string(),
                    )
                })?;
            }
            "hint_seed" => {
                current.hint_seed = value.as_u64().ok_or_else(|| {
                    SettingsError::InvalidValue("hint_seed must be a number".to_string())
                })?;
            }
            _ => {
                return Err(SettingsError::InvalidValue(format!(
                    "unknown field: {}",
                    field
                )))
            }
        }

        self.update(current)
    }

    pub fn reset(&self) -> Result<AppSettings, SettingsError> {
        self.update(AppSettings::default())
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
    #[error("Settings storage poisoned")]
    StoragePoisoned,
}
