use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::match_core::MAX_CASCADE_PASSES;
use tilematch_engine::DEFAULT_HISTORY_LIMIT;

pub const DEFAULT_ROUND_SECS: u32 = 60;
pub const DEFAULT_CASCADE_DELAY: Duration = Duration::from_millis(300);

/// How a swap's cascade is driven once the swap is accepted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CascadeMode {
    /// Every pass runs inside the `select` call.
    Immediate,
    /// The first pass runs inside `select`; later passes wait for
    /// `advance_cascade`, which hosts call after `cascade_delay`.
    #[default]
    Stepped,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_round_secs")]
    pub round_secs: u32,
    #[serde(default = "default_cascade_delay_ms")]
    pub cascade_delay_ms: u64,
    #[serde(default)]
    pub cascade_mode: CascadeMode,
    #[serde(default = "default_max_cascade_passes")]
    pub max_cascade_passes: u32,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            round_secs: default_round_secs(),
            cascade_delay_ms: default_cascade_delay_ms(),
            cascade_mode: CascadeMode::default(),
            max_cascade_passes: default_max_cascade_passes(),
            seed: None,
            history_limit: default_history_limit(),
        }
    }
}

impl GameSettings {
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        self.round_secs = self.round_secs.max(1);
        self.max_cascade_passes = self.max_cascade_passes.max(1);
        self.history_limit = self.history_limit.max(1);
        self
    }

    pub fn cascade_delay(&self) -> Duration {
        Duration::from_millis(self.cascade_delay_ms)
    }

    pub fn immediate(mut self) -> Self {
        self.cascade_mode = CascadeMode::Immediate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn default_version() -> u32 {
    1
}

fn default_round_secs() -> u32 {
    DEFAULT_ROUND_SECS
}

fn default_cascade_delay_ms() -> u64 {
    DEFAULT_CASCADE_DELAY.as_millis() as u64
}

fn default_max_cascade_passes() -> u32 {
    MAX_CASCADE_PASSES
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var_os(key).map(PathBuf::from))
    }

    fn resolve<F>(mut get_env: F) -> Self
    where
        F: FnMut(&str) -> Option<PathBuf>,
    {
        if let Some(explicit) = get_env("TILEMATCH_SETTINGS_PATH") {
            return Self::at(explicit);
        }

        let base = get_env("XDG_CONFIG_HOME")
            .or_else(|| get_env("HOME").map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));

        Self::at(base.join("tilematch").join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> GameSettings {
        let Ok(bytes) = fs::read(&self.path) else {
            return GameSettings::default();
        };
        match serde_json::from_slice::<GameSettings>(&bytes) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                warn!(
                    "ignoring malformed settings at {}: {err}",
                    self.path.display()
                );
                GameSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &GameSettings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}
