//! Engine configuration
//!
//! Loaded from JSON (every field optional) and then overridden from the
//! environment:
//!
//! - `DROPLET_TICK_MS`: movement interval in milliseconds (default: 200)
//! - `DROPLET_CLEANUP_MS`: dispense cleanup interval (default: 500)
//! - `DROPLET_BAUD`: transport baud rate (default: 115200)
//! - `DROPLET_SEED`: piece RNG seed (default: 1)
//! - `DROPLET_FRAME_OUT`: file or device that receives raw frames

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::board::Timing;
use crate::types::{
    Reservoir, DEFAULT_BAUD_RATE, DEFAULT_CLEANUP_MS, DEFAULT_RESERVOIRS, DEFAULT_TICK_MS,
    RECOGNIZED_BAUD_RATES, RECOGNIZED_TICK_MS,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tick_ms: u64,
    pub cleanup_ms: u64,
    pub baud_rate: u32,
    pub seed: u32,
    /// Reservoirs available on init, in priority order
    pub reservoirs: Vec<Reservoir>,
    pub frame_out: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            cleanup_ms: DEFAULT_CLEANUP_MS,
            baud_rate: DEFAULT_BAUD_RATE,
            seed: 1,
            reservoirs: DEFAULT_RESERVOIRS.to_vec(),
            frame_out: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid engine config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("loading config {}", path.display()))
    }

    /// Defaults overridden from `DROPLET_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply `DROPLET_*` overrides on top of `self`.
    ///
    /// Unparseable values are ignored with a warning, like a missing variable.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        use std::env;

        fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
            let raw = env::var(name).ok()?;
            match raw.trim().parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    log::warn!("ignoring {}={:?}: not a number", name, raw);
                    None
                }
            }
        }

        if let Some(v) = parsed("DROPLET_TICK_MS") {
            self.tick_ms = v;
        }
        if let Some(v) = parsed("DROPLET_CLEANUP_MS") {
            self.cleanup_ms = v;
        }
        if let Some(v) = parsed("DROPLET_BAUD") {
            self.baud_rate = v;
        }
        if let Some(v) = parsed("DROPLET_SEED") {
            self.seed = v;
        }
        if let Some(path) = env::var("DROPLET_FRAME_OUT")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        {
            self.frame_out = Some(PathBuf::from(path));
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject values the engine cannot run with; warn on unusual ones
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            bail!("tick_ms must be positive");
        }
        if self.baud_rate == 0 {
            bail!("baud_rate must be positive");
        }
        if !RECOGNIZED_TICK_MS.contains(&self.tick_ms) {
            log::warn!(
                "tick_ms {} is outside the usual {}..={} ms range",
                self.tick_ms,
                RECOGNIZED_TICK_MS.start(),
                RECOGNIZED_TICK_MS.end()
            );
        }
        if !RECOGNIZED_BAUD_RATES.contains(&self.baud_rate) {
            log::info!("using non-standard baud rate {}", self.baud_rate);
        }
        Ok(())
    }

    pub fn timing(&self) -> Timing {
        Timing::from_millis(self.tick_ms, self.cleanup_ms)
    }
}
