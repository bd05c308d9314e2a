use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use gift_hunt_core::{AssetRef, TargetDefinition, DEFAULT_MAX_ATTEMPTS};
use gift_hunt_session::SessionConfig;
use gift_hunt_system_classifier::NamingContract;
use gift_hunt_system_outcome::{OutcomeMedia, PresentationTiming};
use gift_hunt_system_selector::default_catalog;
use serde::Deserialize;

/// Game configuration loaded from a TOML file.
///
/// Every field falls back to the shipped room's values when omitted.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    /// Retries granted after the first miss.
    pub(crate) max_attempts: u32,
    /// Seed for the letter draw; entropy is used when absent.
    pub(crate) seed: Option<u64>,
    /// Letters the target is drawn from.
    pub(crate) catalog: Vec<TargetDefinition>,
    /// Outcome presentation delays.
    pub(crate) timing: TimingConfig,
    /// Overlay and outcome media.
    pub(crate) assets: AssetsConfig,
    /// Object names with special meaning in the room model.
    pub(crate) naming: NamingContract,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
            catalog: default_catalog(),
            timing: TimingConfig::default(),
            assets: AssetsConfig::default(),
            naming: NamingContract::default(),
        }
    }
}

/// Presentation delays, in milliseconds.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct TimingConfig {
    pub(crate) reveal_delay_ms: u64,
    pub(crate) won_hold_ms: u64,
    pub(crate) retry_hold_ms: u64,
    pub(crate) final_hold_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        let timing = PresentationTiming::default();
        Self {
            reveal_delay_ms: millis(timing.reveal_delay),
            won_hold_ms: millis(timing.won_hold),
            retry_hold_ms: millis(timing.retry_hold),
            final_hold_ms: millis(timing.final_hold),
        }
    }
}

impl TimingConfig {
    fn to_timing(self) -> PresentationTiming {
        PresentationTiming {
            reveal_delay: Duration::from_millis(self.reveal_delay_ms),
            won_hold: Duration::from_millis(self.won_hold_ms),
            retry_hold: Duration::from_millis(self.retry_hold_ms),
            final_hold: Duration::from_millis(self.final_hold_ms),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Images shown by the overlay and the outcome presenter.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AssetsConfig {
    /// Prompt asking the player to confirm a placement.
    pub(crate) prompt: AssetRef,
    /// Media shown on a win.
    pub(crate) success: AssetRef,
    /// Media shown on a miss.
    pub(crate) failure: AssetRef,
    /// Intrinsic size of modal images in pixels.
    pub(crate) modal_size: (f32, f32),
}

impl Default for AssetsConfig {
    fn default() -> Self {
        let media = OutcomeMedia::default();
        Self {
            prompt: SessionConfig::default().prompt,
            success: media.success,
            failure: media.failure,
            modal_size: (600.0, 600.0),
        }
    }
}

impl GameConfig {
    /// Reads and parses the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&source).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parses a configuration document.
    pub(crate) fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).context("failed to parse TOML")
    }

    /// Session settings derived from the configuration.
    #[must_use]
    pub(crate) fn session_config(&self) -> SessionConfig {
        SessionConfig {
            max_attempts: self.max_attempts,
            catalog: self.catalog.clone(),
            naming: self.naming.clone(),
            timing: self.timing.to_timing(),
            media: OutcomeMedia {
                success: self.assets.success.clone(),
                failure: self.assets.failure.clone(),
            },
            prompt: self.assets.prompt.clone(),
            ..SessionConfig::default()
        }
    }
}
