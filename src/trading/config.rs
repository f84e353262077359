//! Fee schedule and persisted calculator settings.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::calculator::{MAX_LEVERAGE, MIN_LEVERAGE};
use crate::format::NumberLocale;
use crate::models::FeeSide;

/// Maker and taker fee percentages (0.042 means 0.042 %).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeeSchedule {
    #[serde(with = "rust_decimal::serde::float")]
    pub maker_fee_percent: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub taker_fee_percent: Decimal,
}

impl FeeSchedule {
    pub fn fee_for(&self, side: FeeSide) -> Decimal {
        match side {
            FeeSide::Maker => self.maker_fee_percent,
            FeeSide::Taker => self.taker_fee_percent,
        }
    }

    /// Entry and exit fee percentages for independently chosen sides.
    pub fn resolve(&self, entry: FeeSide, exit: FeeSide) -> (Decimal, Decimal) {
        (self.fee_for(entry), self.fee_for(exit))
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            maker_fee_percent: dec!(0.014),
            taker_fee_percent: dec!(0.042),
        }
    }
}

/// UI language preference. Stored for the presentation layer only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    German,
    English,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::German => "german",
            Language::English => "english",
        })
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "german" | "de" | "deutsch" => Ok(Self::German),
            "english" | "en" => Ok(Self::English),
            other => Err(format!("unknown language '{other}' (expected german or english)")),
        }
    }
}

/// Persisted calculator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(flatten)]
    pub fees: FeeSchedule,

    pub number_format: NumberLocale,

    pub language: Language,

    /// Last leverage chosen on the form
    pub leverage: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fees: FeeSchedule::default(),
            number_format: NumberLocale::German,
            language: Language::German,
            leverage: MIN_LEVERAGE,
        }
    }
}

impl Settings {
    /// `<config dir>/positionsrechner/settings.json`, or `./settings.json`
    /// when the platform has no config directory.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("positionsrechner").join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("settings.json"))
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable as settings JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "No settings file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        let mut settings = match serde_json::from_str::<Settings>(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Malformed settings file, using defaults");
                return Ok(Self::default());
            }
        };

        settings.sanitize();
        debug!(path = %path.display(), ?settings, "Loaded settings");
        Ok(settings)
    }

    /// Write settings as pretty JSON, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

        info!(path = %path.display(), "Saved settings");
        Ok(())
    }

    /// Clamp persisted values that a form could not have produced.
    fn sanitize(&mut self) {
        let clamped = self.leverage.clamp(MIN_LEVERAGE, MAX_LEVERAGE);
        if clamped != self.leverage {
            warn!(leverage = self.leverage, clamped, "Stored leverage out of range");
            self.leverage = clamped;
        }

        for fee in [&mut self.fees.maker_fee_percent, &mut self.fees.taker_fee_percent] {
            if fee.is_sign_negative() && !fee.is_zero() {
                warn!(fee = %fee, "Negative stored fee reset to 0");
                *fee = Decimal::ZERO;
            }
        }
    }
}
