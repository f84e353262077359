//! Number display conventions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Separator convention used for displaying and entering numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberLocale {
    /// `1.234.567,89`
    #[default]
    German,
    /// `1,234,567.89`
    Us,
}

impl NumberLocale {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberLocale::German => "german",
            NumberLocale::Us => "us",
        }
    }

    pub fn thousands_separator(&self) -> char {
        match self {
            NumberLocale::German => '.',
            NumberLocale::Us => ',',
        }
    }

    pub fn decimal_separator(&self) -> char {
        match self {
            NumberLocale::German => ',',
            NumberLocale::Us => '.',
        }
    }
}

impl fmt::Display for NumberLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumberLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "german" | "de" | "deutsch" => Ok(Self::German),
            "us" | "en" | "english" => Ok(Self::Us),
            other => Err(format!("unknown number format '{other}' (expected german or us)")),
        }
    }
}
