//! Trade direction, fee tier and take-profit mode.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Direction of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    Long,
    Short,
}

impl TradeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeDirection::Long => "long",
            TradeDirection::Short => "short",
        }
    }

    /// `+1` for long, `-1` for short. Favourable price moves carry this sign.
    pub fn sign(&self) -> Decimal {
        match self {
            TradeDirection::Long => Decimal::ONE,
            TradeDirection::Short => Decimal::NEGATIVE_ONE,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            TradeDirection::Long => TradeDirection::Short,
            TradeDirection::Short => TradeDirection::Long,
        }
    }
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "long" | "buy" => Ok(Self::Long),
            "short" | "sell" => Ok(Self::Short),
            other => Err(format!("unknown direction '{other}' (expected long or short)")),
        }
    }
}

/// Fee tier of one leg: makers add liquidity, takers remove it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeSide {
    Maker,
    #[default]
    Taker,
}

impl FeeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeSide::Maker => "maker",
            FeeSide::Taker => "taker",
        }
    }
}

impl fmt::Display for FeeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeeSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "maker" => Ok(Self::Maker),
            "taker" => Ok(Self::Taker),
            other => Err(format!("unknown fee side '{other}' (expected maker or taker)")),
        }
    }
}

/// How take-profit targets are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TakeProfitMode {
    /// Multiples of the stop-loss distance
    #[default]
    RMultiple,
    /// Percentage move from the entry price
    Percent,
}

impl TakeProfitMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TakeProfitMode::RMultiple => "r-multiple",
            TakeProfitMode::Percent => "percent",
        }
    }

    /// Targets used when the caller does not supply any.
    pub fn default_targets(&self) -> [Decimal; 3] {
        match self {
            TakeProfitMode::RMultiple => [dec!(1), dec!(2), dec!(3)],
            TakeProfitMode::Percent => [dec!(1.00), dec!(2.00), dec!(3.00)],
        }
    }

    /// Unit suffix for displaying a target.
    pub fn unit(&self) -> &'static str {
        match self {
            TakeProfitMode::RMultiple => "R",
            TakeProfitMode::Percent => "%",
        }
    }
}

impl fmt::Display for TakeProfitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TakeProfitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "r" | "r-multiple" | "rmultiple" | "r_multiple" => Ok(Self::RMultiple),
            "percent" | "pct" | "%" | "prozent" => Ok(Self::Percent),
            other => Err(format!(
                "unknown take-profit mode '{other}' (expected r-multiple or percent)"
            )),
        }
    }
}
