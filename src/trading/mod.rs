//! Trading logic: fee-aware position sizing and calculator settings.

mod calculator;
mod config;

pub use calculator::{PositionCalculator, MAX_LEVERAGE, MIN_LEVERAGE};
pub use config::{FeeSchedule, Language, Settings};
