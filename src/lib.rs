//! Position sizing and risk/reward calculator.
//!
//! Sizes a position so that a stop-loss hit, including round-trip fees,
//! costs exactly the accepted loss, and derives margin, take-profit levels and
//! P&L from it. Number parsing and formatting handle German and US separators.

pub mod error;
pub mod format;
pub mod models;
pub mod report;
pub mod trading;

pub use error::{CalcError, InputField, ParseError};
pub use format::{format_money, format_number, parse_number, NumberLocale};
pub use models::{CalculationInput, CalculationResult, FeeSide, PnL, TakeProfitMode, TradeDirection};
pub use report::Summary;
pub use trading::{FeeSchedule, Language, PositionCalculator, Settings, MAX_LEVERAGE, MIN_LEVERAGE};
