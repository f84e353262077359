//! Data models for calculation inputs and results.

mod input;
mod result;
mod trade;

pub use input::CalculationInput;
pub use result::{CalculationResult, PnL};
pub use trade::{FeeSide, TakeProfitMode, TradeDirection};
