//! Parameters of a single position calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{TakeProfitMode, TradeDirection};

/// Everything the calculator needs, with fees already resolved to percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub direction: TradeDirection,

    /// Entry price per unit (> 0)
    pub entry_price: Decimal,

    /// Money lost when the stop is hit, fees included (> 0)
    pub max_loss: Decimal,

    /// Distance from entry to stop as a percentage of entry (> 0)
    pub stop_loss_percent: Decimal,

    /// 1..=125
    pub leverage: u32,

    pub entry_fee_percent: Decimal,
    pub exit_fee_percent: Decimal,

    pub tp_mode: TakeProfitMode,

    /// R-multiples or percentages depending on `tp_mode`
    pub tp_targets: [Decimal; 3],
}

impl CalculationInput {
    /// Input without fees, leverage 1 and the default targets of `tp_mode`.
    pub fn new(
        direction: TradeDirection,
        entry_price: Decimal,
        max_loss: Decimal,
        stop_loss_percent: Decimal,
    ) -> Self {
        let tp_mode = TakeProfitMode::default();
        Self {
            direction,
            entry_price,
            max_loss,
            stop_loss_percent,
            leverage: 1,
            entry_fee_percent: Decimal::ZERO,
            exit_fee_percent: Decimal::ZERO,
            tp_mode,
            tp_targets: tp_mode.default_targets(),
        }
    }

    pub fn with_leverage(mut self, leverage: u32) -> Self {
        self.leverage = leverage;
        self
    }

    pub fn with_fees(mut self, entry_fee_percent: Decimal, exit_fee_percent: Decimal) -> Self {
        self.entry_fee_percent = entry_fee_percent;
        self.exit_fee_percent = exit_fee_percent;
        self
    }

    pub fn with_take_profit(mut self, mode: TakeProfitMode, targets: [Decimal; 3]) -> Self {
        self.tp_mode = mode;
        self.tp_targets = targets;
        self
    }

    /// Combined entry and exit fee percentage.
    pub fn total_fee_percent(&self) -> Decimal {
        self.entry_fee_percent + self.exit_fee_percent
    }
}
