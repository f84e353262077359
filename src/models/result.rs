//! Output of a position calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Profit or loss when the position is closed at a given price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnL {
    /// Price difference times units
    pub gross: Decimal,

    /// Gross minus entry and exit fees
    pub net: Decimal,
}

/// Derived position size, price levels, fees and P&L.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Notional exposure (price × units)
    pub nominal_value: Decimal,

    /// Capital committed at the chosen leverage
    pub margin_required: Decimal,

    pub units: Decimal,

    pub stop_loss_price: Decimal,

    /// Absolute price distance between entry and stop (1R)
    pub stop_loss_distance: Decimal,

    pub take_profit_prices: [Decimal; 3],

    pub total_fee_percent: Decimal,

    /// Stop-loss percentage plus round-trip fee percentage
    pub effective_risk_percent: Decimal,

    pub entry_fee_amount: Decimal,
    pub exit_fee_amount: Decimal,
    pub total_fee_amount: Decimal,

    pub pnl_at_stop_loss: PnL,
    pub pnl_at_take_profit: [PnL; 3],
}
