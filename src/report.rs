//! Plain-text summary of a calculation, as printed by the CLI and copied to
//! the clipboard by form front-ends.

use std::fmt;

use rust_decimal::Decimal;

use crate::format::{format_money, format_number, NumberLocale};
use crate::models::{CalculationInput, CalculationResult, PnL};

const PRICE_DECIMALS: u32 = 6;
const PERCENT_DECIMALS: u32 = 3;

/// A calculation result rendered in a number locale.
pub struct Summary<'a> {
    input: &'a CalculationInput,
    result: &'a CalculationResult,
    locale: NumberLocale,
}

impl<'a> Summary<'a> {
    pub fn new(
        input: &'a CalculationInput,
        result: &'a CalculationResult,
        locale: NumberLocale,
    ) -> Self {
        Self { input, result, locale }
    }

    fn money(&self, value: Decimal) -> String {
        format_money(value, self.locale)
    }

    fn price(&self, value: Decimal) -> String {
        format_number(value, PRICE_DECIMALS, self.locale)
    }

    fn percent(&self, value: Decimal) -> String {
        format_number(value, PERCENT_DECIMALS, self.locale)
    }

    /// Target as entered, without padding zeros.
    fn target(&self, value: Decimal) -> String {
        let value = value.normalize();
        format_number(value, value.scale(), self.locale)
    }

    fn pnl_line(&self, f: &mut fmt::Formatter<'_>, label: &str, pnl: &PnL) -> fmt::Result {
        writeln!(
            f,
            "{:<4}→ Gross: {:>12} | Net: {:>12}",
            label,
            self.money(pnl.gross),
            self.money(pnl.net)
        )
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = self.input;
        let result = self.result;
        let unit = input.tp_mode.unit();

        let title = format!(" {} POSITION ", input.direction.as_str().to_uppercase());
        writeln!(f, "{:=^60}", title)?;
        writeln!(f, "Entry:          {}", self.price(input.entry_price))?;
        writeln!(f, "Max Loss:       {}", self.money(input.max_loss))?;
        writeln!(f, "Stop-Loss:      {}%", self.percent(input.stop_loss_percent))?;
        writeln!(f)?;

        writeln!(f, "--- Position ---")?;
        writeln!(f, "Nominal:        {}", self.money(result.nominal_value))?;
        writeln!(f, "Margin:         {}", self.money(result.margin_required))?;
        writeln!(f, "Units:          {}", self.price(result.units))?;
        writeln!(f)?;

        writeln!(f, "--- Levels ---")?;
        writeln!(f, "Stop-Loss:      {}", self.price(result.stop_loss_price))?;
        for (i, (price, target)) in result
            .take_profit_prices
            .iter()
            .zip(input.tp_targets)
            .enumerate()
        {
            let label = format!("TP{} ({}{}):", i + 1, self.target(target), unit);
            writeln!(f, "{:<16}{}", label, self.price(*price))?;
        }
        writeln!(f)?;

        writeln!(f, "--- Fees ---")?;
        writeln!(
            f,
            "Fees: Entry {}% + Exit {}% = {}% (≈ {} + {} = {})",
            self.percent(input.entry_fee_percent),
            self.percent(input.exit_fee_percent),
            self.percent(result.total_fee_percent),
            self.money(result.entry_fee_amount),
            self.money(result.exit_fee_amount),
            self.money(result.total_fee_amount)
        )?;
        writeln!(
            f,
            "Effective Risk: {}%   •   Leverage: {}×",
            self.percent(result.effective_risk_percent),
            input.leverage
        )?;
        writeln!(f)?;

        writeln!(f, "--- P&L ---")?;
        self.pnl_line(f, "SL", &result.pnl_at_stop_loss)?;
        for (i, pnl) in result.pnl_at_take_profit.iter().enumerate() {
            self.pnl_line(f, &format!("TP{}", i + 1), pnl)?;
        }
        writeln!(f, "{:=^60}", "")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TakeProfitMode, TradeDirection};
    use crate::trading::PositionCalculator;
    use rust_decimal_macros::dec;

    fn sample() -> (CalculationInput, CalculationResult) {
        let input = CalculationInput::new(TradeDirection::Long, dec!(50000), dec!(10), dec!(0.5))
            .with_leverage(10)
            .with_fees(dec!(0.02), dec!(0.04));
        let result = PositionCalculator::calculate(&input).unwrap();
        (input, result)
    }

    #[test]
    fn test_german_summary() {
        let (input, result) = sample();
        let text = Summary::new(&input, &result, NumberLocale::German).to_string();

        assert!(text.contains(" LONG POSITION "));
        assert!(text.contains("Nominal:        1.785,71"));
        assert!(text.contains("Margin:         178,57"));
        assert!(text.contains("Stop-Loss:      49.750,000000"));
        assert!(text.contains("TP1 (1R):       50.250,000000"));
        assert!(text.contains("TP3 (3R):       50.750,000000"));
        assert!(text.contains("Fees: Entry 0,020% + Exit 0,040% = 0,060% (≈ 0,36 + 0,71 = 1,07)"));
        assert!(text.contains("Effective Risk: 0,560%   •   Leverage: 10×"));
        assert!(text.contains("Gross:        -8,93 | Net:       -10,00"));
    }

    #[test]
    fn test_us_summary_with_percent_targets() {
        let (input, _) = sample();
        let mut input = input.with_take_profit(TakeProfitMode::Percent, [dec!(1.5), dec!(2), dec!(10)]);
        input.direction = TradeDirection::Short;
        let result = PositionCalculator::calculate(&input).unwrap();
        let text = Summary::new(&input, &result, NumberLocale::Us).to_string();

        assert!(text.contains(" SHORT POSITION "));
        assert!(text.contains("Nominal:        1,785.71"));
        assert!(text.contains("Stop-Loss:      50,250.000000"));
        assert!(text.contains("TP1 (1.5%):     49,250.000000"));
        assert!(text.contains("TP3 (10%):      45,000.000000"));
    }
}
