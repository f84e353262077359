//! Position sizing: size a position so that hitting the stop loses exactly
//! the configured amount, fees included.
//!
//! nominal = max_loss / ((stop_loss% + entry_fee% + exit_fee%) / 100)
//!
//! Leverage only changes the margin that has to be posted, never the size.

use rust_decimal::Decimal;

use crate::error::{CalcError, InputField};
use crate::models::{CalculationInput, CalculationResult, PnL, TakeProfitMode, TradeDirection};

pub const MIN_LEVERAGE: u32 = 1;
pub const MAX_LEVERAGE: u32 = 125;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Stateless calculator for position size, price levels and P&L.
pub struct PositionCalculator;

impl PositionCalculator {
    /// Validate `input` and derive the full result.
    ///
    /// Fails with `CalcError::InvalidInput` before any arithmetic runs when a
    /// required quantity is not positive, a fee is negative or leverage is
    /// outside `MIN_LEVERAGE..=MAX_LEVERAGE`.
    pub fn calculate(input: &CalculationInput) -> Result<CalculationResult, CalcError> {
        Self::validate(input)?;

        let entry = input.entry_price;
        let sign = input.direction.sign();

        let total_fee_percent = checked(
            input.entry_fee_percent.checked_add(input.exit_fee_percent),
            "total fee percent",
        )?;
        let effective_risk_percent = checked(
            input.stop_loss_percent.checked_add(total_fee_percent),
            "effective risk",
        )?;

        // max_loss / (effective% / 100), with the division by 100 folded in
        let nominal_value = checked(
            input
                .max_loss
                .checked_mul(HUNDRED)
                .and_then(|scaled| scaled.checked_div(effective_risk_percent)),
            "nominal value",
        )?;
        let margin_required = nominal_value / Decimal::from(input.leverage);
        let units = checked(nominal_value.checked_div(entry), "units")?;

        let stop_fraction = input.stop_loss_percent / HUNDRED;
        let stop_loss_price = checked(
            entry.checked_mul(Decimal::ONE - sign * stop_fraction),
            "stop-loss price",
        )?;
        let stop_loss_distance =
            checked(entry.checked_sub(stop_loss_price), "stop-loss distance")?.abs();

        let mut take_profit_prices = [Decimal::ZERO; 3];
        for (price, target) in take_profit_prices.iter_mut().zip(input.tp_targets) {
            *price = Self::take_profit_price(input, target, stop_loss_distance)?;
        }

        let entry_fee_amount = checked(
            nominal_value.checked_mul(input.entry_fee_percent / HUNDRED),
            "entry fee",
        )?;
        let exit_fee_amount = checked(
            nominal_value.checked_mul(input.exit_fee_percent / HUNDRED),
            "exit fee",
        )?;
        let total_fee_amount = checked(entry_fee_amount.checked_add(exit_fee_amount), "total fees")?;

        let pnl_at = |price: Decimal| {
            Self::pnl_at(input.direction, entry, units, total_fee_amount, price)
        };

        let pnl_at_stop_loss = pnl_at(stop_loss_price)?;
        let mut pnl_at_take_profit = [PnL {
            gross: Decimal::ZERO,
            net: Decimal::ZERO,
        }; 3];
        for (pnl, price) in pnl_at_take_profit.iter_mut().zip(take_profit_prices) {
            *pnl = pnl_at(price)?;
        }

        Ok(CalculationResult {
            nominal_value,
            margin_required,
            units,
            stop_loss_price,
            stop_loss_distance,
            take_profit_prices,
            total_fee_percent,
            effective_risk_percent,
            entry_fee_amount,
            exit_fee_amount,
            total_fee_amount,
            pnl_at_stop_loss,
            pnl_at_take_profit,
        })
    }

    fn validate(input: &CalculationInput) -> Result<(), CalcError> {
        let positive = [
            (InputField::EntryPrice, input.entry_price),
            (InputField::StopLossPercent, input.stop_loss_percent),
            (InputField::MaxLoss, input.max_loss),
        ];
        for (field, value) in positive {
            if value <= Decimal::ZERO {
                return Err(CalcError::not_positive(field, value));
            }
        }

        if !(MIN_LEVERAGE..=MAX_LEVERAGE).contains(&input.leverage) {
            return Err(CalcError::InvalidInput {
                field: InputField::Leverage,
                reason: format!(
                    "must be between {MIN_LEVERAGE} and {MAX_LEVERAGE} (got {})",
                    input.leverage
                ),
            });
        }

        let fees = [
            (InputField::EntryFeePercent, input.entry_fee_percent),
            (InputField::ExitFeePercent, input.exit_fee_percent),
        ];
        for (field, value) in fees {
            if value < Decimal::ZERO {
                return Err(CalcError::negative(field, value));
            }
        }

        Ok(())
    }

    fn take_profit_price(
        input: &CalculationInput,
        target: Decimal,
        stop_loss_distance: Decimal,
    ) -> Result<Decimal, CalcError> {
        let sign = input.direction.sign();
        let price = match input.tp_mode {
            TakeProfitMode::RMultiple => target
                .checked_mul(stop_loss_distance)
                .and_then(|offset| input.entry_price.checked_add(sign * offset)),
            TakeProfitMode::Percent => (target / HUNDRED)
                .checked_mul(sign)
                .and_then(|fraction| Decimal::ONE.checked_add(fraction))
                .and_then(|factor| input.entry_price.checked_mul(factor)),
        };
        checked(price, "take-profit price")
    }

    /// Gross and net P&L when closing `units` at `price`.
    fn pnl_at(
        direction: TradeDirection,
        entry: Decimal,
        units: Decimal,
        total_fees: Decimal,
        price: Decimal,
    ) -> Result<PnL, CalcError> {
        let favourable_move = checked(
            price
                .checked_sub(entry)
                .and_then(|moved| moved.checked_mul(direction.sign())),
            "P&L",
        )?;
        let gross = checked(favourable_move.checked_mul(units), "P&L")?;
        let net = checked(gross.checked_sub(total_fees), "P&L")?;
        Ok(PnL { gross, net })
    }
}

fn checked(value: Option<Decimal>, quantity: &'static str) -> Result<Decimal, CalcError> {
    value.ok_or(CalcError::Overflow(quantity))
}
