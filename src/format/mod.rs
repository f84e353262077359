//! Locale-aware number parsing and formatting for user-entered values.

mod locale;
mod number;

pub use locale::NumberLocale;
pub use number::{format_money, format_number, parse_number, MAX_DECIMALS};
