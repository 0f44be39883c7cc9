//! Currency settings and price formatting.
//!
//! WooCommerce exposes the shop currency as general settings (symbol,
//! position, separators, decimal places). Prices are formatted for display
//! with a pure function over those settings, so the same rules apply to the
//! cart, the catalog, and order history.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Placement of the currency symbol relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyPosition {
    /// `$1,234.50`
    #[default]
    Left,
    /// `1,234.50$`
    Right,
    /// `$ 1,234.50`
    LeftSpace,
    /// `1,234.50 $`
    RightSpace,
}

impl CurrencyPosition {
    /// Parse the WooCommerce `currency_pos` setting value.
    ///
    /// Unknown values fall back to [`CurrencyPosition::Left`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "right" => Self::Right,
            "left_space" => Self::LeftSpace,
            "right_space" => Self::RightSpace,
            _ => Self::Left,
        }
    }
}

/// Shop currency settings, as configured in WooCommerce general settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySettings {
    /// ISO 4217 currency code (e.g., "USD").
    pub code: String,
    /// Display symbol, already decoded from HTML entities (e.g., "৳").
    pub symbol: String,
    /// Symbol placement relative to the amount.
    pub position: CurrencyPosition,
    /// Separator between digit groups in the integer part.
    pub thousand_separator: String,
    /// Separator between the integer and fractional parts.
    pub decimal_separator: String,
    /// Number of fractional digits to display.
    pub decimals: u32,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            code: "USD".to_string(),
            symbol: "$".to_string(),
            position: CurrencyPosition::Left,
            thousand_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            decimals: 2,
        }
    }
}

impl CurrencySettings {
    /// Format an amount for display using these settings.
    ///
    /// Negative amounts carry a leading `-` outside the positioned symbol,
    /// matching how the storefront rendered them historically.
    ///
    /// ```rust
    /// # use dgency_core::CurrencySettings;
    /// # use rust_decimal::Decimal;
    /// let usd = CurrencySettings::default();
    /// assert_eq!(usd.format(Decimal::new(123_450, 2)), "$1,234.50");
    /// assert_eq!(usd.format(Decimal::new(-500, 2)), "-$5.00");
    /// ```
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        let negative = amount.is_sign_negative() && !amount.is_zero();
        let numeric = self.format_number(amount.abs());

        let symbol = if self.symbol.is_empty() {
            self.code.as_str()
        } else {
            self.symbol.as_str()
        };

        let formatted = match self.position {
            CurrencyPosition::Left => format!("{symbol}{numeric}"),
            CurrencyPosition::Right => format!("{numeric}{symbol}"),
            CurrencyPosition::LeftSpace => format!("{symbol} {numeric}"),
            CurrencyPosition::RightSpace => format!("{numeric} {symbol}"),
        };

        if negative {
            format!("-{formatted}")
        } else {
            formatted
        }
    }

    /// Format the numeric part only (no symbol, no sign).
    fn format_number(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp(self.decimals);
        let rendered = format!("{rounded:.prec$}", prec = self.decimals as usize);

        let (int_part, frac_part) = match rendered.split_once('.') {
            Some((int_part, frac_part)) => (int_part.to_string(), Some(frac_part.to_string())),
            None => (rendered, None),
        };

        let grouped = group_thousands(&int_part, &self.thousand_separator);
        match frac_part {
            Some(frac) => format!("{grouped}{}{frac}", self.decimal_separator),
            None => grouped,
        }
    }
}

/// Insert a separator between groups of three digits, right to left.
fn group_thousands(digits: &str, separator: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let len = chars.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(*c);
    }
    out
}
