//! Currency formatting for summary figures and table amounts.

use num_format::{CustomFormat, Grouping, ToFormattedString};

/// How amounts are rendered as currency text.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub indian_grouping: bool,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "₹".to_string(),
            indian_grouping: true,
        }
    }
}

impl CurrencyFormat {
    /// Format with two fraction digits, e.g. `₹1,23,456.50` or `-₹4.50`.
    pub fn format(&self, amount: f64) -> String {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        let scaled = (amount.abs() * 100.0).round();
        if scaled >= u128::MAX as f64 {
            // Past u128 cents there is no fractional precision left to show.
            let sign = if amount < 0.0 { "-" } else { "" };
            return format!("{}{}{:.2}", sign, self.symbol, amount.abs());
        }

        let cents = scaled as u128;
        let whole = cents / 100;
        let fraction = cents % 100;

        let grouped = match self.grouping() {
            Some(format) => whole.to_formatted_string(&format),
            None => whole.to_string(),
        };

        let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
        format!("{}{}{}.{:02}", sign, self.symbol, grouped, fraction)
    }

    fn grouping(&self) -> Option<CustomFormat> {
        let grouping = if self.indian_grouping {
            Grouping::Indian
        } else {
            Grouping::Standard
        };
        CustomFormat::builder()
            .grouping(grouping)
            .separator(",")
            .build()
            .ok()
    }
}

/// Format with the default (Indian Rupee) currency format.
pub fn to_currency(amount: f64) -> String {
    CurrencyFormat::default().format(amount)
}
