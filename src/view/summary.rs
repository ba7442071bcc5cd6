use crate::format::CurrencyFormat;
use crate::model::Summary;

/// Formatted income, expense and balance figures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryFigures {
    pub income: String,
    pub expense: String,
    pub balance: String,
}

impl SummaryFigures {
    pub fn from_summary(summary: &Summary, currency: &CurrencyFormat) -> Self {
        Self {
            income: currency.format(summary.income),
            expense: currency.format(summary.expense),
            balance: currency.format(summary.balance),
        }
    }
}
