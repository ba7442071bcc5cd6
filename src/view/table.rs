//! Expense table rows.

use crate::format::CurrencyFormat;
use crate::model::{EntryType, Expense, ExpenseId};

/// Visual treatment of an amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Income,
    Expense,
}

impl Tone {
    pub fn color(&self) -> &'static str {
        match self {
            Tone::Income => "#22c55e",
            Tone::Expense => "#ef4444",
        }
    }
}

impl From<EntryType> for Tone {
    fn from(entry_type: EntryType) -> Self {
        match entry_type {
            EntryType::Income => Tone::Income,
            EntryType::Expense => Tone::Expense,
        }
    }
}

/// One table row; `id` tags the row's edit/delete actions
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRow {
    pub id: ExpenseId,
    pub title: String,
    pub amount: String,
    pub tone: Tone,
    pub entry_type: String,
    pub category: String,
    pub date: String,
}

impl ExpenseRow {
    pub fn from_expense(expense: &Expense, currency: &CurrencyFormat) -> Self {
        Self {
            id: expense.id.clone(),
            title: expense.title.clone(),
            amount: currency.format(expense.amount),
            tone: expense.entry_type.into(),
            entry_type: expense.entry_type.to_string(),
            category: expense.category.clone(),
            date: expense.date.clone(),
        }
    }

    /// Key for list rendering; differs whenever any visible cell differs
    pub fn render_key(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}",
            self.id, self.title, self.amount, self.entry_type, self.category, self.date
        )
    }
}

/// Rows in input order
pub fn rows(items: &[Expense], currency: &CurrencyFormat) -> Vec<ExpenseRow> {
    items
        .iter()
        .map(|item| ExpenseRow::from_expense(item, currency))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_formatting() {
        let expense = Expense {
            id: ExpenseId::from(5),
            title: "Salary".to_string(),
            amount: 2000.0,
            date: "2024-03-01".to_string(),
            category: "Work".to_string(),
            entry_type: EntryType::Income,
        };

        let row = ExpenseRow::from_expense(&expense, &CurrencyFormat::default());
        assert_eq!(row.amount, "₹2,000.00");
        assert_eq!(row.tone.color(), "#22c55e");
        assert_eq!(row.entry_type, "income");
        assert_eq!(row.id.to_string(), "5");
    }

    #[test]
    fn test_render_key_tracks_content() {
        let coffee = Expense {
            id: ExpenseId::from(3),
            title: "Coffee".to_string(),
            amount: 4.5,
            date: "2024-03-02".to_string(),
            category: "Food".to_string(),
            entry_type: EntryType::Expense,
        };
        let tea = Expense {
            title: "Tea".to_string(),
            amount: 3.0,
            ..coffee.clone()
        };
        let currency = CurrencyFormat::default();

        let before = ExpenseRow::from_expense(&coffee, &currency);
        let after = ExpenseRow::from_expense(&tea, &currency);

        assert_eq!(before.id, after.id);
        assert_ne!(before.render_key(), after.render_key());
        assert_eq!(before.render_key(), ExpenseRow::from_expense(&coffee, &currency).render_key());
    }

    #[test]
    fn test_expense_tone() {
        assert_eq!(Tone::from(EntryType::Expense).color(), "#ef4444");
    }
}
