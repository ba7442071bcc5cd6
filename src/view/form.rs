//! Edit form draft and client-side validation.
//!
//! Validation is advisory; the backend has the final say.

use std::fmt;

use crate::model::{EntryType, Expense, ExpenseId, ExpenseInput};

/// Current contents of the add/edit form
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseForm {
    /// Set while editing an existing record
    pub id: Option<ExpenseId>,
    pub title: String,
    /// Raw text as typed
    pub amount: String,
    pub date: String,
    pub category: String,
    pub entry_type: EntryType,
}

impl Default for ExpenseForm {
    fn default() -> Self {
        Self::blank(&today())
    }
}

impl ExpenseForm {
    /// Empty form dated `today`, type `expense`
    pub fn blank(today: &str) -> Self {
        Self {
            id: None,
            title: String::new(),
            amount: String::new(),
            date: today.to_string(),
            category: String::new(),
            entry_type: EntryType::Expense,
        }
    }

    /// Form pre-filled for editing `expense`
    pub fn from_expense(expense: &Expense, today: &str) -> Self {
        Self {
            id: Some(expense.id.clone()),
            title: expense.title.clone(),
            amount: expense.amount.to_string(),
            date: if expense.date.is_empty() {
                today.to_string()
            } else {
                expense.date.clone()
            },
            category: expense.category.clone(),
            entry_type: expense.entry_type,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    /// Check every field and collect all problems at once.
    pub fn validate(&self) -> Result<ExpenseInput, ValidationErrors> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push("Title is required".to_string());
        }

        let amount = self.amount.trim().parse::<f64>().ok().filter(|n| n.is_finite());
        if amount.is_none() {
            errors.push("Amount must be a number".to_string());
        }

        if self.date.is_empty() {
            errors.push("Date is required".to_string());
        }

        let category = self.category.trim();
        if category.is_empty() {
            errors.push("Category is required".to_string());
        }

        match amount {
            Some(amount) if errors.is_empty() => Ok(ExpenseInput {
                title: title.to_string(),
                amount,
                date: self.date.clone(),
                category: category.to_string(),
                entry_type: self.entry_type,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

/// Today's date as `YYYY-MM-DD` (UTC)
pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Every violation found in one validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("\n"))
    }
}

impl std::error::Error for ValidationErrors {}
