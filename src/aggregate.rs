//! Aggregation Engine
//!
//! Derives chart series from raw records: a monthly income/expense/net series
//! computed client-side, and the per-category totals passed through from the
//! server summary.

use std::collections::BTreeMap;

use crate::model::{CategoryTotal, EntryType, Expense};

/// Per-month totals, ordered by ascending `YYYY-MM` label
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthlySeries {
    pub labels: Vec<String>,
    pub incomes: Vec<f64>,
    pub expenses: Vec<f64>,
    pub net: Vec<f64>,
}

impl MonthlySeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Default)]
struct MonthBucket {
    incomes: Vec<f64>,
    expenses: Vec<f64>,
}

/// Group records by the `YYYY-MM` prefix of their date.
///
/// Records without a date are skipped. `income` records add to the month's
/// income, everything else to its expense. Amounts within a month are summed
/// in sorted order so the result does not depend on input order.
pub fn monthly_series(entries: &[Expense]) -> MonthlySeries {
    let mut months: BTreeMap<&str, MonthBucket> = BTreeMap::new();

    for entry in entries {
        let Some(month) = entry.month_key() else {
            continue;
        };
        let amount = if entry.amount.is_finite() { entry.amount } else { 0.0 };
        let bucket = months.entry(month).or_default();
        match entry.entry_type {
            EntryType::Income => bucket.incomes.push(amount),
            EntryType::Expense => bucket.expenses.push(amount),
        }
    }

    let mut series = MonthlySeries::default();
    for (month, bucket) in months {
        let income = stable_sum(bucket.incomes);
        let expense = stable_sum(bucket.expenses);
        series.labels.push(month.to_string());
        series.incomes.push(income);
        series.expenses.push(expense);
        series.net.push(income - expense);
    }
    series
}

fn stable_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

/// Server category totals with duplicate categories merged.
///
/// The first occurrence keeps its position; later duplicates add to it.
pub fn category_totals(by_category: &[CategoryTotal]) -> Vec<CategoryTotal> {
    let mut merged: Vec<CategoryTotal> = Vec::with_capacity(by_category.len());

    for item in by_category {
        match merged.iter_mut().find(|m| m.category == item.category) {
            Some(existing) => {
                tracing::debug!(category = %item.category, "Merging duplicate category total");
                existing.total += item.total;
            }
            None => merged.push(item.clone()),
        }
    }
    merged
}
