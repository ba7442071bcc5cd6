//! Category filter options.

use std::collections::BTreeSet;

use crate::model::Expense;

pub const ALL_CATEGORIES_LABEL: &str = "All Categories";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Empty for "show all"
    pub value: String,
    pub label: String,
}

/// Select options plus the value that stays selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub options: Vec<FilterOption>,
    pub selected: String,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self::populate(&[], "")
    }
}

impl FilterOptions {
    /// Leading "All Categories", then the distinct non-empty categories in
    /// lexicographic order. `current` survives if it is still offered.
    pub fn populate(items: &[Expense], current: &str) -> Self {
        let categories: BTreeSet<&str> = items
            .iter()
            .map(|item| item.category.as_str())
            .filter(|category| !category.is_empty())
            .collect();

        let mut options = Vec::with_capacity(categories.len() + 1);
        options.push(FilterOption {
            value: String::new(),
            label: ALL_CATEGORIES_LABEL.to_string(),
        });
        options.extend(categories.iter().map(|category| FilterOption {
            value: category.to_string(),
            label: category.to_string(),
        }));

        let selected = if categories.contains(current) {
            current.to_string()
        } else {
            String::new()
        };

        Self { options, selected }
    }

    pub fn is_selected(&self, option: &FilterOption) -> bool {
        option.value == self.selected
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.options.iter().skip(1).map(|o| o.value.as_str())
    }
}
