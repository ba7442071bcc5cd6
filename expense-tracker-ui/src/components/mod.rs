//! UI Components
//!
//! Leptos components for the dashboard.

pub mod category_filter;
pub mod chart_panel;
pub mod expense_form;
pub mod expense_table;
pub mod notice_banner;
pub mod summary_cards;

pub use category_filter::CategoryFilter;
pub use chart_panel::ChartPanel;
pub use expense_form::ExpenseForm;
pub use expense_table::ExpenseTable;
pub use notice_banner::NoticeBanner;
pub use summary_cards::SummaryCards;
