//! View Renderer
//!
//! Network-oblivious view models for the table, category filter, summary
//! figures and edit form, plus the [`Renderer`] seam the UI implements.

pub mod filter;
pub mod form;
pub mod summary;
pub mod table;

pub use filter::{FilterOption, FilterOptions, ALL_CATEGORIES_LABEL};
pub use form::{ExpenseForm, ValidationErrors};
pub use summary::SummaryFigures;
pub use table::{ExpenseRow, Tone};

/// Severity of a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message for the toast area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Receives everything the dashboard shows, except the chart.
///
/// Methods take `&self`; implementations hold their own interior state
/// (reactive signals in the browser).
pub trait Renderer {
    fn render_rows(&self, rows: &[ExpenseRow]);
    fn render_filter(&self, options: &FilterOptions);
    fn render_summary(&self, figures: &SummaryFigures);
    fn render_form(&self, form: &ExpenseForm);
    fn notify(&self, notice: Notice);
}

impl<R: Renderer + ?Sized> Renderer for std::rc::Rc<R> {
    fn render_rows(&self, rows: &[ExpenseRow]) {
        (**self).render_rows(rows)
    }

    fn render_filter(&self, options: &FilterOptions) {
        (**self).render_filter(options)
    }

    fn render_summary(&self, figures: &SummaryFigures) {
        (**self).render_summary(figures)
    }

    fn render_form(&self, form: &ExpenseForm) {
        (**self).render_form(form)
    }

    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}
