//! Global Application State
//!
//! Reactive state management using Leptos signals. The sync session writes
//! here through [`SignalRenderer`]; components only read.

use leptos::*;

use expense_tracker::format::CurrencyFormat;
use expense_tracker::model::Summary;
use expense_tracker::view::{
    ExpenseForm, ExpenseRow, FilterOptions, Notice, NoticeLevel, Renderer, SummaryFigures,
};

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Table rows, already formatted
    pub rows: RwSignal<Vec<ExpenseRow>>,
    /// Category filter options and selection
    pub filter: RwSignal<FilterOptions>,
    /// Income, expense and balance
    pub figures: RwSignal<SummaryFigures>,
    /// Form contents as last loaded or reset by the session
    pub form: RwSignal<ExpenseForm>,
    /// A mutation is in flight
    pub saving: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message for the notice banner
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let state = GlobalState {
        rows: create_rw_signal(Vec::new()),
        filter: create_rw_signal(FilterOptions::default()),
        figures: create_rw_signal(SummaryFigures::from_summary(
            &Summary::default(),
            &CurrencyFormat::default(),
        )),
        form: create_rw_signal(ExpenseForm::default()),
        saving: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
    state
}

impl GlobalState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

/// [`Renderer`] that writes into [`GlobalState`] signals
#[derive(Clone, Copy)]
pub struct SignalRenderer {
    state: GlobalState,
}

impl SignalRenderer {
    pub fn new(state: GlobalState) -> Self {
        Self { state }
    }
}

impl Renderer for SignalRenderer {
    fn render_rows(&self, rows: &[ExpenseRow]) {
        self.state.rows.set(rows.to_vec());
    }

    fn render_filter(&self, options: &FilterOptions) {
        self.state.filter.set(options.clone());
    }

    fn render_summary(&self, figures: &SummaryFigures) {
        self.state.figures.set(figures.clone());
    }

    fn render_form(&self, form: &ExpenseForm) {
        self.state.form.set(form.clone());
    }

    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => self.state.show_success(&notice.message),
            NoticeLevel::Error => self.state.show_error(&notice.message),
        }
    }
}
