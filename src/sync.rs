//! Sync Orchestrator
//!
//! A [`Session`] owns everything the dashboard needs for its lifetime: the API
//! client, the snapshot cache, the renderer, the chart adapter and the
//! in-memory state (active filter, last-loaded list, summary, form draft,
//! chart selection).
//!
//! Reads never fail from the caller's point of view. A successful fetch is
//! persisted to the snapshot cache and rendered; a failed fetch renders the
//! cached snapshot (or an empty default) and reports
//! [`FetchOutcome::Fallback`]. Writes surface their errors and leave the form
//! draft untouched.
//!
//! The session is single-threaded. Every method takes `&self` so that list and
//! summary refreshes can run concurrently on one task; state borrows are
//! never held across an `.await`.

use std::cell::{Ref, RefCell};

use thiserror::Error;

use crate::api::{ApiClient, ApiError, HttpTransport};
use crate::cache::{SnapshotCache, SnapshotStore, Slot};
use crate::chart::{ChartAdapter, ChartKind, ChartSelection, ChartSink, DatasetMode};
use crate::format::CurrencyFormat;
use crate::model::{Expense, ExpenseId, Summary};
use crate::view::form::today;
use crate::view::{table, ExpenseForm, FilterOptions, Notice, Renderer, SummaryFigures, ValidationErrors};

/// Result of a read: fresh from the backend, or served from the cache
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Live(T),
    Fallback(T),
}

impl<T> FetchOutcome<T> {
    pub fn is_live(&self) -> bool {
        matches!(self, FetchOutcome::Live(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FetchOutcome::Fallback(_))
    }

    pub fn value(&self) -> &T {
        match self {
            FetchOutcome::Live(value) | FetchOutcome::Fallback(value) => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            FetchOutcome::Live(value) | FetchOutcome::Fallback(value) => value,
        }
    }
}

/// What a resource is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceState {
    /// Cached or zero-valued data
    #[default]
    StaleOrEmpty,
    /// Last successful fetch
    Live,
}

/// Which mutation a successful submit performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Created,
    Updated,
}

impl SaveKind {
    pub fn notice(&self) -> &'static str {
        match self {
            SaveKind::Created => "Added",
            SaveKind::Updated => "Updated",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("{0}")]
    Invalid(ValidationErrors),

    #[error("Save failed: {0}")]
    Api(#[from] ApiError),
}

/// In-memory session state
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Active category filter; empty shows everything
    pub filter: String,
    /// Last-loaded list, used for chart recomputation
    pub expenses: Vec<Expense>,
    pub summary: Summary,
    pub form: ExpenseForm,
    pub selection: ChartSelection,
    pub list_state: ResourceState,
    pub summary_state: ResourceState,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            filter: String::new(),
            expenses: Vec::new(),
            summary: Summary::default(),
            form: ExpenseForm::blank(&today()),
            selection: ChartSelection::default(),
            list_state: ResourceState::StaleOrEmpty,
            summary_state: ResourceState::StaleOrEmpty,
        }
    }
}

/// One dashboard session
pub struct Session<T, S, R, C: ChartSink> {
    api: ApiClient<T>,
    cache: SnapshotCache<S>,
    renderer: R,
    currency: CurrencyFormat,
    chart: RefCell<ChartAdapter<C>>,
    state: RefCell<SessionState>,
}

impl<T, S, R, C> Session<T, S, R, C>
where
    T: HttpTransport,
    S: SnapshotStore,
    R: Renderer,
    C: ChartSink,
{
    pub fn new(api: ApiClient<T>, cache: SnapshotCache<S>, renderer: R, chart: C) -> Self {
        Self {
            api,
            cache,
            renderer,
            currency: CurrencyFormat::default(),
            chart: RefCell::new(ChartAdapter::new(chart)),
            state: RefCell::new(SessionState::default()),
        }
    }

    pub fn with_currency(mut self, currency: CurrencyFormat) -> Self {
        self.currency = currency;
        self
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub fn cache(&self) -> &SnapshotCache<S> {
        &self.cache
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn state(&self) -> Ref<'_, SessionState> {
        self.state.borrow()
    }

    pub fn chart(&self) -> Ref<'_, ChartAdapter<C>> {
        self.chart.borrow()
    }

    pub fn chart_instances(&self) -> usize {
        self.chart.borrow().live_instances()
    }

    /// Render whatever the cache holds, before any network traffic.
    pub fn warm_start(&self) {
        let items: Vec<Expense> = self.cache.get(Slot::Expenses, Vec::new());
        let summary: Summary = self.cache.get(Slot::Summary, Summary::default());
        tracing::debug!(cached_items = items.len(), "Warm start");

        self.apply_list(&items, items.clone(), ResourceState::StaleOrEmpty);
        self.apply_summary(summary, ResourceState::StaleOrEmpty);

        let form = self.state.borrow().form.clone();
        self.renderer.render_form(&form);
    }

    /// Warm start, then a full refresh.
    pub async fn start(&self) {
        self.warm_start();
        self.refresh_all().await;
    }

    /// Fetch the (optionally filtered) list.
    pub async fn refresh_list(&self) -> FetchOutcome<Vec<Expense>> {
        let filter = self.state.borrow().filter.clone();
        let category = Some(filter.as_str()).filter(|f| !f.is_empty());

        match self.api.list(category).await {
            Ok(items) => {
                tracing::info!(count = items.len(), filter = %filter, "Expense list refreshed");
                if let Err(e) = self.cache.set(Slot::Expenses, &items) {
                    tracing::warn!(error = %e, "Failed to persist expense snapshot");
                }
                self.apply_list(&items, items.clone(), ResourceState::Live);
                FetchOutcome::Live(items)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Expense list unavailable, using snapshot");
                let cached: Vec<Expense> = self.cache.get(Slot::Expenses, Vec::new());
                let visible: Vec<Expense> = cached
                    .iter()
                    .filter(|item| filter.is_empty() || item.category == filter)
                    .cloned()
                    .collect();
                self.apply_list(&visible, cached, ResourceState::StaleOrEmpty);
                FetchOutcome::Fallback(visible)
            }
        }
    }

    /// Fetch the server summary.
    pub async fn refresh_summary(&self) -> FetchOutcome<Summary> {
        match self.api.summary().await {
            Ok(summary) => {
                tracing::info!(balance = summary.balance, "Summary refreshed");
                if let Err(e) = self.cache.set(Slot::Summary, &summary) {
                    tracing::warn!(error = %e, "Failed to persist summary snapshot");
                }
                self.apply_summary(summary.clone(), ResourceState::Live);
                FetchOutcome::Live(summary)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Summary unavailable, using snapshot");
                let summary: Summary = self.cache.get(Slot::Summary, Summary::default());
                self.apply_summary(summary.clone(), ResourceState::StaleOrEmpty);
                FetchOutcome::Fallback(summary)
            }
        }
    }

    /// List and summary concurrently; returns once both are rendered.
    pub async fn refresh_all(&self) -> (FetchOutcome<Vec<Expense>>, FetchOutcome<Summary>) {
        futures_util::future::join(self.refresh_list(), self.refresh_summary()).await
    }

    pub async fn set_filter(&self, category: &str) -> FetchOutcome<Vec<Expense>> {
        self.state.borrow_mut().filter = category.trim().to_string();
        self.refresh_list().await
    }

    pub fn set_dataset_mode(&self, mode: DatasetMode) {
        self.state.borrow_mut().selection.mode = mode;
        self.redraw_chart();
    }

    /// `None` restores the mode's default kind.
    pub fn set_chart_kind(&self, kind: Option<ChartKind>) {
        self.state.borrow_mut().selection.kind = kind;
        self.redraw_chart();
    }

    /// Update the draft as the user types; nothing is rendered.
    pub fn edit_form(&self, edit: impl FnOnce(&mut ExpenseForm)) {
        edit(&mut self.state.borrow_mut().form);
    }

    /// Load a record into the form. Returns false when the id is unknown.
    pub fn begin_edit(&self, id: &ExpenseId) -> bool {
        let cached: Vec<Expense> = self.cache.get(Slot::Expenses, Vec::new());
        let found = cached.into_iter().find(|item| &item.id == id).or_else(|| {
            self.state
                .borrow()
                .expenses
                .iter()
                .find(|item| &item.id == id)
                .cloned()
        });

        let Some(expense) = found else {
            tracing::debug!(id = %id, "Edit requested for unknown record");
            return false;
        };

        let form = ExpenseForm::from_expense(&expense, &today());
        self.state.borrow_mut().form = form.clone();
        self.renderer.render_form(&form);
        true
    }

    pub fn reset_form(&self) {
        let form = ExpenseForm::blank(&today());
        self.state.borrow_mut().form = form.clone();
        self.renderer.render_form(&form);
    }

    /// Validate and save the form draft.
    ///
    /// Invalid drafts issue no request. A failed save keeps the draft.
    pub async fn submit(&self) -> Result<SaveKind, SubmitError> {
        let form = self.state.borrow().form.clone();

        let input = match form.validate() {
            Ok(input) => input,
            Err(errors) => {
                self.renderer.notify(Notice::error(errors.to_string()));
                return Err(SubmitError::Invalid(errors));
            }
        };

        let saved = match &form.id {
            Some(id) => self.api.update(id, &input).await.map(|_| SaveKind::Updated),
            None => self.api.create(&input).await.map(|_| SaveKind::Created),
        };

        match saved {
            Ok(kind) => {
                tracing::info!(kind = ?kind, title = %input.title, "Record saved");
                self.renderer.notify(Notice::success(kind.notice()));
                self.reset_form();
                self.refresh_all().await;
                Ok(kind)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Save failed");
                let err = SubmitError::Api(e);
                self.renderer.notify(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn delete(&self, id: &ExpenseId) -> Result<(), ApiError> {
        match self.api.delete(id).await {
            Ok(()) => {
                tracing::info!(id = %id, "Record deleted");
                self.renderer.notify(Notice::success("Deleted"));
                self.refresh_all().await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "Delete failed");
                self.renderer.notify(Notice::error(format!("Delete failed: {}", e)));
                Err(e)
            }
        }
    }

    /// Render `visible` as rows; filter options come from `all`.
    fn apply_list(&self, visible: &[Expense], all: Vec<Expense>, resource: ResourceState) {
        let options = {
            let mut state = self.state.borrow_mut();
            let options = FilterOptions::populate(&all, &state.filter);
            state.filter = options.selected.clone();
            state.expenses = all;
            state.list_state = resource;
            options
        };

        self.renderer.render_rows(&table::rows(visible, &self.currency));
        self.renderer.render_filter(&options);
        self.redraw_chart();
    }

    fn apply_summary(&self, summary: Summary, resource: ResourceState) {
        let figures = SummaryFigures::from_summary(&summary, &self.currency);
        {
            let mut state = self.state.borrow_mut();
            state.summary = summary;
            state.summary_state = resource;
        }

        self.renderer.render_summary(&figures);
        self.redraw_chart();
    }

    fn redraw_chart(&self) {
        let state = self.state.borrow();
        self.chart
            .borrow_mut()
            .render(state.selection, &state.summary.by_category, &state.expenses);
    }
}
