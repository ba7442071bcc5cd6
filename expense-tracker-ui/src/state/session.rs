//! The dashboard's sync session, shared through context.

use std::rc::Rc;

use leptos::*;

use expense_tracker::cache::SnapshotCache;
use expense_tracker::sync::Session;

use crate::api::{self, GlooTransport};
use crate::components::chart_panel::ChartJsSink;
use crate::state::global::{GlobalState, SignalRenderer};
use crate::storage::LocalStorageStore;

pub type UiSession = Session<GlooTransport, LocalStorageStore, SignalRenderer, ChartJsSink>;

/// Handle to the session held in context
#[derive(Clone)]
pub struct SessionHandle(pub Rc<UiSession>);

/// Build the session and provide it to the component tree.
///
/// Returns `None` when the configured base address is unusable.
pub fn provide_session(state: GlobalState) -> Option<Rc<UiSession>> {
    let client = match api::build_client() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Cannot reach the expense backend");
            state.show_error(&e.to_string());
            return None;
        }
    };

    let session = Rc::new(Session::new(
        client,
        SnapshotCache::new(LocalStorageStore),
        SignalRenderer::new(state),
        ChartJsSink::default(),
    ));

    provide_context(SessionHandle(session.clone()));
    Some(session)
}

/// The session from context
pub fn use_session() -> Option<Rc<UiSession>> {
    use_context::<SessionHandle>().map(|handle| handle.0)
}
