//! Category Filter Component

use leptos::*;

use crate::state::global::GlobalState;
use crate::state::session::use_session;

#[component]
pub fn CategoryFilter() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let session = use_session();

    let on_change = move |ev| {
        let category = event_target_value(&ev);
        if let Some(session) = session.clone() {
            spawn_local(async move {
                session.set_filter(&category).await;
            });
        }
    };

    view! {
        <select
            on:change=on_change
            prop:value=move || state.filter.with(|f| f.selected.clone())
            class="bg-gray-700 rounded-lg px-3 py-2 text-white border border-gray-600
                   focus:border-primary-500 focus:outline-none"
        >
            // Options are rebuilt after the select's value is set, so each one
            // carries its own selectedness.
            {move || {
                let filter = state.filter.get();
                filter
                    .options
                    .iter()
                    .map(|option| {
                        let selected = filter.is_selected(option);
                        let value = option.value.clone();
                        let label = option.label.clone();
                        view! { <option value=value selected=selected>{label}</option> }
                    })
                    .collect_view()
            }}
        </select>
    }
}
