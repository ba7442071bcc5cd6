//! Summary Cards Component
//!
//! Income, expense and balance totals.

use leptos::*;

use crate::state::global::GlobalState;

#[component]
pub fn SummaryCards() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <SummaryCard label="Income" color="text-green-400" value=Signal::derive(move || state.figures.get().income) />
            <SummaryCard label="Expenses" color="text-red-400" value=Signal::derive(move || state.figures.get().expense) />
            <SummaryCard label="Balance" color="text-white" value=Signal::derive(move || state.figures.get().balance) />
        </div>
    }
}

#[component]
fn SummaryCard(
    label: &'static str,
    color: &'static str,
    value: Signal<String>,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
            <span class="text-gray-400 text-sm">{label}</span>
            <div class=format!("text-3xl font-bold mt-2 {}", color)>
                {move || value.get()}
            </div>
        </div>
    }
}
