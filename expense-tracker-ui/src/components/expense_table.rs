//! Expense Table Component
//!
//! One row per record with edit and delete actions.

use leptos::*;

use expense_tracker::model::ExpenseId;
use expense_tracker::view::ExpenseRow;

use crate::state::global::GlobalState;
use crate::state::session::use_session;

#[component]
pub fn ExpenseTable() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="overflow-x-auto">
            <table class="w-full text-sm">
                <thead class="text-gray-400 text-left border-b border-gray-700">
                    <tr>
                        <th class="py-2">"Title"</th>
                        <th class="py-2 text-right">"Amount"</th>
                        <th class="py-2">"Type"</th>
                        <th class="py-2">"Category"</th>
                        <th class="py-2">"Date"</th>
                        <th class="py-2"></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || state.rows.get()
                        key=|row| row.render_key()
                        children=move |row| view! { <ExpenseTableRow row=row /> }
                    />
                </tbody>
            </table>

            {move || state.rows.with(|rows| rows.is_empty()).then(|| view! {
                <p class="text-center text-gray-500 py-6">"No entries yet"</p>
            })}
        </div>
    }
}

#[component]
fn ExpenseTableRow(row: ExpenseRow) -> impl IntoView {
    let session = use_session();

    let edit_id = row.id.clone();
    let edit_session = session.clone();
    let on_edit = move |_| {
        if let Some(session) = &edit_session {
            session.begin_edit(&edit_id);
        }
    };

    let delete_id = row.id.clone();
    let on_delete = move |_| {
        if let Some(session) = session.clone() {
            confirm_delete(session, delete_id.clone());
        }
    };

    view! {
        <tr class="border-b border-gray-700/50">
            <td class="py-2">{row.title}</td>
            <td class="py-2 text-right font-mono" style=format!("color: {}", row.tone.color())>
                {row.amount}
            </td>
            <td class="py-2 capitalize">{row.entry_type}</td>
            <td class="py-2">{row.category}</td>
            <td class="py-2 text-gray-400">{row.date}</td>
            <td class="py-2 text-right space-x-2">
                <button type="button" on:click=on_edit class="text-primary-400 hover:text-primary-300">
                    "Edit"
                </button>
                <button type="button" on:click=on_delete class="text-red-400 hover:text-red-300">
                    "Delete"
                </button>
            </td>
        </tr>
    }
}

fn confirm_delete(session: std::rc::Rc<crate::state::session::UiSession>, id: ExpenseId) {
    let confirmed = web_sys::window()
        .and_then(|window| window.confirm_with_message("Delete this entry?").ok())
        .unwrap_or(false);
    if !confirmed {
        return;
    }

    spawn_local(async move {
        if let Err(e) = session.delete(&id).await {
            tracing::debug!(id = %id, error = %e, "Delete not completed");
        }
    });
}
