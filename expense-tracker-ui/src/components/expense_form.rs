//! Expense Form Component
//!
//! Add/edit form. Every keystroke updates the session's draft; the session
//! validates on submit and resets or keeps the form depending on the result.

use leptos::*;

use expense_tracker::model::EntryType;

use crate::state::global::GlobalState;
use crate::state::session::use_session;

#[component]
pub fn ExpenseForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let session = use_session();

    let edit = {
        let session = session.clone();
        move |apply: Box<dyn FnOnce(&mut expense_tracker::view::ExpenseForm)>| {
            if let Some(session) = &session {
                session.edit_form(apply);
            }
        }
    };

    let on_submit = {
        let session = session.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some(session) = session.clone() else {
                return;
            };

            state.saving.set(true);
            spawn_local(async move {
                if let Err(e) = session.submit().await {
                    tracing::debug!(error = %e, "Submit not completed");
                }
                state.saving.set(false);
            });
        }
    };

    let on_reset = {
        let session = session.clone();
        move |_| {
            if let Some(session) = &session {
                session.reset_form();
            }
        }
    };

    let edit_title = edit.clone();
    let edit_amount = edit.clone();
    let edit_date = edit.clone();
    let edit_category = edit.clone();
    let edit_type = edit;

    view! {
        <div class="space-y-4">
            <h2 class="text-lg font-semibold">
                {move || if state.form.with(|f| f.is_editing()) { "Edit entry" } else { "Add entry" }}
            </h2>

            <form on:submit=on_submit class="space-y-4">
                <FormField label="Title">
                    <input
                        type="text"
                        placeholder="Coffee"
                        prop:value=move || state.form.with(|f| f.title.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit_title(Box::new(move |f| f.title = value));
                        }
                        class=INPUT_CLASS
                    />
                </FormField>

                <FormField label="Amount">
                    <input
                        type="number"
                        step="0.01"
                        prop:value=move || state.form.with(|f| f.amount.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit_amount(Box::new(move |f| f.amount = value));
                        }
                        class=INPUT_CLASS
                    />
                </FormField>

                <FormField label="Date">
                    <input
                        type="date"
                        prop:value=move || state.form.with(|f| f.date.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit_date(Box::new(move |f| f.date = value));
                        }
                        class=INPUT_CLASS
                    />
                </FormField>

                <FormField label="Category">
                    <input
                        type="text"
                        placeholder="Food"
                        prop:value=move || state.form.with(|f| f.category.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            edit_category(Box::new(move |f| f.category = value));
                        }
                        class=INPUT_CLASS
                    />
                </FormField>

                <FormField label="Type">
                    <select
                        prop:value=move || state.form.with(|f| f.entry_type.as_str())
                        on:change=move |ev| {
                            let entry_type = EntryType::from_label(&event_target_value(&ev));
                            edit_type(Box::new(move |f| f.entry_type = entry_type));
                        }
                        class=INPUT_CLASS
                    >
                        <option value="expense">"Expense"</option>
                        <option value="income">"Income"</option>
                    </select>
                </FormField>

                <div class="flex space-x-2">
                    <button
                        type="submit"
                        disabled=move || state.saving.get()
                        class="flex-1 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                               disabled:cursor-not-allowed rounded-lg py-3 font-semibold transition-colors"
                    >
                        {move || if state.saving.get() { "Saving..." } else { "Save" }}
                    </button>
                    <button
                        type="button"
                        on:click=on_reset
                        class="px-4 bg-gray-700 hover:bg-gray-600 rounded-lg py-3 transition-colors"
                    >
                        "Reset"
                    </button>
                </div>
            </form>
        </div>
    }
}

const INPUT_CLASS: &str = "w-full bg-gray-700 rounded-lg px-4 py-3 text-white \
                           border border-gray-600 focus:border-primary-500 focus:outline-none";

#[component]
fn FormField(label: &'static str, children: Children) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            {children()}
        </div>
    }
}
