//! Notice banner: the latest save/delete outcome under the page header.

use leptos::*;

use crate::state::global::GlobalState;

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // An error outranks a success that is still on screen.
    let current = move || match (state.error.get(), state.success.get()) {
        (Some(message), _) => Some((message, "border-red-500 bg-red-500/10 text-red-200")),
        (None, Some(message)) => Some((message, "border-green-500 bg-green-500/10 text-green-200")),
        (None, None) => None,
    };

    let dismiss = move |_| {
        state.clear_error();
        state.success.set(None);
    };

    view! {
        <div role="status" aria-live="polite">
            {move || current().map(|(message, tone)| view! {
                <div class=format!("flex items-start justify-between gap-4 border-l-4 rounded px-4 py-2 mb-4 {}", tone)>
                    <p class="text-sm whitespace-pre-line">{message}</p>
                    <button type="button" on:click=dismiss class="text-lg leading-none opacity-70 hover:opacity-100">
                        "×"
                    </button>
                </div>
            })}
        </div>
    }
}
