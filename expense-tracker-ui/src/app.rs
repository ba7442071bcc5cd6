//! App Root Component
//!
//! Builds the sync session, provides it and the reactive state to the tree,
//! and starts the first load.

use leptos::*;

use crate::components::{CategoryFilter, ChartPanel, ExpenseForm, ExpenseTable, NoticeBanner, SummaryCards};
use crate::state::global::provide_global_state;
use crate::state::session::provide_session;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_global_state();

    // Cached data first, then the backend
    if let Some(session) = provide_session(state) {
        spawn_local(async move {
            session.start().await;
        });
    }

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <header class="bg-gray-800 border-b border-gray-700 py-4 px-4">
                <div class="container mx-auto">
                    <h1 class="text-2xl font-bold">"Expense Tracker"</h1>
                </div>
            </header>

            <main class="flex-1 container mx-auto px-4 py-8 space-y-8">
                <NoticeBanner />
                <SummaryCards />

                <div class="grid grid-cols-1 lg:grid-cols-3 gap-8">
                    <section class="bg-gray-800 rounded-xl p-6">
                        <ExpenseForm />
                    </section>

                    <section class="bg-gray-800 rounded-xl p-6 lg:col-span-2">
                        <ChartPanel />
                    </section>
                </div>

                <section class="bg-gray-800 rounded-xl p-6 space-y-4">
                    <div class="flex items-center justify-between">
                        <h2 class="text-lg font-semibold">"Transactions"</h2>
                        <CategoryFilter />
                    </div>
                    <ExpenseTable />
                </section>
            </main>
        </div>
    }
}
