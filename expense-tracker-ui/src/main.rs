//! Expense Tracker Dashboard
//!
//! Personal expense dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Add, edit and delete income/expense records
//! - Category filter and income/expense/balance summary
//! - Category and monthly charts via Chart.js
//! - Last-known-good snapshots in `localStorage` when the backend is unreachable
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All sync logic lives in the `expense-tracker` crate; this crate
//! supplies the browser implementations of its transport, storage, renderer
//! and chart seams.

use leptos::*;

mod api;
mod app;
mod components;
mod logging;
mod state;
mod storage;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();
    logging::init();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
