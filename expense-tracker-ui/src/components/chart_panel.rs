//! Chart Panel Component
//!
//! Dataset and chart-kind selects above a Chart.js canvas. The session owns
//! the chart instance; this module provides the Chart.js sink it draws with.

use js_sys::{Array, Function, Reflect, JSON};
use leptos::*;
use wasm_bindgen::{JsCast, JsValue};

use expense_tracker::chart::{ChartConfig, ChartKind, ChartSink, DatasetMode};

use crate::state::session::use_session;

/// Canvas the chart is drawn on
pub const CANVAS_ID: &str = "categoryChart";

#[component]
pub fn ChartPanel() -> impl IntoView {
    let session = use_session();
    let kind_session = session.clone();

    let on_dataset = move |ev| {
        let mode = event_target_value(&ev).parse::<DatasetMode>().unwrap_or_default();
        if let Some(session) = &session {
            session.set_dataset_mode(mode);
        }
    };

    let on_kind = move |ev| {
        let kind = event_target_value(&ev).parse::<ChartKind>().ok();
        if let Some(session) = &kind_session {
            session.set_chart_kind(kind);
        }
    };

    view! {
        <div class="space-y-4">
            <div class="flex flex-wrap gap-2">
                <select on:change=on_dataset class=SELECT_CLASS>
                    {DatasetMode::ALL
                        .into_iter()
                        .map(|mode| view! { <option value=mode.as_str()>{mode.label()}</option> })
                        .collect_view()}
                </select>
                <select on:change=on_kind class=SELECT_CLASS>
                    <option value="">"Default"</option>
                    {ChartKind::ALL
                        .into_iter()
                        .map(|kind| view! { <option value=kind.as_str()>{kind.as_str()}</option> })
                        .collect_view()}
                </select>
            </div>

            <div class="relative h-64 md:h-96">
                <canvas id=CANVAS_ID class="w-full h-full" />
            </div>
        </div>
    }
}

const SELECT_CLASS: &str = "bg-gray-700 rounded-lg px-3 py-2 text-white border border-gray-600 \
                            focus:border-primary-500 focus:outline-none";

/// [`ChartSink`] backed by the global `Chart` constructor
#[derive(Debug, Clone, Copy)]
pub struct ChartJsSink {
    canvas_id: &'static str,
}

impl Default for ChartJsSink {
    fn default() -> Self {
        Self {
            canvas_id: CANVAS_ID,
        }
    }
}

impl ChartJsSink {
    fn construct(&self, config: &ChartConfig) -> Result<JsValue, JsValue> {
        let canvas = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(self.canvas_id))
            .ok_or_else(|| JsValue::from_str("chart canvas not found"))?;

        let constructor: Function = Reflect::get(&js_sys::global(), &JsValue::from_str("Chart"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("Chart.js not loaded"))?;

        let json = serde_json::to_string(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let options = JSON::parse(&json)?;

        Reflect::construct(&constructor, &Array::of2(&canvas, &options))
    }
}

impl ChartSink for ChartJsSink {
    type Handle = JsValue;

    fn create(&mut self, config: &ChartConfig) -> Option<JsValue> {
        match self.construct(config) {
            Ok(chart) => Some(chart),
            Err(e) => {
                tracing::warn!(error = ?e, "Chart not drawn");
                None
            }
        }
    }

    fn destroy(&mut self, handle: JsValue) {
        let destroy = Reflect::get(&handle, &JsValue::from_str("destroy"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok());

        if let Some(destroy) = destroy {
            if let Err(e) = destroy.call0(&handle) {
                tracing::warn!(error = ?e, "Chart destroy failed");
            }
        }
    }
}
