//! Shared fixtures: an in-process expense backend and recording doubles for
//! the renderer and chart sink.

#![allow(dead_code)]

use std::cell::RefCell;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use expense_tracker::chart::{ChartConfig, ChartSink};
use expense_tracker::view::{ExpenseForm, ExpenseRow, FilterOptions, Notice, Renderer, SummaryFigures};

#[derive(Debug, Clone)]
pub struct Row {
    pub id: i64,
    pub title: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
    pub kind: String,
}

impl Row {
    pub fn new(id: i64, title: &str, amount: f64, date: &str, category: &str, kind: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            amount,
            date: date.to_string(),
            category: category.to_string(),
            kind: kind.to_string(),
        }
    }

    /// DECIMAL columns come back as strings
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "amount": format!("{:.2}", self.amount),
            "date": self.date,
            "category": self.category,
            "type": self.kind,
        })
    }
}

#[derive(Default)]
struct Db {
    rows: Vec<Row>,
    next_id: i64,
    requests: Vec<String>,
}

#[derive(Clone, Default)]
struct Shared {
    db: Arc<Mutex<Db>>,
    unavailable: Arc<AtomicBool>,
}

impl Shared {
    fn record(&self, request: String) -> Result<(), Response> {
        let mut db = self.db.lock().unwrap();
        db.requests.push(request);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err((StatusCode::SERVICE_UNAVAILABLE, "backend unavailable").into_response());
        }
        Ok(())
    }
}

/// Expense backend serving `/api/expenses` and `/api/summary`
pub struct FakeBackend {
    pub addr: SocketAddr,
    shared: Shared,
}

impl FakeBackend {
    pub async fn spawn(rows: Vec<Row>) -> Self {
        let next_id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let shared = Shared::default();
        {
            let mut db = shared.db.lock().unwrap();
            db.rows = rows;
            db.next_id = next_id;
        }

        let app = Router::new()
            .route("/api/expenses", get(list_expenses).post(create_expense))
            .route("/api/expenses/:id", put(update_expense).delete(delete_expense))
            .route("/api/summary", get(summary))
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, shared }
    }

    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn api_base(&self) -> String {
        format!("{}/api", self.origin())
    }

    /// Answer every request with 503 from now on
    pub fn set_unavailable(&self, unavailable: bool) {
        self.shared.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// `"METHOD /path?query"` for each request received
    pub fn requests(&self) -> Vec<String> {
        self.shared.db.lock().unwrap().requests.clone()
    }

    pub fn rows(&self) -> Vec<Row> {
        self.shared.db.lock().unwrap().rows.clone()
    }
}

/// An origin nothing listens on
pub async fn dead_origin() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// An origin that accepts connections and never answers
pub async fn stalled_origin() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

#[derive(Deserialize)]
struct ListQuery {
    category: Option<String>,
}

async fn list_expenses(State(shared): State<Shared>, Query(query): Query<ListQuery>) -> Response {
    let label = match &query.category {
        Some(category) => format!("GET /api/expenses?category={}", category),
        None => "GET /api/expenses".to_string(),
    };
    if let Err(resp) = shared.record(label) {
        return resp;
    }

    let db = shared.db.lock().unwrap();
    let mut rows: Vec<&Row> = db
        .rows
        .iter()
        .filter(|r| query.category.as_deref().map_or(true, |c| c.is_empty() || r.category == c))
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    Json(rows.iter().map(|r| r.to_json()).collect::<Vec<_>>()).into_response()
}

fn validate(body: &Value, partial: bool) -> Option<Value> {
    let mut errors = serde_json::Map::new();
    if !partial {
        for key in ["title", "amount", "date", "category"] {
            let missing = match body.get(key) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                _ => false,
            };
            if missing {
                errors.insert(key.to_string(), json!("This field is required."));
            }
        }
    }
    if let Some(amount) = body.get("amount").and_then(Value::as_f64) {
        if amount < 0.0 {
            errors.insert("amount".to_string(), json!("Amount must be non-negative."));
        }
    }
    (!errors.is_empty()).then(|| json!({ "errors": errors }))
}

async fn create_expense(State(shared): State<Shared>, Json(body): Json<Value>) -> Response {
    if let Err(resp) = shared.record("POST /api/expenses".to_string()) {
        return resp;
    }
    if let Some(errors) = validate(&body, false) {
        return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
    }

    let mut db = shared.db.lock().unwrap();
    let id = db.next_id;
    db.next_id += 1;
    db.rows.push(Row {
        id,
        title: body["title"].as_str().unwrap_or_default().trim().to_string(),
        amount: body["amount"].as_f64().unwrap_or_default(),
        date: body["date"].as_str().unwrap_or_default().to_string(),
        category: body["category"].as_str().unwrap_or_default().trim().to_string(),
        kind: body["type"].as_str().unwrap_or("expense").to_string(),
    });

    (StatusCode::CREATED, Json(json!({ "id": id }))).into_response()
}

async fn update_expense(
    State(shared): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = shared.record(format!("PUT /api/expenses/{}", id)) {
        return resp;
    }
    if let Some(errors) = validate(&body, true) {
        return (StatusCode::BAD_REQUEST, Json(errors)).into_response();
    }

    let mut db = shared.db.lock().unwrap();
    if let Some(row) = db.rows.iter_mut().find(|r| r.id == id) {
        if let Some(title) = body["title"].as_str() {
            row.title = title.to_string();
        }
        if let Some(amount) = body["amount"].as_f64() {
            row.amount = amount;
        }
        if let Some(date) = body["date"].as_str() {
            row.date = date.to_string();
        }
        if let Some(category) = body["category"].as_str() {
            row.category = category.to_string();
        }
        if let Some(kind) = body["type"].as_str() {
            row.kind = kind.to_string();
        }
    }

    Json(json!({ "id": id })).into_response()
}

async fn delete_expense(State(shared): State<Shared>, Path(id): Path<i64>) -> Response {
    if let Err(resp) = shared.record(format!("DELETE /api/expenses/{}", id)) {
        return resp;
    }

    shared.db.lock().unwrap().rows.retain(|r| r.id != id);
    StatusCode::NO_CONTENT.into_response()
}

async fn summary(State(shared): State<Shared>) -> Response {
    if let Err(resp) = shared.record("GET /api/summary".to_string()) {
        return resp;
    }

    let db = shared.db.lock().unwrap();
    let income: f64 = db.rows.iter().filter(|r| r.kind == "income").map(|r| r.amount).sum();
    let expense: f64 = db.rows.iter().filter(|r| r.kind == "expense").map(|r| r.amount).sum();

    let mut by_category: Vec<(String, f64)> = Vec::new();
    for row in db.rows.iter().filter(|r| r.kind == "expense") {
        match by_category.iter_mut().find(|(c, _)| *c == row.category) {
            Some((_, total)) => *total += row.amount,
            None => by_category.push((row.category.clone(), row.amount)),
        }
    }

    Json(json!({
        "income": income,
        "expense": expense,
        "balance": income - expense,
        "byCategory": by_category
            .iter()
            .map(|(category, total)| json!({ "category": category, "total": format!("{:.2}", total) }))
            .collect::<Vec<_>>(),
    }))
    .into_response()
}

/// Keeps the last thing rendered on each surface
#[derive(Default)]
pub struct RecordingRenderer {
    pub rows: RefCell<Vec<ExpenseRow>>,
    pub filter: RefCell<FilterOptions>,
    pub figures: RefCell<Option<SummaryFigures>>,
    pub form: RefCell<Option<ExpenseForm>>,
    pub notices: RefCell<Vec<Notice>>,
}

impl RecordingRenderer {
    pub fn row_titles(&self) -> Vec<String> {
        self.rows.borrow().iter().map(|r| r.title.clone()).collect()
    }

    pub fn categories(&self) -> Vec<String> {
        self.filter.borrow().categories().map(str::to_string).collect()
    }

    pub fn last_notice(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }
}

impl Renderer for RecordingRenderer {
    fn render_rows(&self, rows: &[ExpenseRow]) {
        *self.rows.borrow_mut() = rows.to_vec();
    }

    fn render_filter(&self, options: &FilterOptions) {
        *self.filter.borrow_mut() = options.clone();
    }

    fn render_summary(&self, figures: &SummaryFigures) {
        *self.figures.borrow_mut() = Some(figures.clone());
    }

    fn render_form(&self, form: &ExpenseForm) {
        *self.form.borrow_mut() = Some(form.clone());
    }

    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

/// Counts constructed and destroyed charts
#[derive(Default)]
pub struct CountingChart {
    next_id: u32,
    pub alive: Vec<u32>,
    pub created: usize,
    pub destroyed: usize,
    pub last: Option<ChartConfig>,
}

impl ChartSink for CountingChart {
    type Handle = u32;

    fn create(&mut self, config: &ChartConfig) -> Option<u32> {
        self.next_id += 1;
        self.created += 1;
        self.alive.push(self.next_id);
        self.last = Some(config.clone());
        Some(self.next_id)
    }

    fn destroy(&mut self, handle: u32) {
        self.destroyed += 1;
        self.alive.retain(|h| *h != handle);
    }
}

pub fn seed_rows() -> Vec<Row> {
    vec![
        Row::new(1, "Coffee", 4.5, "2024-03-02", "Food", "expense"),
        Row::new(2, "Salary", 2000.0, "2024-03-01", "Work", "income"),
    ]
}
