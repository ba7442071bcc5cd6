mod common;

use common::{dead_origin, seed_rows, stalled_origin, FakeBackend};
use expense_tracker::api::{ApiBase, ApiClient, ApiError, ReqwestTransport, UrlBuilder};
use expense_tracker::model::{EntryType, ExpenseId, ExpenseInput};

fn client(base: &str, origin: Option<&str>) -> ApiClient<ReqwestTransport> {
    client_with_timeout(base, origin, 2_000)
}

fn client_with_timeout(base: &str, origin: Option<&str>, timeout_ms: u64) -> ApiClient<ReqwestTransport> {
    let urls = UrlBuilder::new(ApiBase::from_setting(Some(base)), origin).unwrap();
    ApiClient::new(ReqwestTransport::new(timeout_ms).unwrap(), urls)
}

fn rent() -> ExpenseInput {
    ExpenseInput {
        title: "Rent".to_string(),
        amount: 900.0,
        date: "2024-04-01".to_string(),
        category: "Housing".to_string(),
        entry_type: EntryType::Expense,
    }
}

#[tokio::test]
async fn test_list_decodes_decimal_strings() {
    let backend = FakeBackend::spawn(seed_rows()).await;
    let api = client(&backend.api_base(), None);

    let items = api.list(None).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Coffee");
    assert_eq!(items[0].amount, 4.5);
    assert_eq!(items[1].amount, 2000.0);
    assert_eq!(items[1].entry_type, EntryType::Income);
}

#[tokio::test]
async fn test_relative_base_resolves_against_origin() {
    let backend = FakeBackend::spawn(seed_rows()).await;
    let api = client("api/", Some(&backend.origin()));

    let summary = api.summary().await.unwrap();

    assert_eq!(summary.income, 2000.0);
    assert_eq!(summary.balance, 1995.5);
    assert_eq!(summary.by_category.len(), 1);
    assert_eq!(summary.by_category[0].total, 4.5);
    assert_eq!(backend.requests(), vec!["GET /api/summary"]);
}

#[tokio::test]
async fn test_create_returns_ack() {
    let backend = FakeBackend::spawn(seed_rows()).await;
    let api = client(&backend.api_base(), None);

    let ack = api.create(&rent()).await.unwrap().unwrap();

    assert_eq!(ack.id, Some(ExpenseId::from(3)));
    assert_eq!(backend.rows().len(), 3);
}

#[tokio::test]
async fn test_update_and_delete() {
    let backend = FakeBackend::spawn(seed_rows()).await;
    let api = client(&backend.api_base(), None);

    api.update(&ExpenseId::from(1), &rent()).await.unwrap();
    assert_eq!(backend.rows()[0].title, "Rent");

    api.delete(&ExpenseId::from(1)).await.unwrap();
    assert_eq!(backend.rows().len(), 1);
    assert_eq!(
        backend.requests(),
        vec!["PUT /api/expenses/1", "DELETE /api/expenses/1"]
    );
}

#[tokio::test]
async fn test_rejection_carries_body() {
    let backend = FakeBackend::spawn(seed_rows()).await;
    let api = client(&backend.api_base(), None);

    let input = ExpenseInput {
        title: "  ".to_string(),
        ..rent()
    };
    let err = api.create(&input).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("This field is required."));
}

#[tokio::test]
async fn test_unavailable_backend_is_status_error() {
    let backend = FakeBackend::spawn(seed_rows()).await;
    backend.set_unavailable(true);
    let api = client(&backend.api_base(), None);

    let err = api.list(Some("Food")).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            status: 503,
            message: "backend unavailable".to_string()
        }
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let api = client(&format!("{}/api", dead_origin().await), None);

    let err = api.summary().await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn test_stalled_backend_is_timeout_error() {
    let api = client_with_timeout(&format!("{}/api", stalled_origin().await), None, 300);

    let err = api.list(None).await.unwrap_err();

    assert_eq!(err, ApiError::Timeout(300));
}
