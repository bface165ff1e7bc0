//! Incremental item loading against the wire contract.

use vitrina_client::{ApiClient, Config, FetchOutcome, ItemFilter, ItemListController};
use vitrina_core::UserId;
use vitrina_integration_tests::FakeBackend;

const PAGE: usize = 50;

fn controller(backend: &FakeBackend, user: &str) -> ItemListController<ApiClient> {
    let config = Config::for_backend(backend.base_url());
    let api = ApiClient::new(&config).expect("build client");
    ItemListController::new(api, UserId::new(user), PAGE)
}

#[tokio::test]
async fn drains_all_pages_and_stops_at_end_of_data() {
    let backend = FakeBackend::start().await;
    backend.seed_items("u-1", 120);
    let list = controller(&backend, "u-1");

    assert_eq!(
        list.activate().await.expect("first page"),
        FetchOutcome::Fetched { appended: PAGE }
    );
    let mut fetches = 1;
    while list.snapshot().has_more {
        list.notify_near_end().await.expect("next page");
        fetches += 1;
    }

    let snapshot = list.snapshot();
    assert_eq!(fetches, 3);
    assert_eq!(snapshot.rows.len(), 120);
    assert_eq!(snapshot.offset, 3 * PAGE);
    assert!(!snapshot.has_more);

    // End of data reached; further signals stay local.
    assert_eq!(
        list.notify_near_end().await.expect("ignored"),
        FetchOutcome::Skipped
    );
}

#[tokio::test]
async fn rows_arrive_flattened_and_in_server_order() {
    let backend = FakeBackend::start().await;
    backend.seed_items("u-1", 60);
    let list = controller(&backend, "u-1");

    list.activate().await.expect("first page");
    list.notify_near_end().await.expect("second page");

    let snapshot = list.snapshot();
    assert_eq!(snapshot.rows[0].sku.as_deref(), Some("XX-00000"));
    assert_eq!(snapshot.rows[59].sku.as_deref(), Some("XX-00059"));
    // Nested wire fields were projected into the display row.
    assert_eq!(snapshot.rows[0].category_label, "Rope Chains");
    assert_eq!(snapshot.rows[0].stock_count, 3);
}

#[tokio::test]
async fn short_first_page_disables_further_fetching() {
    let backend = FakeBackend::start().await;
    backend.seed_items("u-1", 7);
    let list = controller(&backend, "u-1");

    list.activate().await.expect("only page");

    let snapshot = list.snapshot();
    assert_eq!(snapshot.rows.len(), 7);
    assert!(!snapshot.has_more);
}

#[tokio::test]
async fn filtering_is_client_side_only() {
    let backend = FakeBackend::start().await;
    backend.seed_items("u-1", 30);
    let list = controller(&backend, "u-1");
    list.activate().await.expect("page");

    let filter = ItemFilter {
        category_label: Some("Diamond Rings".to_string()),
        ..ItemFilter::default()
    };
    let rows = filter.apply(&list.snapshot().rows);
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|r| r.category_label == "Diamond Rings"));

    // Applying the filter issued no further requests and lost no rows.
    assert_eq!(list.snapshot().rows.len(), 30);
}

#[tokio::test]
async fn reset_reloads_from_the_first_page() {
    let backend = FakeBackend::start().await;
    backend.seed_items("u-1", 120);
    let list = controller(&backend, "u-1");

    list.activate().await.expect("first page");
    list.notify_near_end().await.expect("second page");
    assert_eq!(list.snapshot().rows.len(), 100);

    list.reset_and_reload().await.expect("reload");

    let snapshot = list.snapshot();
    assert_eq!(snapshot.rows.len(), PAGE);
    assert_eq!(snapshot.offset, PAGE);
    assert!(snapshot.has_more);
}
