//! Integration tests for the catalog client: query construction, the
//! local page cache (read-after-write patches), and the loading/error
//! bracket around every operation.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shop_admin::auth::token_store::TokenStore;
use shop_admin::net;
use shop_admin::products::types::{InventoryStatus, Product, ProductQuery};
use shop_admin::products::CatalogClient;

fn temp_store() -> Arc<TokenStore> {
    let path = std::env::temp_dir()
        .join(format!("shopctl-it-{}", uuid::Uuid::new_v4()))
        .join("token");
    Arc::new(TokenStore::new(path))
}

async fn catalog_for(server: &MockServer) -> CatalogClient {
    let client = net::build_client(&server.uri(), temp_store()).unwrap();
    CatalogClient::new(client, &server.uri())
}

fn product_json(id: i64, code: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "version": 0,
        "code": code,
        "name": name,
        "category": "Peripherals",
        "price": 29.9,
        "quantity": 120,
        "inventoryStatus": "INSTOCK",
        "rating": 4.0
    })
}

fn page_json(items: Vec<serde_json::Value>, total_elements: u64) -> serde_json::Value {
    json!({
        "content": items,
        "totalElements": total_elements,
        "totalPages": 5,
        "size": 12,
        "number": 0
    })
}

fn sample_payload(code: &str, name: &str) -> Product {
    Product {
        id: None,
        version: None,
        code: code.into(),
        name: name.into(),
        description: None,
        image: None,
        category: Some("Peripherals".into()),
        price: 29.9,
        quantity: Some(120),
        internal_reference: None,
        shell_id: None,
        inventory_status: Some(InventoryStatus::InStock),
        rating: None,
    }
}

#[tokio::test]
async fn list_with_empty_query_sends_defaults_and_omits_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "0"))
        .and(query_param("size", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 0)))
        .expect(1)
        .mount(&server)
        .await;

    let mut catalog = catalog_for(&server).await;
    catalog.list(&ProductQuery::default()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let keys: Vec<String> = requests[0]
        .url
        .query_pairs()
        .map(|(k, _)| k.into_owned())
        .collect();
    assert_eq!(keys, vec!["page", "size"]);
}

#[tokio::test]
async fn list_transmits_trimmed_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "1"))
        .and(query_param("size", "24"))
        .and(query_param("category", "Peripherals"))
        .and(query_param("q", "mouse"))
        .and(query_param("status", "LOWSTOCK"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 0)))
        .expect(1)
        .mount(&server)
        .await;

    let mut catalog = catalog_for(&server).await;
    catalog
        .list(&ProductQuery {
            page: Some(1),
            size: Some(24),
            category: Some(" Peripherals ".into()),
            q: Some("mouse".into()),
            status: Some("LOWSTOCK".into()),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn list_replaces_items_and_page_wholesale() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![product_json(1, "P-1", "Mouse"), product_json(2, "P-2", "Keyboard")],
            57,
        )))
        .mount(&server)
        .await;

    let mut catalog = catalog_for(&server).await;
    catalog.list(&ProductQuery::default()).await.unwrap();

    assert_eq!(catalog.products().len(), 2);
    let page = catalog.page().unwrap();
    assert_eq!(page.total_elements, 57);
    assert_eq!(page.size, 12);
    assert!(!catalog.loading());
    assert!(catalog.error().is_none());
}

#[tokio::test]
async fn create_prepends_item_and_increments_total() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![product_json(1, "P-1", "Mouse"), product_json(2, "P-2", "Keyboard")],
            57,
        )))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(product_json(3, "P-3", "Headset")),
        )
        .mount(&server)
        .await;

    let mut catalog = catalog_for(&server).await;
    catalog.list(&ProductQuery::default()).await.unwrap();
    let created = catalog.create(&sample_payload("P-3", "Headset")).await.unwrap();

    assert_eq!(created.id, Some(3));
    assert_eq!(catalog.products().len(), 3);
    assert_eq!(catalog.products()[0].id, Some(3));
    assert_eq!(catalog.page().unwrap().total_elements, 58);
}

#[tokio::test]
async fn create_before_any_list_leaves_page_metadata_absent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(product_json(9, "P-9", "Webcam")),
        )
        .mount(&server)
        .await;

    let mut catalog = catalog_for(&server).await;
    catalog.create(&sample_payload("P-9", "Webcam")).await.unwrap();

    assert_eq!(catalog.products().len(), 1);
    assert!(catalog.page().is_none());
}

#[tokio::test]
async fn update_replaces_matching_item_in_place() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![product_json(1, "P-1", "Mouse"), product_json(2, "P-2", "Keyboard")],
            57,
        )))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/products/2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(product_json(2, "P-2", "Mechanical Keyboard")),
        )
        .mount(&server)
        .await;

    let mut catalog = catalog_for(&server).await;
    catalog.list(&ProductQuery::default()).await.unwrap();
    catalog
        .update(2, &sample_payload("P-2", "Mechanical Keyboard"))
        .await
        .unwrap();

    assert_eq!(catalog.products().len(), 2);
    assert_eq!(catalog.products()[1].name, "Mechanical Keyboard");
    // Page metadata is untouched by updates.
    assert_eq!(catalog.page().unwrap().total_elements, 57);
}

#[tokio::test]
async fn delete_removes_item_and_decrements_total() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![product_json(1, "P-1", "Mouse"), product_json(2, "P-2", "Keyboard")],
            57,
        )))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/products/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let mut catalog = catalog_for(&server).await;
    catalog.list(&ProductQuery::default()).await.unwrap();
    catalog.delete(1).await.unwrap();

    assert_eq!(catalog.products().len(), 1);
    assert_eq!(catalog.products()[0].id, Some(2));
    assert_eq!(catalog.page().unwrap().total_elements, 56);
}

#[tokio::test]
async fn delete_of_unknown_id_removes_nothing_and_floors_count_at_zero() {
    let server = MockServer::start().await;

    // A page whose counter is already at zero, so the decrement must floor.
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![product_json(1, "P-1", "Mouse")], 0)),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/products/99"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let mut catalog = catalog_for(&server).await;
    catalog.list(&ProductQuery::default()).await.unwrap();
    catalog.delete(99).await.unwrap();

    assert_eq!(catalog.products().len(), 1);
    assert_eq!(catalog.page().unwrap().total_elements, 0);
}

#[tokio::test]
async fn get_by_id_does_not_mutate_the_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![product_json(1, "P-1", "Mouse")], 57)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(product_json(2, "P-2", "Keyboard")),
        )
        .mount(&server)
        .await;

    let mut catalog = catalog_for(&server).await;
    catalog.list(&ProductQuery::default()).await.unwrap();
    let fetched = catalog.get_by_id(2).await.unwrap();

    assert_eq!(fetched.id, Some(2));
    assert_eq!(catalog.products().len(), 1);
    assert_eq!(catalog.page().unwrap().total_elements, 57);
}

#[tokio::test]
async fn failed_operation_records_readable_message_and_reraises() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "businessErrorCode": 308,
            "error": "Product code already exists"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 0)))
        .mount(&server)
        .await;

    let mut catalog = catalog_for(&server).await;

    let err = catalog.create(&sample_payload("P-1", "Mouse")).await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(409));
    assert_eq!(catalog.error(), Some("Product code already exists"));
    assert!(!catalog.loading());
    // The failed create did not touch the local list.
    assert!(catalog.products().is_empty());

    // The next operation clears the recorded error.
    catalog.list(&ProductQuery::default()).await.unwrap();
    assert!(catalog.error().is_none());
}
