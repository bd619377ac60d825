//! Catalog loading and purchase-gate behavior against mock collaborators.

#![allow(clippy::unwrap_used)]

use httpmock::Method::GET;
use httpmock::MockServer;
use serde_json::json;
use url::Url;

use mathmarket_core::{Email, ProductId};
use mathmarket_storefront::api::PurchasesClient;
use mathmarket_storefront::catalog::CategoryFilter;
use mathmarket_storefront::gate::{Presentation, PurchaseGate};
use mathmarket_storefront::notify::NoticeLevel;
use mathmarket_storefront::state::AddToCart;
use mathmarket_integration_tests::{PRODUCTS_PATH, PURCHASES_PATH, TestShop, product_json};

fn purchase_json(product_id: i64) -> serde_json::Value {
    json!({
        "id": product_id,
        "product_id": product_id,
        "product_title": format!("Sheet {product_id}"),
        "product_price": 299,
        "full_pdf_with_answers_url": "",
        "full_pdf_without_answers_url": "",
        "created_at": "",
    })
}

#[tokio::test]
async fn test_catalog_loads_and_filters() {
    let server = MockServer::start_async().await;
    let _products = server
        .mock_async(|when, then| {
            when.method(GET).path(PRODUCTS_PATH);
            then.status(200).json_body(json!([
                product_json(1, "Fractions and Percentages", 299),
                product_json(2, "Equations Trainer", 199),
            ]));
        })
        .await;

    let mut shop = TestShop::start(&server);
    shop.shop.load_catalog().await;

    assert_eq!(shop.shop.catalog().products().len(), 2);
    let hits = shop.shop.filtered_products(CategoryFilter::All, "eQuAtIoNs");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id.as_i64(), 2);
}

#[tokio::test]
async fn test_catalog_failure_degrades_to_empty_with_notice() {
    let server = MockServer::start_async().await;
    let _products = server
        .mock_async(|when, then| {
            when.method(GET).path(PRODUCTS_PATH);
            then.status(500).json_body(json!({"error": "boom"}));
        })
        .await;

    let mut shop = TestShop::start(&server);
    shop.shop.load_catalog().await;

    assert!(shop.shop.catalog().products().is_empty());
    let notices = shop.notices.take();
    assert!(
        notices
            .iter()
            .any(|n| n.level == NoticeLevel::Error && n.message == "Failed to load the catalog")
    );
}

#[tokio::test]
async fn test_purchased_wins_over_in_cart() {
    let server = MockServer::start_async().await;
    let _products = server
        .mock_async(|when, then| {
            when.method(GET).path(PRODUCTS_PATH);
            then.status(200).json_body(json!([
                product_json(7, "Sheet 7", 299),
                product_json(9, "Sheet 9", 199),
            ]));
        })
        .await;
    let _purchases = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(PURCHASES_PATH)
                .query_param("email", "owner@example.com");
            then.status(200)
                .json_body(json!({"purchases": [purchase_json(7)]}));
        })
        .await;

    let mut shop = TestShop::start(&server);
    shop.shop.load_catalog().await;

    // Product 9 goes in normally; 7 was bought in an earlier session that
    // left it in the cart snapshot, which the gate must override.
    assert_eq!(shop.shop.add_to_cart(ProductId::new(7)), AddToCart::Added);
    assert_eq!(shop.shop.add_to_cart(ProductId::new(9)), AddToCart::Added);

    let email = Email::parse("owner@example.com").unwrap();
    let client = PurchasesClient::new(Url::parse(&server.url(PURCHASES_PATH)).unwrap());
    let mut gate = PurchaseGate::new();
    gate.refresh(&client, &email).await;

    assert_eq!(
        gate.presentation(ProductId::new(7), shop.shop.cart()),
        Presentation::Purchased
    );
    assert_eq!(
        gate.presentation(ProductId::new(9), shop.shop.cart()),
        Presentation::InCart
    );
}

#[tokio::test]
async fn test_gate_refresh_failure_keeps_previous_facts() {
    let server = MockServer::start_async().await;
    let purchases = server
        .mock_async(|when, then| {
            when.method(GET).path(PURCHASES_PATH);
            then.status(200)
                .json_body(json!({"purchases": [purchase_json(7)]}));
        })
        .await;

    let email = Email::parse("owner@example.com").unwrap();
    let client = PurchasesClient::new(Url::parse(&server.url(PURCHASES_PATH)).unwrap());
    let mut gate = PurchaseGate::new();
    gate.refresh(&client, &email).await;
    assert!(gate.is_purchased(ProductId::new(7)));

    // The collaborator goes down; the gate keeps what it knew.
    purchases.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(PURCHASES_PATH);
            then.status(500).json_body(json!({"error": "down"}));
        })
        .await;

    gate.refresh(&client, &email).await;
    assert!(gate.is_purchased(ProductId::new(7)));
}

#[tokio::test]
async fn test_catalog_stats_bypass_the_cache() {
    let server = MockServer::start_async().await;
    let _products = server
        .mock_async(|when, then| {
            when.method(GET).path(PRODUCTS_PATH).query_param("stats", "true");
            then.status(200)
                .json_body(json!({"total_products": 42, "total_files": 126}));
        })
        .await;

    let shop = TestShop::start(&server);
    let stats = shop.shop.catalog_stats().await.unwrap();
    assert_eq!(stats.total_products, 42);
    assert_eq!(stats.total_files, 126);
}
