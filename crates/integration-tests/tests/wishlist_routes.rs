//! Integration tests for the wishlist pages.
//!
//! Each test builds its own in-process storefront with memory storage, so
//! tests are independent and need no running services.

use axum::http::StatusCode;
use wishlist_integration_tests::{StaticCatalog, TestContext, linen_shirt};
use wishlist_storefront::middleware::REQUEST_ID_HEADER;
use wishlist_storefront::storage::MemoryStorage;
use wishlist_storefront::wishlist::DEFAULT_STORAGE_KEY;

// =============================================================================
// Rendering
// =============================================================================

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();
    let resp = ctx.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_empty_wishlist_page() {
    let ctx = TestContext::new();
    let resp = ctx.get("/wishlist").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("MY WISHLIST"));
    assert!(resp.body.contains("0 items"));
    assert!(resp.body.contains("Your Wishlist is Empty"));
    assert!(!resp.body.contains("ADD TO CART"));
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let ctx = TestContext::new();
    let resp = ctx.get("/wishlist").await;

    assert!(resp.headers.contains_key(REQUEST_ID_HEADER));
    assert_eq!(resp.headers["x-frame-options"], "DENY");
    assert!(resp.headers.contains_key("content-security-policy"));
}

#[tokio::test]
async fn test_page_renders_stored_entries() {
    let snapshot = r#"[{"id":"P1-0-M","productId":"P1","name":"Linen Shirt","subHeader":"Relaxed fit","price":"59.50","color":"Sand","size":"M","preview":"","images":[]}]"#;
    let ctx = TestContext::with(
        MemoryStorage::with_item(DEFAULT_STORAGE_KEY, snapshot),
        StaticCatalog::new([linen_shirt()]),
    );

    let resp = ctx.get("/wishlist").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("1 item"));
    assert!(resp.body.contains("Linen Shirt"));
    assert!(resp.body.contains("$59.50"));
    assert!(resp.body.contains(r#"href="/products/P1""#));
    // No preview or images: placeholder, and no stored date: today's date
    assert!(resp.body.contains("https://via.placeholder.com/300"));
    assert!(resp.body.contains("Item added Mar 14, 2026"));
}

#[tokio::test]
async fn test_malformed_storage_renders_empty() {
    let ctx = TestContext::with(
        MemoryStorage::with_item(DEFAULT_STORAGE_KEY, "{not json"),
        StaticCatalog::new([linen_shirt()]),
    );

    let resp = ctx.get("/wishlist").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Your Wishlist is Empty"));
}

// =============================================================================
// Add / Remove
// =============================================================================

#[tokio::test]
async fn test_add_then_duplicate() {
    let ctx = TestContext::new();

    ctx.save(0, "M").await.assert_redirect("/wishlist");
    let page = ctx.get("/wishlist").await;
    assert!(page.body.contains("Added to your wishlist!"));
    assert!(page.body.contains("Item added Mar 14, 2026"));

    ctx.save(0, "M").await.assert_redirect("/wishlist");
    let page = ctx.get("/wishlist").await;
    assert!(page.body.contains("This item is already in your wishlist"));
    assert!(page.body.contains("1 item"));

    let stored = ctx.stored_entries();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id.as_str(), "P1-0-M");
    assert_eq!(stored[0].color, "Sand");
}

#[tokio::test]
async fn test_add_without_size_is_rejected() {
    let ctx = TestContext::new();

    ctx.post_form("/wishlist/add", "product_id=P1&color_index=0")
        .await
        .assert_redirect("/wishlist");

    let page = ctx.get("/wishlist").await;
    assert!(page.body.contains("Please select a size"));
    assert!(page.body.contains("Your Wishlist is Empty"));
    assert!(ctx.stored_entries().is_empty());
}

#[tokio::test]
async fn test_add_unknown_product() {
    let ctx = TestContext::new();

    ctx.post_form("/wishlist/add", "product_id=P404&size=M")
        .await
        .assert_redirect("/wishlist");

    let page = ctx.get("/wishlist").await;
    assert!(page.body.contains("That product is no longer available"));
    assert!(ctx.stored_entries().is_empty());
}

#[tokio::test]
async fn test_add_with_catalog_down_is_bad_gateway() {
    let ctx = TestContext::with(MemoryStorage::new(), StaticCatalog::failing());

    let resp = ctx.post_form("/wishlist/add", "product_id=P1&size=M").await;
    assert_eq!(resp.status, StatusCode::BAD_GATEWAY);
    assert!(ctx.stored_entries().is_empty());
}

#[tokio::test]
async fn test_add_with_blank_product_id_is_bad_request() {
    let ctx = TestContext::new();
    let resp = ctx.post_form("/wishlist/add", "product_id=++&size=M").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remove_keeps_order_of_others() {
    let ctx = TestContext::new();
    ctx.save(0, "S").await;
    ctx.save(0, "M").await;
    ctx.save(1, "L").await;

    ctx.post_form("/wishlist/P1-0-M/remove", "")
        .await
        .assert_redirect("/wishlist");

    let ids: Vec<String> = ctx
        .stored_entries()
        .iter()
        .map(|entry| entry.id.to_string())
        .collect();
    assert_eq!(ids, ["P1-0-S", "P1-1-L"]);

    // Removing an unknown id is a no-op
    ctx.post_form("/wishlist/P9-0-M/remove", "")
        .await
        .assert_redirect("/wishlist");
    assert_eq!(ctx.stored_entries().len(), 2);
}

#[tokio::test]
async fn test_entry_with_slash_in_size_is_reachable() {
    let ctx = TestContext::new();
    ctx.save(0, "S%2FM").await.assert_redirect("/wishlist");
    assert_eq!(ctx.stored_entries()[0].id.as_str(), "P1-0-S/M");

    let page = ctx.get("/wishlist").await;
    assert!(page.body.contains(r#"action="/wishlist/P1-0-S%2FM/edit""#));
    assert!(page.body.contains(r#"action="/wishlist/P1-0-S%2FM/remove""#));
    assert!(page.body.contains(r#"action="/wishlist/P1-0-S%2FM/cart""#));

    ctx.post_form("/wishlist/P1-0-S%2FM/edit", "")
        .await
        .assert_redirect("/wishlist");
    let page = ctx.get("/wishlist").await;
    assert!(page.body.contains(r#"action="/wishlist/P1-0-S%2FM/size""#));

    ctx.post_form("/wishlist/P1-0-S%2FM/size", "size=L")
        .await
        .assert_redirect("/wishlist");
    assert_eq!(ctx.stored_entries()[0].size, "L");

    ctx.post_form("/wishlist/P1-0-S%2FM/remove", "")
        .await
        .assert_redirect("/wishlist");
    assert!(ctx.stored_entries().is_empty());
}

// =============================================================================
// Edit size
// =============================================================================

#[tokio::test]
async fn test_edit_size_flow() {
    let ctx = TestContext::new();
    ctx.save(0, "M").await;
    ctx.get("/wishlist").await;

    ctx.post_form("/wishlist/P1-0-M/edit", "")
        .await
        .assert_redirect("/wishlist");

    let page = ctx.get("/wishlist").await;
    assert!(page.body.contains("Edit Linen Shirt"));
    assert!(page.body.contains(r#"<option value="S">S</option>"#));
    assert!(page.body.contains(r#"<option value="M" selected>M</option>"#));
    assert!(page.body.contains(r#"action="/wishlist/P1-0-M/size""#));

    ctx.post_form("/wishlist/P1-0-M/size", "size=L")
        .await
        .assert_redirect("/wishlist");

    let page = ctx.get("/wishlist").await;
    assert!(page.body.contains("Size updated!"));
    assert!(!page.body.contains("edit-dialog"));

    let stored = ctx.stored_entries();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].size, "L");
    assert_eq!(stored[0].id.as_str(), "P1-0-M");
}

#[tokio::test]
async fn test_cancel_edit_closes_dialog() {
    let ctx = TestContext::new();
    ctx.save(0, "M").await;
    ctx.post_form("/wishlist/P1-0-M/edit", "").await;

    ctx.post_form("/wishlist/edit/cancel", "")
        .await
        .assert_redirect("/wishlist");

    let page = ctx.get("/wishlist").await;
    assert!(!page.body.contains("edit-dialog"));
    assert_eq!(ctx.stored_entries()[0].size, "M");
}

#[tokio::test]
async fn test_edit_with_catalog_down_shows_error() {
    let snapshot = r#"[{"id":"P1-0-M","productId":"P1","name":"Linen Shirt","subHeader":"","price":"59.50","color":"Sand","size":"M","preview":"","images":[]}]"#;
    let ctx = TestContext::with(
        MemoryStorage::with_item(DEFAULT_STORAGE_KEY, snapshot),
        StaticCatalog::failing(),
    );

    ctx.post_form("/wishlist/P1-0-M/edit", "")
        .await
        .assert_redirect("/wishlist");

    let page = ctx.get("/wishlist").await;
    assert!(page.body.contains("Could not load sizes, please try again"));
    assert!(!page.body.contains("edit-dialog"));
}

// =============================================================================
// Basket handoff
// =============================================================================

#[tokio::test]
async fn test_add_to_cart_moves_entry_to_basket() {
    let ctx = TestContext::new();
    ctx.save(0, "M").await;

    ctx.post_form("/wishlist/P1-0-M/cart", "")
        .await
        .assert_redirect("/basket");

    assert!(ctx.stored_entries().is_empty());
    let lines = ctx.basket_lines().await;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].size, "M");
    assert_eq!(lines[0].color, "Sand");

    let basket = ctx.get("/basket").await;
    assert_eq!(basket.status, StatusCode::OK);
    assert!(basket.body.contains("Linen Shirt"));
    assert!(basket.body.contains("1 item"));
}

#[tokio::test]
async fn test_add_to_cart_for_missing_entry_stays_on_wishlist() {
    let ctx = TestContext::new();

    ctx.post_form("/wishlist/P1-0-M/cart", "")
        .await
        .assert_redirect("/wishlist");

    let page = ctx.get("/wishlist").await;
    assert!(page.body.contains("That item is no longer in your wishlist"));
    assert!(ctx.basket_lines().await.is_empty());
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let ctx = TestContext::new();
    let resp = ctx.get("/nope").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
