//! Integration tests for the catalog pages and the session cart.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use vitrine_integration_tests::TestContext;

const HX: (&str, &str) = ("HX-Request", "true");

async fn add(ctx: &TestContext, product_id: &str, quantity: &str) -> reqwest::Response {
    ctx.client
        .post(ctx.url("/cart/add"))
        .form(&[("product_id", product_id), ("quantity", quantity)])
        .send()
        .await
        .unwrap()
}

async fn cart_page(ctx: &TestContext) -> String {
    let resp = ctx.client.get(ctx.url("/cart")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.text().await.unwrap()
}

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;
    let resp = ctx.client.get(ctx.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_home_lists_catalog() {
    let ctx = TestContext::new().await;
    let body = ctx
        .client
        .get(ctx.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Classic Tee"));
    assert!(body.contains("$20.00"));
    assert!(body.contains("Ceramic Mug"));
    assert!(body.contains("href=\"/products/tee\""));
    assert!(body.contains("data-image-state=\"pending\""));
}

#[tokio::test]
async fn test_product_detail() {
    let ctx = TestContext::new().await;

    let resp = ctx.client.get(ctx.url("/products/tee")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Soft cotton tee."));
    assert!(body.contains("fetchpriority=\"high\""));
    assert!(body.contains("name=\"quantity\""));

    let resp = ctx
        .client
        .get(ctx.url("/products/missing"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_cart() {
    let ctx = TestContext::new().await;
    let body = cart_page(&ctx).await;

    assert!(body.contains("Your cart is empty"));
    assert!(body.contains("id=\"cart-count\""));
}

#[tokio::test]
async fn test_plain_add_redirects_to_cart() {
    let ctx = TestContext::new().await;

    let resp = add(&ctx, "tee", "2").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/cart");

    let resp = add(&ctx, "tee", "3").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let body = cart_page(&ctx).await;
    assert!(body.contains("Classic Tee"));
    assert!(body.contains("value=\"5\""));
    assert!(body.contains("$100.00"));
}

#[tokio::test]
async fn test_htmx_add_returns_badge() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/cart/add"))
        .header(HX.0, HX.1)
        .form(&[("product_id", "mug")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["hx-trigger"], "cart-updated");
    let body = resp.text().await.unwrap();
    assert!(body.contains("id=\"cart-count\""));
    assert!(body.contains(">1</span>"));

    let count = ctx
        .client
        .get(ctx.url("/cart/count"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(count.contains(">1</span>"));
}

#[tokio::test]
async fn test_add_unknown_product() {
    let ctx = TestContext::new().await;

    let resp = add(&ctx, "ghost", "1").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = add(&ctx, "not an id", "1").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_quantity_and_remove_with_zero() {
    let ctx = TestContext::new().await;
    add(&ctx, "tee", "1").await;
    add(&ctx, "mug", "1").await;

    let resp = ctx
        .client
        .post(ctx.url("/cart/update"))
        .header(HX.0, HX.1)
        .form(&[("product_id", "mug"), ("quantity", "4")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["hx-trigger"], "cart-updated");
    let fragment = resp.text().await.unwrap();
    assert!(fragment.contains("id=\"cart-items\""));
    assert!(fragment.contains("$50.00"));
    assert!(fragment.contains("$70.00"));

    let resp = ctx
        .client
        .post(ctx.url("/cart/update"))
        .header(HX.0, HX.1)
        .form(&[("product_id", "tee"), ("quantity", "0")])
        .send()
        .await
        .unwrap();
    let fragment = resp.text().await.unwrap();
    assert!(!fragment.contains("Classic Tee"));
    assert!(fragment.contains("Ceramic Mug"));
}

#[tokio::test]
async fn test_empty_quantity_adds_one() {
    let ctx = TestContext::new().await;

    let resp = add(&ctx, "tee", "").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let body = cart_page(&ctx).await;
    assert!(body.contains("Classic Tee"));
    assert!(body.contains("$20.00"));
    assert!(body.contains("1 item<"));
}

#[tokio::test]
async fn test_negative_quantity_update_removes_line() {
    let ctx = TestContext::new().await;
    add(&ctx, "tee", "2").await;

    let resp = ctx
        .client
        .post(ctx.url("/cart/update"))
        .header(HX.0, HX.1)
        .form(&[("product_id", "tee"), ("quantity", "-1")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["hx-trigger"], "cart-updated");
    assert!(resp.text().await.unwrap().contains("Your cart is empty"));
}

#[tokio::test]
async fn test_empty_quantity_update_keeps_line() {
    let ctx = TestContext::new().await;
    add(&ctx, "mug", "3").await;

    let resp = ctx
        .client
        .post(ctx.url("/cart/update"))
        .header(HX.0, HX.1)
        .form(&[("product_id", "mug"), ("quantity", "")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!resp.headers().contains_key("hx-trigger"));
    let fragment = resp.text().await.unwrap();
    assert!(fragment.contains("value=\"3\""));
    assert!(fragment.contains("$37.50"));
}

#[tokio::test]
async fn test_noop_add_has_no_trigger() {
    let ctx = TestContext::new().await;

    for quantity in ["0", "-4"] {
        let resp = ctx
            .client
            .post(ctx.url("/cart/add"))
            .header(HX.0, HX.1)
            .form(&[("product_id", "tee"), ("quantity", quantity)])
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(!resp.headers().contains_key("hx-trigger"));
        assert!(resp.text().await.unwrap().contains(">0</span>"));
    }
}

#[tokio::test]
async fn test_noop_mutation_has_no_trigger() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/cart/remove"))
        .header(HX.0, HX.1)
        .form(&[("product_id", "tee")])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!resp.headers().contains_key("hx-trigger"));
    assert!(resp.text().await.unwrap().contains("Your cart is empty"));
}

#[tokio::test]
async fn test_clear_cart() {
    let ctx = TestContext::new().await;
    add(&ctx, "tee", "2").await;
    add(&ctx, "mug", "1").await;

    let resp = ctx.client.post(ctx.url("/cart/clear")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let body = cart_page(&ctx).await;
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_carts_are_per_session() {
    let first = TestContext::new().await;
    add(&first, "tee", "1").await;

    let other = reqwest::Client::new();
    let body = other
        .get(first.url("/cart"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Your cart is empty"));
}
