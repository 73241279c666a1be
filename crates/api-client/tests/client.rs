//! End-to-end behaviour against an in-process mock storefront

mod common;

use common::{Canned, MockVendor, API_PREFIX};
use picnic_api_client::endpoints::auth::legacy_secret;
use picnic_api_client::models::{DeliveryStatus, ImageSize, TwoFactorChannel};
use picnic_api_client::{ApiError, ApiRequest, ClientConfig, ResponseData, ResponseSchema};
use serde_json::{json, Value};

fn two_level_page() -> Value {
    json!({
        "children": [
            {
                "id": "search-results",
                "children": [
                    {"content": {"selling_unit": {"id": "s1001524", "name": "Affligem blond", "display_price": 1349}}},
                    {"content": {"selling_unit": {"id": "s1084031", "name": "Affligem blond 6-pack"}}}
                ]
            }
        ]
    })
}

fn three_level_page() -> Value {
    json!({
        "body": {
            "child": {
                "children": [
                    {
                        "children": [
                            {
                                "children": [
                                    {
                                        "content": {"sellingUnit": {"id": "s1001524", "name": "Affligem blond"}},
                                        "tracking": {"sole_article_id": "11295810"}
                                    }
                                ]
                            }
                        ]
                    }
                ]
            }
        }
    })
}

// --- authentication ---

#[tokio::test]
async fn login_stores_token_from_header() {
    let vendor = MockVendor::start().await;
    vendor.respond(
        "/user/login",
        Canned::json(json!({"user_id": "u-42", "second_factor_authentication_required": false}))
            .with_header("x-picnic-auth", "token-abc"),
    );

    let client = vendor.client();
    let result = client.login("user@example.com", "password").await.unwrap();

    assert_eq!(result.auth_key, "token-abc");
    assert_eq!(result.user_id.as_deref(), Some("u-42"));
    assert!(!result.second_factor_authentication_required);
    assert_eq!(client.auth_key().as_deref(), Some("token-abc"));

    let request = vendor.last_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, format!("{API_PREFIX}/user/login"));
    assert_eq!(
        request.json(),
        json!({
            "key": "user@example.com",
            "secret": "5f4dcc3b5aa765d61d8327deb882cf99",
            "client_id": 1
        })
    );
}

#[tokio::test]
async fn login_with_bad_credentials_is_auth_error() {
    let vendor = MockVendor::start().await;
    vendor.respond(
        "/user/login",
        Canned::json(json!({"error": {"code": "AUTH_INVALID_CRED", "message": "Invalid credentials"}}))
            .with_status(401),
    );

    let client = vendor.client();
    let err = client.login("user@example.com", "wrong").await.unwrap_err();

    assert!(matches!(err, ApiError::Auth(_)));
    assert_eq!(err.to_string(), "Login failed: Invalid credentials");
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn login_without_token_header_is_auth_error() {
    let vendor = MockVendor::start().await;
    vendor.respond("/user/login", Canned::json(json!({"user_id": "u-42"})));

    let client = vendor.client();
    let err = client.login("user@example.com", "password").await.unwrap_err();

    assert!(matches!(err, ApiError::Auth(_)));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn login_keeps_token_when_body_is_unexpected() {
    for body in [
        br#"{"user_id":42,"second_factor_authentication_required":false}"#.to_vec(),
        b"\n".to_vec(),
        b"OK".to_vec(),
    ] {
        let vendor = MockVendor::start().await;
        vendor.respond(
            "/user/login",
            Canned::raw(200, body).with_header("x-picnic-auth", "token-abc"),
        );

        let client = vendor.client();
        let result = client.login("user@example.com", "password").await.unwrap();

        assert_eq!(result.auth_key, "token-abc");
        assert_eq!(client.auth_key().as_deref(), Some("token-abc"));
    }
}

#[tokio::test]
async fn login_error_envelope_without_message_uses_status_text() {
    let vendor = MockVendor::start().await;
    vendor.respond(
        "/user/login",
        Canned::json(json!({"error": {"code": "AUTH_BLOCKED"}})).with_status(403),
    );

    let err = vendor
        .client()
        .login("user@example.com", "password")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Login failed: Forbidden");
}

#[tokio::test]
async fn login_reports_second_factor_requirement() {
    let vendor = MockVendor::start().await;
    vendor.respond(
        "/user/login",
        Canned::json(json!({"user_id": "u-42", "second_factor_authentication_required": true}))
            .with_header("x-picnic-auth", "pre-2fa"),
    );

    let result = vendor.client().login("user@example.com", "password").await.unwrap();
    assert!(result.second_factor_authentication_required);
}

#[tokio::test]
async fn verify_2fa_replaces_token() {
    let vendor = MockVendor::start().await;
    vendor.respond("/user/2fa/generate", Canned::raw(200, ""));
    vendor.respond(
        "/user/2fa/verify",
        Canned::raw(200, "").with_header("x-picnic-auth", "post-2fa"),
    );

    let client = vendor.client_with(ClientConfig::default().with_auth_key("pre-2fa"));
    client
        .auth()
        .generate_2fa_code(TwoFactorChannel::Sms)
        .await
        .unwrap();
    let generate = vendor.last_request();
    assert_eq!(generate.json(), json!({"channel": "SMS"}));
    assert_eq!(generate.header("x-picnic-did"), Some("3C417201548B2E3B"));

    client.auth().verify_2fa_code("123456").await.unwrap();
    assert_eq!(vendor.last_request().json(), json!({"otp": "123456"}));
    assert_eq!(client.auth_key().as_deref(), Some("post-2fa"));
}

#[tokio::test]
async fn logout_clears_token() {
    let vendor = MockVendor::start().await;
    vendor.respond("/user/logout", Canned::raw(200, ""));

    let client = vendor.client_with(ClientConfig::default().with_auth_key("token-abc"));
    client.logout().await.unwrap();

    assert!(!client.is_authenticated());
    assert_eq!(vendor.last_request().header("x-picnic-auth"), Some("token-abc"));
}

#[tokio::test]
async fn logout_clears_token_even_when_vendor_fails() {
    let vendor = MockVendor::start().await;
    vendor.respond("/user/logout", Canned::raw(500, ""));

    let client = vendor.client_with(ClientConfig::default().with_auth_key("token-abc"));
    assert!(client.logout().await.is_err());
    assert!(!client.is_authenticated());
}

// --- headers and bodies ---

#[tokio::test]
async fn pre_supplied_token_is_sent_verbatim() {
    let vendor = MockVendor::start().await;
    vendor.respond("/cart", Canned::json(json!({"type": "ORDER", "id": "shopping_cart", "items": []})));

    let client = vendor.client_with(ClientConfig::default().with_auth_key("eyJhbGciOi.token"));
    let cart = client.cart().get().await.unwrap();
    assert_eq!(cart.id, "shopping_cart");

    let request = vendor.last_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.header("x-picnic-auth"), Some("eyJhbGciOi.token"));
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn unauthenticated_requests_carry_no_token() {
    let vendor = MockVendor::start().await;
    vendor.respond("/suggest", Canned::json(json!([])));

    vendor.client().catalog().suggestions("melk").await.unwrap();
    assert_eq!(vendor.last_request().header("x-picnic-auth"), None);
}

#[tokio::test]
async fn client_headers_are_always_present() {
    let vendor = MockVendor::start().await;
    vendor.respond("/cart/add_product", Canned::json(json!({"id": "shopping_cart"})));

    let anonymous = vendor.client();
    let authenticated = vendor.client_with(ClientConfig::default().with_auth_key("token-abc"));

    for client in [anonymous, authenticated] {
        client.cart().add_product("s1018620", 2).await.unwrap();

        let request = vendor.last_request();
        assert_eq!(request.header("user-agent"), Some("okhttp/3.12.2"));
        assert_eq!(
            request.header("content-type"),
            Some("application/json; charset=UTF-8")
        );
        assert_eq!(request.json(), json!({"product_id": "s1018620", "count": 2}));
    }
    assert_eq!(vendor.last_request().header("x-picnic-auth"), Some("token-abc"));
}

#[tokio::test]
async fn device_headers_only_on_flagged_endpoints() {
    let vendor = MockVendor::start().await;
    vendor.respond("/messages", Canned::json(json!([])));
    vendor.respond("/user", Canned::json(json!({"user_id": "u-42"})));

    let client = vendor.client();
    client.user().messages().await.unwrap();
    let flagged = vendor.last_request();
    assert_eq!(flagged.header("x-picnic-agent"), Some("30100;1.15.77-10293"));
    assert_eq!(flagged.header("x-picnic-did"), Some("3C417201548B2E3B"));

    client.user().details().await.unwrap();
    let plain = vendor.last_request();
    assert_eq!(plain.header("x-picnic-agent"), None);
    assert_eq!(plain.header("x-picnic-did"), None);
}

#[tokio::test]
async fn search_term_is_percent_encoded() {
    let vendor = MockVendor::start().await;
    vendor.respond("/pages/search-page-results", Canned::json(two_level_page()));

    vendor.client().catalog().search("kaas & wijn").await.unwrap();
    assert_eq!(
        vendor.last_request().query.as_deref(),
        Some("search_term=kaas%20%26%20wijn")
    );
}

#[tokio::test]
async fn delivery_filter_is_the_request_body() {
    let vendor = MockVendor::start().await;
    vendor.respond(
        "/deliveries/summary",
        Canned::json(json!([{"delivery_id": "d-1", "status": "CURRENT"}])),
    );

    let deliveries = vendor
        .client()
        .deliveries()
        .list(&[DeliveryStatus::Current])
        .await
        .unwrap();

    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].status_kind(), Some(DeliveryStatus::Current));
    assert_eq!(vendor.last_request().json(), json!(["CURRENT"]));
}

// --- search and scraping ---

#[tokio::test]
async fn search_two_level_page() {
    let vendor = MockVendor::start().await;
    vendor.respond("/pages/search-page-results", Canned::json(two_level_page()));

    let client = vendor.client_with(ClientConfig::default().with_api_version("15"));
    let units = client.catalog().search("affligem").await.unwrap();

    let ids: Vec<_> = units.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, ["s1001524", "s1084031"]);
    assert_eq!(units[0].display_price, Some(1349));
}

#[tokio::test]
async fn search_three_level_page() {
    let vendor = MockVendor::start().await;
    vendor.respond("/pages/search-page-results", Canned::json(three_level_page()));

    let units = vendor.client().catalog().search("affligem").await.unwrap();

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].id, "s1001524");
    assert_eq!(units[0].sole_article_id.as_deref(), Some("11295810"));
}

#[tokio::test]
async fn legacy_schema_misses_deep_units() {
    let vendor = MockVendor::start().await;
    vendor.respond("/pages/search-page-results", Canned::json(three_level_page()));

    let client =
        vendor.client_with(ClientConfig::default().with_response_schema(ResponseSchema::Legacy));
    assert!(client.catalog().search("affligem").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_survives_field_type_drift() {
    let vendor = MockVendor::start().await;
    vendor.respond(
        "/pages/search-page-results",
        Canned::json(json!({
            "children": [
                {
                    "children": [
                        {"content": {"selling_unit": {"id": "s1001524", "display_price": 1349}}},
                        {"content": {"selling_unit": {"id": "s1084031", "display_price": 1.5, "sole_article_id": 11295810}}}
                    ]
                }
            ]
        })),
    );

    let units = vendor.client().catalog().search("x").await.unwrap();

    assert_eq!(units.len(), 2);
    assert_eq!(units[0].display_price, Some(1349));
    assert_eq!(units[1].display_price, None);
    assert_eq!(units[1].sole_article_id.as_deref(), Some("11295810"));
}

#[tokio::test]
async fn search_on_non_object_page_is_parse_error() {
    let vendor = MockVendor::start().await;
    vendor.respond("/pages/search-page-results", Canned::json(json!([1, 2, 3])));

    let err = vendor.client().catalog().search("x").await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn bundle_ids_are_scraped_in_order() {
    let vendor = MockVendor::start().await;
    vendor.respond(
        "/pages/bundle-overview-page",
        Canned::json(json!({
            "body": {"children": [
                {"id": "product-page-bundle-item-s1001524"},
                {"id": "product-page-bundle-item-s1084031"},
                {"id": "product-page-bundle-item-s1001524"}
            ]}
        })),
    );

    let ids = vendor
        .client()
        .catalog()
        .bundle_article_ids("11295810")
        .await
        .unwrap();

    assert_eq!(ids, ["s1001524", "s1084031"]);
    assert_eq!(
        vendor.last_request().query.as_deref(),
        Some("sole_article_id=11295810")
    );
}

#[tokio::test]
async fn missing_bundles_is_parse_error() {
    let vendor = MockVendor::start().await;
    vendor.respond("/pages/bundle-overview-page", Canned::json(json!({"body": {}})));

    let err = vendor
        .client()
        .catalog()
        .bundle_article_ids("11295810")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Parse(ref msg) if msg.contains("11295810")));
}

// --- images ---

#[tokio::test]
async fn image_is_fetched_outside_api_prefix() {
    let vendor = MockVendor::start().await;
    let png = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a];
    vendor.respond_absolute(
        "/static/images/abc123/medium.png",
        Canned::raw(200, png.clone()).with_header("content-type", "image/png"),
    );

    let client = vendor.client();
    let bytes = client.catalog().image("abc123", ImageSize::Medium).await.unwrap();
    assert_eq!(bytes.as_ref(), png.as_slice());

    let uri = client
        .catalog()
        .image_as_data_uri("abc123", ImageSize::Medium)
        .await
        .unwrap();
    assert_eq!(uri, "data:image/png;base64,iVBORw0K");
}

// --- errors and raw dispatch ---

#[tokio::test]
async fn error_envelope_becomes_http_error() {
    let vendor = MockVendor::start().await;
    vendor.respond(
        "/deliveries/d-1/rating",
        Canned::json(json!({"error": {"code": "RATING_EXISTS", "message": "Delivery already rated"}}))
            .with_status(400),
    );

    let err = vendor
        .client()
        .deliveries()
        .set_rating("d-1", 9)
        .await
        .unwrap_err();

    match err {
        ApiError::Http {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 400);
            assert_eq!(code.as_deref(), Some("RATING_EXISTS"));
            assert_eq!(message, "Delivery already rated");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn error_envelope_without_message_keeps_code() {
    let vendor = MockVendor::start().await;
    vendor.respond(
        "/cart/set_delivery_slot",
        Canned::json(json!({"error": {"code": "SLOT_TAKEN"}})).with_status(409),
    );

    let err = vendor
        .client()
        .cart()
        .set_delivery_slot("slot-1")
        .await
        .unwrap_err();

    match err {
        ApiError::Http {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 409);
            assert_eq!(code.as_deref(), Some("SLOT_TAKEN"));
            assert_eq!(message, "Conflict");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn error_without_envelope_uses_status_text() {
    let vendor = MockVendor::start().await;
    vendor.respond("/user", Canned::raw(503, "<html>down</html>"));

    let err = vendor.client().user().details().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.to_string(), "API error (503): Service Unavailable");
    assert!(err.is_server_error());
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let vendor = MockVendor::start().await;

    let err = vendor.client().user().reminders().await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let vendor = MockVendor::start().await;
    vendor.respond("/order/delivery/d-1/cancel", Canned::raw(200, ""));

    let value = vendor.client().deliveries().cancel("d-1").await.unwrap();
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn send_request_reaches_unwrapped_routes() {
    let vendor = MockVendor::start().await;
    vendor.respond("/recipes/r-1", Canned::json(json!({"id": "r-1"})));

    let data = vendor
        .client()
        .send_request(ApiRequest::get("/recipes/r-1"))
        .await
        .unwrap();

    assert!(matches!(data, ResponseData::Json(ref v) if v["id"] == "r-1"));
}

#[tokio::test]
async fn clones_share_login() {
    let vendor = MockVendor::start().await;
    vendor.respond(
        "/user/login",
        Canned::raw(200, "").with_header("x-picnic-auth", "shared-token"),
    );
    vendor.respond("/cart", Canned::json(json!({"id": "shopping_cart"})));

    let client = vendor.client();
    let cart = client.cart();
    client.login("user@example.com", "password").await.unwrap();
    cart.get().await.unwrap();

    assert_eq!(vendor.last_request().header("x-picnic-auth"), Some("shared-token"));
    assert_eq!(
        vendor.requests()[0].json()["secret"],
        Value::String(legacy_secret("password"))
    );
}
