//! Request descriptors and the vendor route table
//!
//! Every endpoint wrapper is a [`Route`]; turning it into an [`ApiRequest`]
//! is a pure function, so the exact method, path, body and header flags of
//! each endpoint can be checked without a network.

use crate::models::{
    ConsentDeclaration, DeliveryStatus, ImageSize, LoginInput, ProductCountInput,
    TwoFactorChannel,
};
use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};

/// One HTTP call, described as data
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the API base URL, or an absolute URL
    pub path: String,
    /// JSON body; no body is sent when `None`
    pub body: Option<Value>,
    /// Attach `x-picnic-agent` and `x-picnic-did`
    pub device_headers: bool,
    /// Return raw bytes instead of decoding JSON
    pub binary: bool,
}

impl ApiRequest {
    /// Create a request without body or flags
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            device_headers: false,
            binary: false,
        }
    }

    /// GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// PUT request
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Attach a JSON body
    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach any serializable body
    pub fn with_body<B: Serialize>(self, body: &B) -> Result<Self, serde_json::Error> {
        Ok(self.with_json(serde_json::to_value(body)?))
    }

    /// Require the device identification headers
    #[must_use]
    pub fn with_device_headers(mut self) -> Self {
        self.device_headers = true;
        self
    }

    /// Ask for the raw response bytes
    #[must_use]
    pub fn binary(mut self) -> Self {
        self.binary = true;
        self
    }

    /// Whether `path` is a full URL rather than a path under the API base
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.path.starts_with("http://") || self.path.starts_with("https://")
    }

    /// Resolve the request URL against a base URL
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        if self.is_absolute() {
            return self.path.clone();
        }
        let base = base_url.trim_end_matches('/');
        if self.path.starts_with('/') {
            format!("{base}{}", self.path)
        } else {
            format!("{base}/{}", self.path)
        }
    }
}

/// Decoded response of a dispatched request
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    /// Decoded JSON; an empty body decodes to `Value::Null`
    Json(Value),
    /// Raw payload of a binary request
    Binary(Bytes),
}

impl ResponseData {
    /// JSON value, or `None` for binary payloads
    #[must_use]
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Binary(_) => None,
        }
    }

    /// Raw bytes; JSON values are re-serialized
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        match self {
            Self::Binary(bytes) => bytes,
            Self::Json(value) => Bytes::from(value.to_string()),
        }
    }
}

/// Every vendor endpoint this crate wraps
#[derive(Debug, Clone)]
pub enum Route<'a> {
    // auth
    Login { username: &'a str, secret: &'a str },
    Logout,
    Generate2faCode { channel: TwoFactorChannel },
    Verify2faCode { otp: &'a str },

    // user
    UserDetails,
    UserInfo,
    ProfileMenu,
    MgmDetails,
    ConsentSettings { general: bool },
    SetConsentSettings { declarations: &'a [ConsentDeclaration] },
    Messages,
    Reminders,
    CustomerServiceContactInfo,

    // catalog
    Search { query: &'a str },
    Suggestions { query: &'a str },
    Article { product_id: &'a str },
    Categories { depth: u32 },
    Lists { depth: u32 },
    List { list_id: &'a str, sub_list_id: Option<&'a str>, depth: u32 },
    BundleOverview { sole_article_id: &'a str },
    Image { static_base: &'a str, image_id: &'a str, size: ImageSize },

    // cart
    Cart,
    AddProduct { product_id: &'a str, count: u32 },
    RemoveProduct { product_id: &'a str, count: u32 },
    ClearCart,
    DeliverySlots,
    SetDeliverySlot { slot_id: &'a str },
    OrderStatus { order_id: &'a str },

    // deliveries
    Deliveries { filter: &'a [DeliveryStatus] },
    Delivery { delivery_id: &'a str },
    DeliveryPosition { delivery_id: &'a str },
    DeliveryScenario { delivery_id: &'a str },
    CancelDelivery { delivery_id: &'a str },
    SetDeliveryRating { delivery_id: &'a str, rating: u8 },
    SendDeliveryInvoiceEmail { delivery_id: &'a str },
    Parcels,

    // payments
    PaymentProfile,
    WalletTransactions { page: u32 },
    WalletTransactionDetails { transaction_id: &'a str },
}

impl Route<'_> {
    /// Build the request descriptor for this route
    #[must_use]
    pub fn request(&self) -> ApiRequest {
        match *self {
            Self::Login { username, secret } => ApiRequest::post("/user/login").with_json(json!(
                LoginInput {
                    key: username,
                    secret,
                    client_id: 1,
                }
            )),
            Self::Logout => ApiRequest::post("/user/logout"),
            Self::Generate2faCode { channel } => ApiRequest::post("/user/2fa/generate")
                .with_json(json!({ "channel": channel }))
                .with_device_headers(),
            Self::Verify2faCode { otp } => ApiRequest::post("/user/2fa/verify")
                .with_json(json!({ "otp": otp }))
                .with_device_headers(),

            Self::UserDetails => ApiRequest::get("/user"),
            Self::UserInfo => ApiRequest::get("/user-info"),
            Self::ProfileMenu => ApiRequest::get("/profile-menu"),
            Self::MgmDetails => ApiRequest::get("/mgm"),
            Self::ConsentSettings { general } => ApiRequest::get(format!(
                "/consents{}/settings-page",
                if general { "/general" } else { "" }
            )),
            Self::SetConsentSettings { declarations } => ApiRequest::put("/consents")
                .with_json(json!({ "consent_declarations": declarations })),
            Self::Messages => ApiRequest::get("/messages").with_device_headers(),
            Self::Reminders => ApiRequest::get("/reminders").with_device_headers(),
            Self::CustomerServiceContactInfo => ApiRequest::get("/cs-contact-info"),

            Self::Search { query } => ApiRequest::get(format!(
                "/pages/search-page-results?search_term={}",
                encode_uri_component(query)
            )),
            Self::Suggestions { query } => ApiRequest::get(format!(
                "/suggest?search_term={}",
                encode_uri_component(query)
            )),
            Self::Article { product_id } => ApiRequest::get(format!("/articles/{product_id}")),
            Self::Categories { depth } => ApiRequest::get(format!("/my_store?depth={depth}")),
            Self::Lists { depth } => ApiRequest::get(format!("/lists?depth={depth}")),
            Self::List {
                list_id,
                sub_list_id,
                depth,
            } => {
                let mut path = format!("/lists/{list_id}");
                match sub_list_id {
                    Some(sub) => path.push_str(&format!("?sublist={sub}&depth={depth}")),
                    None => path.push_str(&format!("?depth={depth}")),
                }
                ApiRequest::get(path)
            }
            Self::BundleOverview { sole_article_id } => ApiRequest::get(format!(
                "/pages/bundle-overview-page?sole_article_id={sole_article_id}"
            )),
            Self::Image {
                static_base,
                image_id,
                size,
            } => ApiRequest::get(format!(
                "{}/static/images/{image_id}/{size}.png",
                static_base.trim_end_matches('/')
            ))
            .binary(),

            Self::Cart => ApiRequest::get("/cart"),
            Self::AddProduct { product_id, count } => ApiRequest::post("/cart/add_product")
                .with_json(json!(ProductCountInput { product_id, count })),
            Self::RemoveProduct { product_id, count } => ApiRequest::post("/cart/remove_product")
                .with_json(json!(ProductCountInput { product_id, count })),
            Self::ClearCart => ApiRequest::post("/cart/clear"),
            Self::DeliverySlots => ApiRequest::get("/cart/delivery_slots"),
            Self::SetDeliverySlot { slot_id } => ApiRequest::post("/cart/set_delivery_slot")
                .with_json(json!({ "slot_id": slot_id })),
            Self::OrderStatus { order_id } => {
                ApiRequest::get(format!("/cart/checkout/order/{order_id}/status"))
            }

            Self::Deliveries { filter } => {
                ApiRequest::post("/deliveries/summary").with_json(json!(filter))
            }
            Self::Delivery { delivery_id } => ApiRequest::get(format!("/deliveries/{delivery_id}")),
            Self::DeliveryPosition { delivery_id } => {
                ApiRequest::get(format!("/deliveries/{delivery_id}/position")).with_device_headers()
            }
            Self::DeliveryScenario { delivery_id } => {
                ApiRequest::get(format!("/deliveries/{delivery_id}/scenario")).with_device_headers()
            }
            Self::CancelDelivery { delivery_id } => {
                ApiRequest::post(format!("/order/delivery/{delivery_id}/cancel"))
            }
            Self::SetDeliveryRating {
                delivery_id,
                rating,
            } => ApiRequest::post(format!("/deliveries/{delivery_id}/rating"))
                .with_json(json!({ "rating": rating })),
            Self::SendDeliveryInvoiceEmail { delivery_id } => {
                ApiRequest::post(format!("/deliveries/{delivery_id}/resend_invoice_email"))
            }
            Self::Parcels => ApiRequest::get("/parcels"),

            Self::PaymentProfile => ApiRequest::get("/payment-profile").with_device_headers(),
            Self::WalletTransactions { page } => {
                ApiRequest::get(format!("/wallet/transactions?pageNumber={page}"))
            }
            Self::WalletTransactionDetails { transaction_id } => {
                ApiRequest::get(format!("/wallet/transactions/{transaction_id}"))
            }
        }
    }
}

/// Bytes `encodeURIComponent` escapes: everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query value the way JavaScript's `encodeURIComponent` does
#[must_use]
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}
