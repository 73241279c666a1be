//! Request and response types
//!
//! The vendor does not publish schemas and adds fields freely, so every
//! vendor object keeps whatever it does not model in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Fields of a vendor object that are not modelled explicitly
pub type Extra = Map<String, Value>;

// ============================================================================
// Authentication
// ============================================================================

/// Body of `POST /user/login`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginInput<'a> {
    pub key: &'a str,
    pub secret: &'a str,
    pub client_id: u32,
}

/// Body of a successful login response; the token itself is a header
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct LoginResponseBody {
    #[serde(default, deserialize_with = "lenient::string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub second_factor_authentication_required: bool,
}

/// Outcome of a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResult {
    /// Session token, now also stored in the client session
    pub auth_key: String,
    /// Vendor user id
    pub user_id: Option<String>,
    /// Whether the account must complete a two-factor challenge
    pub second_factor_authentication_required: bool,
}

/// Delivery channel for a two-factor code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TwoFactorChannel {
    /// Text message
    #[default]
    Sms,
    /// E-mail
    Email,
}

// ============================================================================
// User
// ============================================================================

/// Postal address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub house_number: Option<i64>,
    pub house_number_ext: Option<String>,
    pub postcode: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Details of the logged in user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub address: Option<Address>,
    pub phone: Option<String>,
    pub contact_email: Option<String>,
    pub customer_type: Option<String>,
    pub total_deliveries: Option<u32>,
    pub completed_deliveries: Option<u32>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Member-get-member (friends discount) details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MgmDetails {
    pub mgm_code: String,
    pub invitee_value: Option<i64>,
    pub inviter_value: Option<i64>,
    pub share_url: Option<String>,
    pub amount_earned: Option<i64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Texts shown next to a consent toggle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentSettingText {
    pub title: Option<String>,
    pub text: Option<String>,
    pub dissent_text: Option<String>,
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One consent setting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentSetting {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: String,
    pub text_id: Option<String>,
    pub text_locale: Option<String>,
    pub text: Option<ConsentSettingText>,
    pub established_decision: Option<bool>,
    pub initial_state: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One consent decision sent with `PUT /consents`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentDeclaration {
    pub consent_request_text_id: String,
    /// Locale, e.g. `nl_NL`
    pub consent_request_locale: String,
    pub agreement: bool,
}

/// Response of `PUT /consents`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetConsentSettingsResult {
    #[serde(default)]
    pub consent_request_text_ids: Vec<String>,
}

/// Customer service contact details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerServiceContactInfo {
    pub contact_details: Option<Value>,
    pub opening_times: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

// ============================================================================
// Catalog
// ============================================================================

/// A purchasable product entry found in a page-rendering tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellingUnit {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, alias = "soleArticleId", deserialize_with = "lenient::string")]
    pub sole_article_id: Option<String>,
    #[serde(default, alias = "displayPrice", deserialize_with = "lenient::integer")]
    pub display_price: Option<i64>,
    #[serde(default, alias = "imageId", deserialize_with = "lenient::string")]
    pub image_id: Option<String>,
    #[serde(default, alias = "unitQuantity", deserialize_with = "lenient::string")]
    pub unit_quantity: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Search suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: String,
    pub suggestion: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Product details from `GET /articles/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<Value>,
    #[serde(default)]
    pub images: Vec<Value>,
    pub price_info: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Category, list, sublist or article in the catalog tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub items: Vec<CatalogItem>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Response of `GET /my_store`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyStore {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<String>,
    #[serde(default)]
    pub catalog: Vec<CatalogItem>,
    #[serde(default)]
    pub content: Vec<Value>,
    pub user: Option<Value>,
    pub first_time_user: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Product image sizes served by the static image host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageSize {
    Tiny,
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl ImageSize {
    /// File stem used in image URLs
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::ExtraLarge => "extra-large",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Cart
// ============================================================================

/// Body of `POST /cart/add_product` and `POST /cart/remove_product`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ProductCountInput<'a> {
    pub product_id: &'a str,
    pub count: u32,
}

/// Line in a cart or order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: String,
    #[serde(default)]
    pub items: Vec<Value>,
    pub display_price: Option<i64>,
    pub price: Option<i64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Delivery window offered for the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliverySlot {
    pub slot_id: String,
    pub hub_id: Option<String>,
    pub fc_id: Option<String>,
    pub window_start: Option<String>,
    pub window_end: Option<String>,
    pub cut_off_time: Option<String>,
    pub is_available: Option<bool>,
    pub selected: Option<bool>,
    pub reserved: Option<bool>,
    pub minimum_order_value: Option<i64>,
    pub unavailability_reason: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Slot currently selected for the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedSlot {
    pub slot_id: Option<String>,
    pub state: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Shopping cart or placed order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: String,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub delivery_slots: Vec<DeliverySlot>,
    pub selected_slot: Option<SelectedSlot>,
    pub total_count: Option<u32>,
    pub total_price: Option<i64>,
    pub checkout_total_price: Option<i64>,
    pub total_savings: Option<i64>,
    pub total_deposit: Option<i64>,
    pub cancellable: Option<bool>,
    pub creation_time: Option<String>,
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Response of `GET /cart/delivery_slots`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliverySlotsResult {
    #[serde(default)]
    pub delivery_slots: Vec<DeliverySlot>,
    pub selected_slot: Option<SelectedSlot>,
    pub slot_selector_message: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Checkout status of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatus {
    /// `FINISHED` once the order went through
    pub checkout_status: String,
    #[serde(flatten)]
    pub extra: Extra,
}

// ============================================================================
// Deliveries
// ============================================================================

/// Delivery status used to filter `POST /deliveries/summary`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Current,
    Completed,
    Cancelled,
}

/// Start and end of a time window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryTime {
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A past or upcoming delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<String>,
    pub delivery_id: String,
    pub creation_time: Option<String>,
    pub slot: Option<DeliverySlot>,
    pub eta2: Option<DeliveryTime>,
    pub delivery_time: Option<DeliveryTime>,
    pub status: Option<String>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub returned_containers: Vec<Value>,
    #[serde(default)]
    pub parcels: Vec<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Delivery {
    /// Status as a known variant, if it is one
    #[must_use]
    pub fn status_kind(&self) -> Option<DeliveryStatus> {
        self.status
            .as_deref()
            .and_then(|s| serde_json::from_value(Value::String(s.to_string())).ok())
    }
}

/// Live position of a delivery on its way
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryPosition {
    pub scenario_ts: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Planned route point of the delivery vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioPoint {
    pub ts: Option<String>,
    pub lat: Option<Value>,
    pub lng: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Driver and route information of a delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryScenario {
    #[serde(default)]
    pub scenario: Vec<ScenarioPoint>,
    pub vehicle: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

// ============================================================================
// Payments
// ============================================================================

/// Stored payment methods of the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentProfile {
    #[serde(default)]
    pub stored_payment_options: Vec<Value>,
    #[serde(default)]
    pub available_payment_methods: Vec<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Wallet transaction summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub id: String,
    pub display_name: Option<String>,
    pub amount_in_cents: Option<i64>,
    pub status: Option<String>,
    pub timestamp: Option<i64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Decoders for vendor fields whose JSON type drifts between app versions
///
/// Numbers and strings are converted into each other where that is lossless;
/// anything else decodes as `None` instead of failing the whole object.
mod lenient {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Bool(b)) => b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        })
    }

    /// Ids must be present, but numeric ids are accepted as strings
    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(D::Error::custom(format!("expected a string id, got {other}"))),
        }
    }
}
