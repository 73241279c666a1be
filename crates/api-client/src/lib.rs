//! Async client for the Picnic online supermarket storefront API
//!
//! This crate wraps the undocumented HTTP API behind the Picnic mobile apps
//! in a typed, session-aware client.
//!
//! # Features
//!
//! - **Country and version selection**: NL and DE storefronts, any API version
//! - **Session handling**: login, logout, two-factor codes, or a pre-supplied token
//! - **Endpoint coverage**: account, catalog, cart, deliveries and payments
//! - **Search extraction**: selling units pulled out of page-rendering trees
//! - **Request correlation**: every call is logged with a unique request id
//!
//! # Example
//!
//! ```rust,no_run
//! use picnic_api_client::{ClientConfig, CountryCode, PicnicClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PicnicClient::with_config(
//!         ClientConfig::default().with_country_code(CountryCode::DE),
//!     )?;
//!
//!     client.login("user@example.com", "secret").await?;
//!
//!     for unit in client.catalog().search("Affogato").await? {
//!         println!("{} {:?}", unit.id, unit.name);
//!     }
//!
//!     client.cart().add_product("s1018620", 2).await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod extract;
pub mod known_routes;
pub mod models;
pub mod route;
pub mod schema;
pub mod session;

pub use client::PicnicClient;
pub use config::{ClientConfig, CountryCode, DeviceHeaders};
pub use error::{ApiError, ApiResult};
pub use extract::{BundleIdExtractor, Extractor, SellingUnitExtractor};
pub use route::{ApiRequest, ResponseData, Route};
pub use schema::ResponseSchema;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::PicnicClient;
    pub use crate::config::{ClientConfig, CountryCode, DeviceHeaders};
    pub use crate::endpoints::{AuthApi, CartApi, CatalogApi, DeliveriesApi, PaymentsApi, UserApi};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::extract::{BundleIdExtractor, Extractor, SellingUnitExtractor};
    pub use crate::models::{DeliveryStatus, ImageSize, SellingUnit, TwoFactorChannel};
    pub use crate::schema::ResponseSchema;
}
