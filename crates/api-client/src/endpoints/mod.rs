//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for one group of storefront
//! endpoints. All of them go through [`PicnicClient`](crate::PicnicClient)
//! and share its session.
//!
//! ## Mapping to storefront routes
//!
//! | Module | Routes | Description |
//! |--------|--------|-------------|
//! | `auth` | `/user/login`, `/user/logout`, `/user/2fa/*` | Session handling |
//! | `user` | `/user`, `/consents`, `/mgm`, `/messages`, ... | Account data |
//! | `catalog` | `/pages/*`, `/suggest`, `/articles`, `/lists`, `/my_store` | Products and images |
//! | `cart` | `/cart/*` | Cart and checkout |
//! | `deliveries` | `/deliveries/*`, `/order/delivery/*`, `/parcels` | Delivery tracking |
//! | `payments` | `/payment-profile`, `/wallet/*` | Payments |

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod deliveries;
pub mod payments;
pub mod user;

pub use auth::AuthApi;
pub use cart::CartApi;
pub use catalog::CatalogApi;
pub use deliveries::DeliveriesApi;
pub use payments::PaymentsApi;
pub use user::UserApi;
