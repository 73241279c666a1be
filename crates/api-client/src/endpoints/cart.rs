//! Shopping cart and checkout endpoints

use crate::client::PicnicClient;
use crate::error::ApiResult;
use crate::models::{DeliverySlotsResult, Order, OrderStatus};
use crate::route::Route;

/// Cart API interface
#[derive(Clone)]
pub struct CartApi {
    client: PicnicClient,
}

impl CartApi {
    /// Create a new cart API interface
    pub(crate) fn new(client: PicnicClient) -> Self {
        Self { client }
    }

    /// Current cart contents
    ///
    /// GET /cart
    pub async fn get(&self) -> ApiResult<Order> {
        self.client.call(Route::Cart).await
    }

    /// Add `count` units of a product
    ///
    /// POST /cart/add_product
    pub async fn add_product(&self, product_id: &str, count: u32) -> ApiResult<Order> {
        self.client
            .call(Route::AddProduct { product_id, count })
            .await
    }

    /// Remove `count` units of a product
    ///
    /// POST /cart/remove_product
    pub async fn remove_product(&self, product_id: &str, count: u32) -> ApiResult<Order> {
        self.client
            .call(Route::RemoveProduct { product_id, count })
            .await
    }

    /// Empty the cart
    ///
    /// POST /cart/clear
    pub async fn clear(&self) -> ApiResult<Order> {
        self.client.call(Route::ClearCart).await
    }

    /// Delivery slots available for the cart
    ///
    /// GET /cart/delivery_slots
    pub async fn delivery_slots(&self) -> ApiResult<DeliverySlotsResult> {
        self.client.call(Route::DeliverySlots).await
    }

    /// Select a delivery slot
    ///
    /// POST /cart/set_delivery_slot
    pub async fn set_delivery_slot(&self, slot_id: &str) -> ApiResult<Order> {
        self.client.call(Route::SetDeliverySlot { slot_id }).await
    }

    /// Checkout status of a placed order
    ///
    /// GET /cart/checkout/order/<order_id>/status
    pub async fn order_status(&self, order_id: &str) -> ApiResult<OrderStatus> {
        self.client.call(Route::OrderStatus { order_id }).await
    }
}
