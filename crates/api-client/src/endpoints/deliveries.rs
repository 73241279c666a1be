//! Delivery tracking and post-delivery endpoints

use crate::client::PicnicClient;
use crate::error::ApiResult;
use crate::models::{Delivery, DeliveryPosition, DeliveryScenario, DeliveryStatus};
use crate::route::Route;
use serde_json::Value;

/// Deliveries API interface
#[derive(Clone)]
pub struct DeliveriesApi {
    client: PicnicClient,
}

impl DeliveriesApi {
    /// Create a new deliveries API interface
    pub(crate) fn new(client: PicnicClient) -> Self {
        Self { client }
    }

    /// Delivery summaries, optionally filtered by status
    ///
    /// POST /deliveries/summary
    ///
    /// The body is the filter array itself; an empty slice returns all
    /// deliveries.
    pub async fn list(&self, filter: &[DeliveryStatus]) -> ApiResult<Vec<Delivery>> {
        self.client.call(Route::Deliveries { filter }).await
    }

    /// Full details of one delivery
    ///
    /// GET /deliveries/<delivery_id>
    pub async fn get(&self, delivery_id: &str) -> ApiResult<Delivery> {
        self.client.call(Route::Delivery { delivery_id }).await
    }

    /// Live position of the delivery vehicle
    ///
    /// GET /deliveries/<delivery_id>/position (device headers)
    pub async fn position(&self, delivery_id: &str) -> ApiResult<DeliveryPosition> {
        self.client.call(Route::DeliveryPosition { delivery_id }).await
    }

    /// Planned route of the delivery vehicle
    ///
    /// GET /deliveries/<delivery_id>/scenario (device headers)
    pub async fn scenario(&self, delivery_id: &str) -> ApiResult<DeliveryScenario> {
        self.client.call(Route::DeliveryScenario { delivery_id }).await
    }

    /// Cancel an order that has not been delivered yet
    ///
    /// POST /order/delivery/<delivery_id>/cancel
    pub async fn cancel(&self, delivery_id: &str) -> ApiResult<Value> {
        self.client.call(Route::CancelDelivery { delivery_id }).await
    }

    /// Rate a completed delivery from 0 to 10
    ///
    /// POST /deliveries/<delivery_id>/rating
    pub async fn set_rating(&self, delivery_id: &str, rating: u8) -> ApiResult<Value> {
        self.client
            .call(Route::SetDeliveryRating {
                delivery_id,
                rating,
            })
            .await
    }

    /// Send the invoice of a delivery to the account's email address again
    ///
    /// POST /deliveries/<delivery_id>/resend_invoice_email
    pub async fn send_invoice_email(&self, delivery_id: &str) -> ApiResult<Value> {
        self.client
            .call(Route::SendDeliveryInvoiceEmail { delivery_id })
            .await
    }

    /// Parcels shipped outside regular deliveries
    ///
    /// GET /parcels
    pub async fn parcels(&self) -> ApiResult<Value> {
        self.client.call(Route::Parcels).await
    }
}
