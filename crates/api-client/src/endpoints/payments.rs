//! Payment profile and wallet endpoints

use crate::client::PicnicClient;
use crate::error::ApiResult;
use crate::models::{PaymentProfile, WalletTransaction};
use crate::route::Route;
use serde_json::Value;

/// Payments API interface
#[derive(Clone)]
pub struct PaymentsApi {
    client: PicnicClient,
}

impl PaymentsApi {
    /// Create a new payments API interface
    pub(crate) fn new(client: PicnicClient) -> Self {
        Self { client }
    }

    /// Stored payment methods
    ///
    /// GET /payment-profile (device headers)
    pub async fn profile(&self) -> ApiResult<PaymentProfile> {
        self.client.call(Route::PaymentProfile).await
    }

    /// One page of wallet transactions, starting at page 1
    ///
    /// GET /wallet/transactions?pageNumber=<page>
    pub async fn wallet_transactions(&self, page: u32) -> ApiResult<Vec<WalletTransaction>> {
        self.client.call(Route::WalletTransactions { page }).await
    }

    /// Line items of one wallet transaction
    ///
    /// GET /wallet/transactions/<transaction_id>
    pub async fn wallet_transaction_details(&self, transaction_id: &str) -> ApiResult<Value> {
        self.client
            .call(Route::WalletTransactionDetails { transaction_id })
            .await
    }
}
