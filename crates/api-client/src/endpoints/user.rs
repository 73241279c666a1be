//! Account, consent and in-app message endpoints

use crate::client::PicnicClient;
use crate::error::ApiResult;
use crate::models::{
    ConsentDeclaration, ConsentSetting, CustomerServiceContactInfo, MgmDetails,
    SetConsentSettingsResult, User,
};
use crate::route::Route;
use serde_json::Value;

/// User API interface
#[derive(Clone)]
pub struct UserApi {
    client: PicnicClient,
}

impl UserApi {
    /// Create a new user API interface
    pub(crate) fn new(client: PicnicClient) -> Self {
        Self { client }
    }

    /// Details of the logged in user
    ///
    /// GET /user
    pub async fn details(&self) -> ApiResult<User> {
        self.client.call(Route::UserDetails).await
    }

    /// Condensed user info with feature toggles
    ///
    /// GET /user-info
    pub async fn info(&self) -> ApiResult<Value> {
        self.client.call(Route::UserInfo).await
    }

    /// Layout of the profile menu in the app
    ///
    /// GET /profile-menu
    pub async fn profile_menu(&self) -> ApiResult<Value> {
        self.client.call(Route::ProfileMenu).await
    }

    /// Friends discount details
    ///
    /// GET /mgm
    pub async fn mgm_details(&self) -> ApiResult<MgmDetails> {
        self.client.call(Route::MgmDetails).await
    }

    /// Consent settings; only the general ones when `general` is set
    ///
    /// GET /consents/settings-page or /consents/general/settings-page
    pub async fn consent_settings(&self, general: bool) -> ApiResult<Vec<ConsentSetting>> {
        self.client.call(Route::ConsentSettings { general }).await
    }

    /// Set one or more consent decisions
    ///
    /// PUT /consents
    pub async fn set_consent_settings(
        &self,
        declarations: &[ConsentDeclaration],
    ) -> ApiResult<SetConsentSettingsResult> {
        self.client
            .call(Route::SetConsentSettings { declarations })
            .await
    }

    /// Pop-up messages, such as the post-delivery survey
    ///
    /// GET /messages (device headers)
    pub async fn messages(&self) -> ApiResult<Value> {
        self.client.call(Route::Messages).await
    }

    /// Reminders
    ///
    /// GET /reminders (device headers)
    pub async fn reminders(&self) -> ApiResult<Value> {
        self.client.call(Route::Reminders).await
    }

    /// Customer service phone numbers and opening times
    ///
    /// GET /cs-contact-info
    pub async fn customer_service_contact_info(&self) -> ApiResult<CustomerServiceContactInfo> {
        self.client.call(Route::CustomerServiceContactInfo).await
    }
}
