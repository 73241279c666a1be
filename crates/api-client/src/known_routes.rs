//! Vendor routes observed in the Picnic Android app
//!
//! Most of these are not wrapped by this crate. They can still be called
//! through [`PicnicClient::send_request`](crate::PicnicClient::send_request)
//! once the path parameters are filled in.

use serde::Serialize;
use std::fmt;

/// Functional area a route belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RouteGroup {
    User,
    Cart,
    Consents,
    Deliveries,
    Content,
    Images,
    Mgm,
    Messages,
    Catalog,
    Blacklist,
    Recipes,
    Reminders,
    Bundles,
    Checkout,
}

/// One route template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KnownRoute {
    pub group: RouteGroup,
    pub method: &'static str,
    /// Served under `/public-api/{version}` instead of `/api/{version}`
    pub public: bool,
    /// Path below the version segment; `{name}` marks a path parameter
    pub path: &'static str,
}

impl KnownRoute {
    /// Path parameter names in order of appearance
    #[must_use]
    pub fn parameters(&self) -> Vec<&'static str> {
        self.path
            .split('/')
            .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
            .collect()
    }
}

impl fmt::Display for KnownRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = if self.public { "public-api" } else { "api" };
        write!(f, "{} /{scope}/{{api_version}}{}", self.method, self.path)
    }
}

const fn route(
    group: RouteGroup,
    method: &'static str,
    public: bool,
    path: &'static str,
) -> KnownRoute {
    KnownRoute {
        group,
        method,
        public,
        path,
    }
}

/// Every route seen in the app, in the order the app declares them
pub static KNOWN_ROUTES: &[KnownRoute] = &[
    route(RouteGroup::User, "POST", false, "/user/household_details"),
    route(RouteGroup::User, "POST", false, "/user/logout"),
    route(RouteGroup::User, "POST", false, "/user/business_details"),
    route(RouteGroup::User, "POST", false, "/user/forgot_password/update"),
    route(RouteGroup::User, "POST", false, "/user/subscribe"),
    route(RouteGroup::User, "POST", false, "/user/login"),
    route(RouteGroup::User, "POST", false, "/user/suggestion"),
    route(RouteGroup::User, "POST", false, "/user/register/direct"),
    route(RouteGroup::User, "POST", false, "/user/phone_verification/verify"),
    route(RouteGroup::User, "GET", false, "/user"),
    route(RouteGroup::User, "POST", false, "/user/device/register_push"),
    route(RouteGroup::User, "POST", false, "/user/forgot_password"),
    route(RouteGroup::User, "POST", false, "/update_check"),
    route(RouteGroup::User, "POST", false, "/user/phone_verification/generate"),
    route(RouteGroup::User, "GET", false, "/cs-contact-info"),
    route(RouteGroup::User, "GET", true, "/cs-contact-info"),
    route(RouteGroup::Recipes, "POST", false, "/recipes/cart/recipe-article"),
    route(RouteGroup::Cart, "GET", false, "/cart"),
    route(RouteGroup::Cart, "POST", false, "/cart/clear"),
    route(RouteGroup::Cart, "GET", false, "/cart/delivery_slots"),
    route(RouteGroup::Recipes, "POST", false, "/recipes/cart/recipe-section"),
    route(RouteGroup::Cart, "POST", false, "/cart/add_orders"),
    route(RouteGroup::Cart, "POST", false, "/cart/set_delivery_slot"),
    route(RouteGroup::Cart, "POST", false, "/cart/remove_product"),
    route(RouteGroup::Cart, "POST", false, "/cart/products/add"),
    route(RouteGroup::Cart, "POST", false, "/cart/remove_group"),
    route(RouteGroup::Cart, "POST", false, "/cart/add_product"),
    route(RouteGroup::Consents, "GET", false, "/consents/general"),
    route(RouteGroup::Consents, "PUT", false, "/consents"),
    route(RouteGroup::Consents, "GET", false, "/consents"),
    route(RouteGroup::Consents, "GET", false, "/consents/general/settings-page"),
    route(RouteGroup::Consents, "GET", false, "/consents/settings-page"),
    route(RouteGroup::Deliveries, "PUT", false, "/deliveries/{delivery_id}/feedback/{report_id}/images"),
    route(RouteGroup::Deliveries, "GET", false, "/deliveries/{delivery_id}/position"),
    route(RouteGroup::Deliveries, "POST", false, "/deliveries/{delivery_id}/issue-resolution-options"),
    route(RouteGroup::Deliveries, "GET", false, "/deliveries/rateable"),
    route(RouteGroup::Deliveries, "GET", false, "/deliveries/{delivery_id}/scenario"),
    route(RouteGroup::Deliveries, "POST", false, "/order/delivery/{delivery_id}/cancel"),
    route(RouteGroup::Deliveries, "GET", false, "/deliveries/{delivery_id}"),
    route(RouteGroup::Deliveries, "POST", false, "/deliveries/{delivery_id}/resend_invoice_email"),
    route(RouteGroup::Deliveries, "POST", false, "/deliveries/{delivery_id}/feedback"),
    route(RouteGroup::Deliveries, "POST", false, "/deliveries/{delivery_id}/rating"),
    route(RouteGroup::Deliveries, "POST", false, "/deliveries/summary"),
    route(RouteGroup::Content, "GET", false, "/content/faq"),
    route(RouteGroup::Images, "POST", false, "/images/{context}"),
    route(RouteGroup::Mgm, "POST", false, "/mgm/{mgmCode}/message"),
    route(RouteGroup::Mgm, "GET", false, "/mgm"),
    route(RouteGroup::Messages, "GET", false, "/messages"),
    route(RouteGroup::Catalog, "GET", false, "/my_store"),
    route(RouteGroup::Catalog, "GET", false, "/promotion/{promotionId}/category"),
    route(RouteGroup::Catalog, "GET", false, "/search/"),
    route(RouteGroup::Catalog, "GET", false, "/suggest"),
    route(RouteGroup::Blacklist, "POST", false, "/user-products-blacklist"),
    route(RouteGroup::Recipes, "GET", false, "/recipes/{recipe_id}"),
    route(RouteGroup::Reminders, "PUT", false, "/reminders"),
    route(RouteGroup::Reminders, "GET", false, "/reminders"),
    route(RouteGroup::Content, "GET", false, "/content/search_empty_state"),
    route(RouteGroup::Bundles, "GET", false, "/user-defined-bundles/{bundle_id}"),
    route(RouteGroup::Bundles, "DELETE", false, "/user-defined-bundles/{bundle_id}"),
    route(RouteGroup::Bundles, "POST", false, "/user-defined-bundles"),
    route(RouteGroup::Bundles, "PUT", false, "/user-defined-bundles/{bundle_id}/image"),
    route(RouteGroup::Bundles, "PUT", false, "/user-defined-bundles/{bundle_id}"),
    route(RouteGroup::Checkout, "GET", false, "/cart/checkout/order/{order_id}/status"),
    route(RouteGroup::Checkout, "POST", false, "/cart/checkout/order/{order_id}/confirm"),
    route(RouteGroup::Catalog, "GET", false, "/articles/{product_id}"),
    route(RouteGroup::Catalog, "GET", false, "/templates/{template_id}/render"),
];
