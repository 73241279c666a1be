//! Catalog endpoints: search, products, lists and images
//!
//! `search` and `bundle_article_ids` hit undocumented page-rendering
//! endpoints and run the response through an [`Extractor`]; everything else
//! is a plain pass-through.

use crate::client::PicnicClient;
use crate::error::ApiResult;
use crate::extract::{BundleIdExtractor, Extractor, SellingUnitExtractor};
use crate::models::{Article, CatalogItem, ImageSize, MyStore, SellingUnit, Suggestion};
use crate::route::Route;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use serde_json::Value;
use tracing::debug;

/// Catalog API interface
#[derive(Clone)]
pub struct CatalogApi {
    client: PicnicClient,
}

impl CatalogApi {
    /// Create a new catalog API interface
    pub(crate) fn new(client: PicnicClient) -> Self {
        Self { client }
    }

    /// Search products
    ///
    /// GET /pages/search-page-results?search_term=<query>
    ///
    /// Returns every selling unit found in the rendered result page, using
    /// the response schema of the configured API version.
    pub async fn search(&self, query: &str) -> ApiResult<Vec<SellingUnit>> {
        let extractor = SellingUnitExtractor::for_schema(self.client.config().response_schema());
        self.search_with(query, &extractor).await
    }

    /// Search products with a custom extractor
    pub async fn search_with(
        &self,
        query: &str,
        extractor: &SellingUnitExtractor,
    ) -> ApiResult<Vec<SellingUnit>> {
        let page: Value = self.client.call(Route::Search { query }).await?;
        let units = extractor.extract(&page)?;
        debug!(results = units.len(), "Search finished");
        Ok(units)
    }

    /// Search suggestions for a partial query
    ///
    /// GET /suggest?search_term=<query>
    pub async fn suggestions(&self, query: &str) -> ApiResult<Vec<Suggestion>> {
        self.client.call(Route::Suggestions { query }).await
    }

    /// Details of a single product
    ///
    /// GET /articles/<product_id>
    pub async fn article(&self, product_id: &str) -> ApiResult<Article> {
        self.client.call(Route::Article { product_id }).await
    }

    /// Store front page with the category tree
    ///
    /// GET /my_store?depth=<depth>
    pub async fn categories(&self, depth: u32) -> ApiResult<MyStore> {
        self.client.call(Route::Categories { depth }).await
    }

    /// All lists and sublists
    ///
    /// GET /lists?depth=<depth>
    pub async fn lists(&self, depth: u32) -> ApiResult<Vec<CatalogItem>> {
        self.client.call(Route::Lists { depth }).await
    }

    /// Sublists of a list, or the articles of a sublist when one is given
    ///
    /// GET /lists/<list_id>?sublist=<sub_list_id>&depth=<depth>
    pub async fn list(
        &self,
        list_id: &str,
        sub_list_id: Option<&str>,
        depth: u32,
    ) -> ApiResult<Vec<CatalogItem>> {
        self.client
            .call(Route::List {
                list_id,
                sub_list_id,
                depth,
            })
            .await
    }

    /// Selling unit ids of every bundle the article is sold in
    ///
    /// GET /pages/bundle-overview-page?sole_article_id=<id>
    ///
    /// Fails with [`ApiError::Parse`](crate::ApiError::Parse) when the page
    /// mentions no bundle items, which is indistinguishable from a format
    /// change on the vendor side.
    pub async fn bundle_article_ids(&self, sole_article_id: &str) -> ApiResult<Vec<String>> {
        let extractor = BundleIdExtractor::default().for_article(sole_article_id);
        self.bundle_article_ids_with(sole_article_id, &extractor)
            .await
    }

    /// Bundle ids with a custom extractor
    pub async fn bundle_article_ids_with(
        &self,
        sole_article_id: &str,
        extractor: &BundleIdExtractor,
    ) -> ApiResult<Vec<String>> {
        let page: Value = self
            .client
            .call(Route::BundleOverview { sole_article_id })
            .await?;
        extractor.extract(&page)
    }

    /// Product image as PNG bytes
    ///
    /// GET <host>/static/images/<image_id>/<size>.png
    pub async fn image(&self, image_id: &str, size: ImageSize) -> ApiResult<Bytes> {
        let static_base = self.client.static_base_url();
        let request = Route::Image {
            static_base: &static_base,
            image_id,
            size,
        }
        .request();
        Ok(self.client.send_request(request).await?.into_bytes())
    }

    /// Product image as a `data:image/png;base64,...` URI
    pub async fn image_as_data_uri(&self, image_id: &str, size: ImageSize) -> ApiResult<String> {
        let bytes = self.image(image_id, size).await?;
        Ok(png_data_uri(&bytes))
    }
}

/// Wrap PNG bytes in a base64 data URI
#[must_use]
pub fn png_data_uri(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(bytes))
}
