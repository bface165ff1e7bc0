//! HTTP implementation of the merchant API.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use secrecy::ExposeSecret;
use tracing::instrument;
use url::Url;

use vitrina_core::{Category, Item, MerchantCredentials, UserId};

use super::wire::{
    ItemsEnvelope, NextSkuResponse, SaveCredentialsRequest, WireCredentials, WireItem,
};
use super::{ApiError, ImageAttachment, MerchantApi, NewProduct, StoredCredentials};
use crate::config::Config;

/// HTTP client for the inventory backend.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

#[derive(Debug)]
struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.backend_url.clone(),
            }),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| ApiError::Validation(format!("Invalid endpoint {path}: {e}")))
    }

    /// Fetch stored credentials for a user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown identities and `Network` when the
    /// backend is unreachable. Absent fields in the response are not errors.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn fetch_credentials(
        &self,
        user_id: &UserId,
    ) -> Result<StoredCredentials, ApiError> {
        let url = self.endpoint(&format!("api/credentials/{user_id}"))?;
        let response = self.inner.client.get(url).send().await?;
        let response = error_for_status(response, "stored credentials").await?;

        let wire: WireCredentials = response.json().await?;
        Ok(wire.into())
    }

    /// Save credentials for a user. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when either field is empty (checked before any
    /// request is made), otherwise the usual transport errors.
    #[instrument(skip(self, credentials), fields(user_id = %user_id))]
    pub async fn save_credentials(
        &self,
        user_id: &UserId,
        credentials: &MerchantCredentials,
    ) -> Result<(), ApiError> {
        if !credentials.is_complete() {
            return Err(ApiError::Validation(
                "Both token and merchant id are required".to_string(),
            ));
        }

        let url = self.endpoint("api/save-credentials")?;
        let body = SaveCredentialsRequest {
            user_id: user_id.as_str(),
            token: credentials.token.expose_secret(),
            m_id: &credentials.merchant_id,
        };

        let response = self.inner.client.post(url).json(&body).send().await?;
        error_for_status(response, "save credentials").await?;
        Ok(())
    }

    /// Fetch one page of items.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the envelope cannot be
    /// parsed.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_items(
        &self,
        user_id: &UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Item>, ApiError> {
        let url = self.endpoint(&format!("api/items/{user_id}"))?;
        let response = self
            .inner
            .client
            .get(url)
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await?;
        let response = error_for_status(response, "item page").await?;

        let envelope: ItemsEnvelope = response.json().await?;
        Ok(envelope.elements.into_iter().map(Item::from).collect())
    }

    /// Create a product via multipart upload.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when the backend rejects the fields, otherwise
    /// the usual transport errors.
    #[instrument(skip(self, product, image), fields(user_id = %user_id, sku = %product.sku))]
    pub async fn create_product(
        &self,
        user_id: &UserId,
        product: &NewProduct,
        image: Option<ImageAttachment>,
    ) -> Result<Item, ApiError> {
        let url = self.endpoint("api/create-product")?;

        let mut form = Form::new()
            .text("name", product.name.clone())
            .text("category", product.category.name())
            .text("subcategory", product.subcategory.clone())
            .text("price", product.price.to_string())
            .text("stockCount", product.stock_count.to_string())
            .text("cost", product.cost.to_string())
            .text("sku", product.sku.clone())
            .text("userId", user_id.to_string());

        if let Some(image) = image {
            let part = Part::bytes(image.bytes)
                .file_name(image.filename)
                .mime_str(&image.content_type)?;
            form = form.part("image", part);
        }

        let response = self.inner.client.post(url).multipart(form).send().await?;
        let response = error_for_status(response, "create product").await?;

        let wire: WireItem = response.json().await?;
        Ok(wire.into())
    }

    /// Allocate the next SKU sequence number for a category.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when the backend does not recognize the
    /// category, otherwise the usual transport errors.
    #[instrument(skip(self), fields(user_id = %user_id, category = %category))]
    pub async fn allocate_next_sku(
        &self,
        user_id: &UserId,
        category: Category,
    ) -> Result<u64, ApiError> {
        let url = self.endpoint(&format!("api/next-sku/{user_id}/{category}"))?;
        let response = self.inner.client.get(url).send().await?;
        let response = error_for_status(response, "next sku").await?;

        let body: NextSkuResponse = response.json().await?;
        Ok(body.count)
    }
}

impl MerchantApi for ApiClient {
    async fn fetch_credentials(&self, user_id: &UserId) -> Result<StoredCredentials, ApiError> {
        Self::fetch_credentials(self, user_id).await
    }

    async fn save_credentials(
        &self,
        user_id: &UserId,
        credentials: &MerchantCredentials,
    ) -> Result<(), ApiError> {
        Self::save_credentials(self, user_id, credentials).await
    }

    async fn list_items(
        &self,
        user_id: &UserId,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Item>, ApiError> {
        Self::list_items(self, user_id, limit, offset).await
    }

    async fn create_product(
        &self,
        user_id: &UserId,
        product: &NewProduct,
        image: Option<ImageAttachment>,
    ) -> Result<Item, ApiError> {
        Self::create_product(self, user_id, product, image).await
    }

    async fn allocate_next_sku(
        &self,
        user_id: &UserId,
        category: Category,
    ) -> Result<u64, ApiError> {
        Self::allocate_next_sku(self, user_id, category).await
    }
}

/// Map non-success statuses onto the error taxonomy.
async fn error_for_status(response: Response, context: &str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = if body.is_empty() {
        context.to_string()
    } else {
        body
    };

    Err(match status {
        StatusCode::NOT_FOUND => ApiError::NotFound(detail),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::Validation(detail)
        }
        s => ApiError::Server { status: s.as_u16() },
    })
}
