//! Backend API surface: the five merchant operations and their error
//! taxonomy.
//!
//! The operations are lifted into the [`MerchantApi`] trait so the session
//! provider, list controller, and creation flow can run against in-memory
//! fakes in tests. [`ApiClient`] is the production HTTP implementation.

use std::future::Future;

use thiserror::Error;

use vitrina_core::{Category, Item, MerchantCredentials, UserId, is_configured};

mod http;
mod wire;

pub use http::ApiClient;

/// Errors that can occur when talking to the inventory backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend unreachable or transport-level failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// No stored credentials / unknown identity / missing resource.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or invalid required fields.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Opaque backend failure (5xx or unexpected status).
    #[error("Server error: status {status}")]
    Server { status: u16 },

    /// Response body did not match the wire contract.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Credentials as stored by the backend for a user.
///
/// Absent fields mean "not configured", never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredCredentials {
    /// Merchant API token, if one was ever saved.
    pub token: Option<String>,
    /// Merchant identifier, if one was ever saved.
    pub merchant_id: Option<String>,
}

impl StoredCredentials {
    /// Whether both fields are present and non-empty.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        is_configured(self.token.as_deref(), self.merchant_id.as_deref())
    }
}

/// A fully composed product submission, amounts already in minor units.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: Category,
    pub subcategory: String,
    /// Unit price in minor units.
    pub price: i64,
    /// Unit cost in minor units.
    pub cost: i64,
    pub stock_count: i64,
    /// Pre-allocated SKU, e.g. `"CH-00007"`.
    pub sku: String,
}

/// Binary image attached to a product submission.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub filename: String,
    /// MIME type, e.g. `image/jpeg`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The five backend operations, each a stateless round trip.
pub trait MerchantApi: Send + Sync {
    /// Fetch stored credentials for an identity.
    ///
    /// Absent token/merchant-id fields mean "not configured"; only an
    /// unknown identity or an unreachable backend is an error.
    fn fetch_credentials(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<StoredCredentials, ApiError>> + Send;

    /// Persist credentials for an identity. Idempotent.
    fn save_credentials(
        &self,
        user_id: &UserId,
        credentials: &MerchantCredentials,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Fetch one page of inventory items.
    ///
    /// Returns fewer than `limit` items only on the final page; server
    /// ordering is stable across pages for the same identity.
    fn list_items(
        &self,
        user_id: &UserId,
        limit: usize,
        offset: usize,
    ) -> impl Future<Output = Result<Vec<Item>, ApiError>> + Send;

    /// Create a product, optionally with an image attachment.
    fn create_product(
        &self,
        user_id: &UserId,
        product: &NewProduct,
        image: Option<ImageAttachment>,
    ) -> impl Future<Output = Result<Item, ApiError>> + Send;

    /// Allocate the next SKU sequence number for a (user, category) pair.
    ///
    /// The counter is monotonically increasing per pair.
    fn allocate_next_sku(
        &self,
        user_id: &UserId,
        category: Category,
    ) -> impl Future<Output = Result<u64, ApiError>> + Send;
}
