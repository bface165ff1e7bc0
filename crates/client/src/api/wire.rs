//! Wire-format types for the backend HTTP API.
//!
//! The backend nests the category under `categories.elements[0].name` and
//! the stock count under `itemStock.stockCount`; timestamps travel as epoch
//! milliseconds. Everything is flattened into [`Item`] here so the rest of
//! the client never sees the nesting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vitrina_core::{Item, ItemId};

use super::StoredCredentials;

/// `GET /api/credentials/{userId}` response body.
#[derive(Debug, Deserialize)]
pub(super) struct WireCredentials {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, rename = "mId")]
    pub m_id: Option<String>,
}

impl From<WireCredentials> for StoredCredentials {
    fn from(wire: WireCredentials) -> Self {
        Self {
            token: wire.token,
            merchant_id: wire.m_id,
        }
    }
}

/// `POST /api/save-credentials` request body.
#[derive(Debug, Serialize)]
pub(super) struct SaveCredentialsRequest<'a> {
    #[serde(rename = "userId")]
    pub user_id: &'a str,
    pub token: &'a str,
    #[serde(rename = "mId")]
    pub m_id: &'a str,
}

/// `GET /api/items/{userId}` response envelope.
#[derive(Debug, Deserialize)]
pub(super) struct ItemsEnvelope {
    #[serde(default)]
    pub elements: Vec<WireItem>,
}

/// `GET /api/next-sku/{userId}/{category}` response body.
#[derive(Debug, Deserialize)]
pub(super) struct NextSkuResponse {
    pub count: u64,
}

/// One inventory item as the backend ships it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WireItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub cost: Option<i64>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub categories: Option<WireCategories>,
    #[serde(default)]
    pub item_stock: Option<WireItemStock>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub modified_time: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct WireCategories {
    #[serde(default)]
    pub elements: Vec<WireCategory>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireCategory {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WireItemStock {
    #[serde(default)]
    pub stock_count: i64,
}

impl From<WireItem> for Item {
    fn from(wire: WireItem) -> Self {
        let category = wire
            .categories
            .and_then(|c| c.elements.into_iter().next())
            .map(|c| c.name);
        let stock_count = wire.item_stock.map_or(0, |s| s.stock_count);

        Self {
            id: ItemId::new(wire.id),
            name: wire.name,
            sku: wire.sku,
            category,
            subcategory: wire.subcategory,
            price: wire.price,
            cost: wire.cost,
            stock_count,
            modified_time: wire.modified_time,
        }
    }
}
