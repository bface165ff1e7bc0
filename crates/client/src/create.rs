//! Product creation flow.
//!
//! Category selection allocates the next sequence number and composes the
//! human-readable SKU. Submission converts major-unit amounts to minor
//! units, sends the multipart request, and on success hands control back
//! to the list controller with a full reset: the new item's sort position
//! relative to the accumulated page boundary is unknown, so appending
//! locally would break the pagination invariant.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::instrument;

use vitrina_core::{Category, Item, MoneyError, UserId, format_sku, to_minor};

use crate::api::{ApiError, MerchantApi, NewProduct};
use crate::list::ItemListController;

pub use crate::api::ImageAttachment;

/// User-entered product form state, amounts still in major units.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub category: Category,
    pub subcategory: String,
    /// Price in major units, e.g. `19.99`.
    pub price: Decimal,
    /// Cost in major units.
    pub cost: Decimal,
    /// Defaults to 1 when unset, matching the form default.
    pub stock_count: Option<i64>,
    /// SKU composed by [`ProductCreationFlow::select_category`].
    pub sku: String,
}

/// Drives SKU allocation and product submission for one identity.
pub struct ProductCreationFlow<A> {
    api: A,
    user_id: UserId,
    list: Arc<ItemListController<A>>,
}

impl<A: MerchantApi> ProductCreationFlow<A> {
    /// Create a flow that reports successful creations to `list`.
    #[must_use]
    pub fn new(api: A, user_id: UserId, list: Arc<ItemListController<A>>) -> Self {
        Self { api, user_id, list }
    }

    /// React to a category selection: allocate the next sequence number
    /// and compose the SKU, e.g. `Chains` -> `"CH-00007"`.
    ///
    /// # Errors
    ///
    /// Surfaces allocation errors; the draft stays editable for retry.
    #[instrument(skip(self), fields(user_id = %self.user_id, category = %category))]
    pub async fn select_category(&self, category: Category) -> Result<String, ApiError> {
        let sequence = self.api.allocate_next_sku(&self.user_id, category).await?;
        Ok(format_sku(category, sequence))
    }

    /// Submit the draft, optionally with an image.
    ///
    /// On success the list controller performs a full reset and reload;
    /// the created item shows up through that reload, never by local
    /// insertion. On failure the draft is untouched and can be retried.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an incomplete draft or bad amounts,
    /// otherwise whatever the backend reported. Reload errors after a
    /// successful creation are surfaced too; the reset itself has already
    /// happened.
    #[instrument(skip(self, draft, image), fields(user_id = %self.user_id, sku = %draft.sku))]
    pub async fn submit(
        &self,
        draft: &ProductDraft,
        image: Option<ImageAttachment>,
    ) -> Result<Item, ApiError> {
        let product = compose_submission(draft)?;
        let created = self
            .api
            .create_product(&self.user_id, &product, image)
            .await?;

        self.list.reset_and_reload().await?;
        Ok(created)
    }
}

/// Validate a draft and convert it to the wire submission.
fn compose_submission(draft: &ProductDraft) -> Result<NewProduct, ApiError> {
    if draft.name.trim().is_empty() {
        return Err(ApiError::Validation("Product name is required".to_string()));
    }
    if draft.subcategory.trim().is_empty() {
        return Err(ApiError::Validation("Subcategory is required".to_string()));
    }
    if draft.sku.is_empty() {
        return Err(ApiError::Validation(
            "SKU has not been allocated yet".to_string(),
        ));
    }

    let price = to_minor(draft.price).map_err(money_error)?;
    let cost = to_minor(draft.cost).map_err(money_error)?;

    Ok(NewProduct {
        name: draft.name.clone(),
        category: draft.category,
        subcategory: draft.subcategory.clone(),
        price,
        cost,
        stock_count: draft.stock_count.unwrap_or(1),
        sku: draft.sku.clone(),
    })
}

fn money_error(error: MoneyError) -> ApiError {
    ApiError::Validation(error.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};

    use chrono::{TimeZone, Utc};

    use vitrina_core::{ItemId, MerchantCredentials};

    use super::*;
    use crate::api::StoredCredentials;
    use crate::list::FetchOutcome;

    #[derive(Clone, Default)]
    struct FakeShop {
        inner: Arc<FakeShopInner>,
    }

    #[derive(Default)]
    struct FakeShopInner {
        sku_counter: AtomicU64,
        created: Mutex<Vec<NewProduct>>,
        reject_creation: std::sync::atomic::AtomicBool,
        list_calls: AtomicU64,
    }

    fn created_item(product: &NewProduct) -> Item {
        Item {
            id: ItemId::new("NEW1"),
            name: product.name.clone(),
            sku: Some(product.sku.clone()),
            category: Some(product.category.name().to_string()),
            subcategory: Some(product.subcategory.clone()),
            price: product.price,
            cost: Some(product.cost),
            stock_count: product.stock_count,
            modified_time: Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap(),
        }
    }

    impl MerchantApi for FakeShop {
        async fn fetch_credentials(&self, _: &UserId) -> Result<StoredCredentials, ApiError> {
            Ok(StoredCredentials::default())
        }

        async fn save_credentials(
            &self,
            _: &UserId,
            _: &MerchantCredentials,
        ) -> Result<(), ApiError> {
            Ok(())
        }

        async fn list_items(
            &self,
            _: &UserId,
            _limit: usize,
            _offset: usize,
        ) -> Result<Vec<Item>, ApiError> {
            self.inner.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .inner
                .created
                .lock()
                .unwrap()
                .iter()
                .map(created_item)
                .collect())
        }

        async fn create_product(
            &self,
            _: &UserId,
            product: &NewProduct,
            _image: Option<ImageAttachment>,
        ) -> Result<Item, ApiError> {
            if self.inner.reject_creation.load(Ordering::SeqCst) {
                return Err(ApiError::Validation("missing required field".to_string()));
            }
            self.inner.created.lock().unwrap().push(product.clone());
            Ok(created_item(product))
        }

        async fn allocate_next_sku(&self, _: &UserId, _: Category) -> Result<u64, ApiError> {
            Ok(self.inner.sku_counter.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    fn flow(api: &FakeShop) -> (ProductCreationFlow<FakeShop>, Arc<ItemListController<FakeShop>>) {
        let list = Arc::new(ItemListController::new(
            api.clone(),
            UserId::new("u-1"),
            100,
        ));
        (
            ProductCreationFlow::new(api.clone(), UserId::new("u-1"), Arc::clone(&list)),
            list,
        )
    }

    fn draft(sku: &str) -> ProductDraft {
        ProductDraft {
            name: "Cuban Link".to_string(),
            category: Category::Chains,
            subcategory: "Solid".to_string(),
            price: "19.99".parse().unwrap(),
            cost: "8.50".parse().unwrap(),
            stock_count: None,
            sku: sku.to_string(),
        }
    }

    #[tokio::test]
    async fn test_select_category_composes_formatted_sku() {
        let api = FakeShop::default();
        api.inner.sku_counter.store(6, Ordering::SeqCst);
        let (flow, _list) = flow(&api);

        let sku = flow.select_category(Category::Chains).await.unwrap();
        assert_eq!(sku, "CH-00007");

        // The counter is monotonic per category.
        let sku = flow.select_category(Category::Chains).await.unwrap();
        assert_eq!(sku, "CH-00008");
    }

    #[tokio::test]
    async fn test_submit_converts_amounts_and_defaults_stock() {
        let api = FakeShop::default();
        let (flow, _list) = flow(&api);

        flow.submit(&draft("CH-00007"), None).await.unwrap();

        let created = api.inner.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].price, 1999);
        assert_eq!(created[0].cost, 850);
        assert_eq!(created[0].stock_count, 1);
        assert_eq!(created[0].sku, "CH-00007");
    }

    #[tokio::test]
    async fn test_successful_submit_triggers_full_reset() {
        let api = FakeShop::default();
        let (flow, list) = flow(&api);
        assert_eq!(
            list.activate().await.unwrap(),
            FetchOutcome::Fetched { appended: 0 }
        );

        flow.submit(&draft("CH-00007"), None).await.unwrap();

        // The new item arrived via the reload fetch, not local insertion.
        let snapshot = list.snapshot();
        assert_eq!(snapshot.rows.len(), 1);
        assert_eq!(snapshot.rows[0].sku.as_deref(), Some("CH-00007"));
        assert_eq!(api.inner.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_submit_leaves_list_untouched() {
        let api = FakeShop::default();
        api.inner.reject_creation.store(true, Ordering::SeqCst);
        let (flow, list) = flow(&api);
        list.activate().await.unwrap();

        let d = draft("CH-00007");
        let result = flow.submit(&d, None).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));

        // Draft is still intact for retry and no reload was triggered.
        assert_eq!(d.sku, "CH-00007");
        assert_eq!(api.inner.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_incomplete_draft_is_rejected_locally() {
        let api = FakeShop::default();
        let (flow, _list) = flow(&api);

        let mut d = draft("CH-00007");
        d.name = "  ".to_string();
        assert!(matches!(
            flow.submit(&d, None).await,
            Err(ApiError::Validation(_))
        ));

        let d = draft("");
        assert!(matches!(
            flow.submit(&d, None).await,
            Err(ApiError::Validation(_))
        ));

        // Nothing reached the backend.
        assert!(api.inner.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sub_cent_amounts_are_rejected() {
        let api = FakeShop::default();
        let (flow, _list) = flow(&api);

        let mut d = draft("CH-00007");
        d.price = "19.999".parse().unwrap();
        assert!(matches!(
            flow.submit(&d, None).await,
            Err(ApiError::Validation(_))
        ));
    }
}
