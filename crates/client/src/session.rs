//! Session state: authenticated identity plus the derived
//! "credentials configured" flag.
//!
//! The external auth collaborator owns credential issuance; this provider
//! only consumes identity-change events. It is the single writer of
//! session state; dependents subscribe through a watch channel and treat a
//! false-to-true transition of `credentials_configured` as the signal to
//! (re)initialize their own state.

use tokio::sync::watch;
use tracing::{instrument, warn};

use vitrina_core::{MerchantCredentials, UserId};

use crate::api::{ApiError, MerchantApi};

/// Snapshot of the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// The authenticated identity, if any.
    pub identity: Option<UserId>,
    /// Whether both a token and a merchant id are on file for it.
    pub credentials_configured: bool,
}

/// Tracks the authenticated identity and its configuration state.
pub struct SessionProvider<A> {
    api: A,
    tx: watch::Sender<SessionState>,
}

impl<A: MerchantApi> SessionProvider<A> {
    /// Create a provider with no identity.
    #[must_use]
    pub fn new(api: A) -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self { api, tx }
    }

    /// Subscribe to session-state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// Current session snapshot.
    #[must_use]
    pub fn current(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Handle an identity-change event from the auth collaborator.
    ///
    /// When an identity is present its stored credentials are fetched and
    /// the configured flag derived from them. Any fetch failure is logged
    /// and maps to "not configured" - fail closed, never fatal.
    #[instrument(skip(self))]
    pub async fn identity_changed(&self, identity: Option<UserId>) {
        let credentials_configured = match &identity {
            None => false,
            Some(user_id) => match self.api.fetch_credentials(user_id).await {
                Ok(stored) => stored.is_configured(),
                Err(error) => {
                    warn!(%user_id, %error, "Credential fetch failed; treating as not configured");
                    false
                }
            },
        };

        self.tx.send_replace(SessionState {
            identity,
            credentials_configured,
        });
    }

    /// Validate and persist credentials for the current identity, then
    /// recompute the configured flag from the values just saved.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when no identity is active or a field is empty,
    /// otherwise whatever the save operation reported.
    #[instrument(skip(self, credentials))]
    pub async fn save_credentials(
        &self,
        credentials: &MerchantCredentials,
    ) -> Result<(), ApiError> {
        let Some(identity) = self.current().identity else {
            return Err(ApiError::Validation(
                "No active identity to save credentials for".to_string(),
            ));
        };

        self.api.save_credentials(&identity, credentials).await?;

        let configured = credentials.is_complete();
        self.tx.send_replace(SessionState {
            identity: Some(identity),
            credentials_configured: configured,
        });
        Ok(())
    }

    /// Clear the identity and the configured flag.
    pub fn logout(&self) {
        self.tx.send_replace(SessionState::default());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use vitrina_core::{Category, Item};

    use super::*;
    use crate::api::{ImageAttachment, NewProduct, StoredCredentials};

    /// Fake backend with scripted credential responses.
    struct FakeApi {
        credentials: Mutex<Result<StoredCredentials, ApiError>>,
        saved: Mutex<Vec<(UserId, String)>>,
    }

    impl FakeApi {
        fn with_credentials(result: Result<StoredCredentials, ApiError>) -> Self {
            Self {
                credentials: Mutex::new(result),
                saved: Mutex::new(Vec::new()),
            }
        }
    }

    impl MerchantApi for &FakeApi {
        async fn fetch_credentials(&self, _user_id: &UserId) -> Result<StoredCredentials, ApiError> {
            let guard = self.credentials.lock().unwrap();
            match &*guard {
                Ok(stored) => Ok(stored.clone()),
                Err(_) => Err(ApiError::Server { status: 500 }),
            }
        }

        async fn save_credentials(
            &self,
            user_id: &UserId,
            credentials: &MerchantCredentials,
        ) -> Result<(), ApiError> {
            self.saved
                .lock()
                .unwrap()
                .push((user_id.clone(), credentials.merchant_id.clone()));
            Ok(())
        }

        async fn list_items(
            &self,
            _user_id: &UserId,
            _limit: usize,
            _offset: usize,
        ) -> Result<Vec<Item>, ApiError> {
            Ok(Vec::new())
        }

        async fn create_product(
            &self,
            _user_id: &UserId,
            _product: &NewProduct,
            _image: Option<ImageAttachment>,
        ) -> Result<Item, ApiError> {
            Err(ApiError::Server { status: 500 })
        }

        async fn allocate_next_sku(
            &self,
            _user_id: &UserId,
            _category: Category,
        ) -> Result<u64, ApiError> {
            Ok(1)
        }
    }

    #[tokio::test]
    async fn test_identity_with_complete_credentials_is_configured() {
        let api = FakeApi::with_credentials(Ok(StoredCredentials {
            token: Some("tok".to_string()),
            merchant_id: Some("M123".to_string()),
        }));
        let provider = SessionProvider::new(&api);

        provider.identity_changed(Some(UserId::new("u-1"))).await;

        let state = provider.current();
        assert_eq!(state.identity, Some(UserId::new("u-1")));
        assert!(state.credentials_configured);
    }

    #[tokio::test]
    async fn test_empty_credentials_are_not_configured() {
        let api = FakeApi::with_credentials(Ok(StoredCredentials::default()));
        let provider = SessionProvider::new(&api);

        provider.identity_changed(Some(UserId::new("u-1"))).await;

        assert!(!provider.current().credentials_configured);
    }

    #[tokio::test]
    async fn test_fetch_failure_fails_closed() {
        let api = FakeApi::with_credentials(Err(ApiError::Server { status: 500 }));
        let provider = SessionProvider::new(&api);

        provider.identity_changed(Some(UserId::new("u-1"))).await;

        let state = provider.current();
        assert_eq!(state.identity, Some(UserId::new("u-1")));
        assert!(!state.credentials_configured);
    }

    #[tokio::test]
    async fn test_save_credentials_requires_identity() {
        let api = FakeApi::with_credentials(Ok(StoredCredentials::default()));
        let provider = SessionProvider::new(&api);

        let result = provider
            .save_credentials(&MerchantCredentials::new("tok", "M123"))
            .await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_save_credentials_flips_configured_and_notifies() {
        let api = FakeApi::with_credentials(Ok(StoredCredentials::default()));
        let provider = SessionProvider::new(&api);
        let mut rx = provider.subscribe();

        provider.identity_changed(Some(UserId::new("u-1"))).await;
        assert!(!provider.current().credentials_configured);

        provider
            .save_credentials(&MerchantCredentials::new("tok", "M123"))
            .await
            .unwrap();

        rx.changed().await.unwrap();
        assert!(rx.borrow().credentials_configured);
        assert_eq!(api.saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let api = FakeApi::with_credentials(Ok(StoredCredentials {
            token: Some("tok".to_string()),
            merchant_id: Some("M123".to_string()),
        }));
        let provider = SessionProvider::new(&api);

        provider.identity_changed(Some(UserId::new("u-1"))).await;
        provider.logout();

        assert_eq!(provider.current(), SessionState::default());
    }
}
