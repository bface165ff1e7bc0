//! Merchant API credentials.
//!
//! A user is "configured" once both an API token and a merchant ID are on
//! file. The token is a secret; it never appears in `Debug` output.

use secrecy::{ExposeSecret, SecretString};

/// Merchant API credentials as entered by the user.
#[derive(Debug, Clone)]
pub struct MerchantCredentials {
    /// Merchant API token.
    pub token: SecretString,
    /// Merchant identifier.
    pub merchant_id: String,
}

impl MerchantCredentials {
    /// Create credentials from user input.
    #[must_use]
    pub fn new(token: impl Into<String>, merchant_id: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            merchant_id: merchant_id.into(),
        }
    }

    /// Whether both fields are present and non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.token.expose_secret().is_empty() && !self.merchant_id.is_empty()
    }
}

/// "Credentials configured" semantics over optionally-stored fields: both
/// must be present and non-empty.
#[must_use]
pub fn is_configured(token: Option<&str>, merchant_id: Option<&str>) -> bool {
    token.is_some_and(|t| !t.is_empty()) && merchant_id.is_some_and(|m| !m.is_empty())
}
