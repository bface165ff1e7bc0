//! Merchant credential commands.

use vitrina_client::SessionProvider;
use vitrina_core::MerchantCredentials;

use super::{CommandError, bootstrap};

/// Show whether the acting identity has credentials configured.
pub async fn show() -> Result<(), CommandError> {
    let (_config, api, user_id) = bootstrap()?;

    let provider = SessionProvider::new(api);
    provider.identity_changed(Some(user_id.clone())).await;

    if provider.current().credentials_configured {
        println!("Credentials configured for {user_id}.");
    } else {
        println!(
            "No credentials configured for {user_id}. Run `vitrina credentials set` first."
        );
    }
    Ok(())
}

/// Save credentials for the acting identity.
pub async fn set(token: &str, merchant_id: &str) -> Result<(), CommandError> {
    let (_config, api, user_id) = bootstrap()?;

    let credentials = MerchantCredentials::new(token, merchant_id);

    let provider = SessionProvider::new(api);
    provider.identity_changed(Some(user_id.clone())).await;
    provider.save_credentials(&credentials).await?;

    println!("Credentials saved for {user_id}.");
    Ok(())
}
