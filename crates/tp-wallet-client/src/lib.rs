use anyhow::Result;
use async_trait::async_trait;
use tp_api_types::{ConnectedWallet, WalletAddress, WalletDescriptor};

/// Callback fired by the SDK on every status change. `None` means no wallet is connected.
pub type StatusListener = Box<dyn Fn(Option<ConnectedWallet>)>;

/// Why the live adapter could not be brought up. Every variant routes the page to demo mode.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("wallet SDK unavailable: {0}")]
    SdkUnavailable(String),
    #[error("manifest unreachable at {url}: {reason}")]
    ManifestUnavailable { url: String, reason: String },
    #[error("manifest at {url} is invalid: {reason}")]
    ManifestInvalid { url: String, reason: String },
    #[error("wallet SDK initialisation failed: {0}")]
    InitFailed(String),
}

/// Facade over the external wallet-connection SDK.
///
/// Browser-backed implementations hold JS handles, so the trait is `?Send`.
#[async_trait(?Send)]
pub trait WalletSession {
    async fn wallets(&self) -> Result<Vec<WalletDescriptor>>;
    async fn open_single_wallet(&self, app_name: &str) -> Result<()>;
    async fn open_modal(&self) -> Result<()>;
    async fn disconnect(&self) -> Result<()>;
    fn current_wallet(&self) -> Option<ConnectedWallet>;
    fn subscribe(&self, listener: StatusListener) -> Result<()>;
}

/// Remote account-balance lookup. Amounts are in nanotons.
#[async_trait(?Send)]
pub trait BalanceSource {
    async fn address_balance(&self, address: &WalletAddress) -> Result<u128>;
}

/// First wallet whose app name or display name contains `hint`, case-insensitively.
pub fn find_wallet<'a>(wallets: &'a [WalletDescriptor], hint: &str) -> Option<&'a WalletDescriptor> {
    let hint = hint.to_lowercase();
    wallets.iter().find(|w| {
        w.app_name.to_lowercase().contains(&hint) || w.name.to_lowercase().contains(&hint)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(name: &str, app_name: &str) -> WalletDescriptor {
        WalletDescriptor {
            name: name.to_owned(),
            app_name: app_name.to_owned(),
        }
    }

    #[test]
    fn find_wallet_matches_either_name_case_insensitively() {
        let wallets = vec![
            wallet("Tonkeeper", "tonkeeper"),
            wallet("MyTonWallet", "mytonwallet"),
            wallet("Tonhub", "tonhub"),
        ];

        assert_eq!(find_wallet(&wallets, "tonhub").map(|w| w.name.as_str()), Some("Tonhub"));
        assert_eq!(
            find_wallet(&wallets, "MyTon").map(|w| w.app_name.as_str()),
            Some("mytonwallet")
        );
        assert!(find_wallet(&wallets, "openmask").is_none());
    }

    #[test]
    fn find_wallet_returns_first_match() {
        let wallets = vec![wallet("Wallet A", "tonwallet"), wallet("Wallet B", "mytonwallet")];
        assert_eq!(find_wallet(&wallets, "tonwallet").unwrap().name, "Wallet A");
    }

    #[test]
    fn session_error_messages_name_the_cause() {
        let err = SessionError::ManifestInvalid {
            url: "https://example.org/tonconnect-manifest.json".to_owned(),
            reason: "missing field `iconUrl`".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "manifest at https://example.org/tonconnect-manifest.json is invalid: missing field `iconUrl`"
        );
    }
}
