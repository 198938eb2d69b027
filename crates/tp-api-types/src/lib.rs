use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WalletAddress(pub String);

impl WalletAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which session adapter backs the page. Fixed once bootstrap finishes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Live,
    Demo,
}

/// The visible panel. Exactly one is shown at a time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UiState {
    #[default]
    Disconnected,
    AwaitingConnection,
    Connected,
}

impl UiState {
    /// Suffix of the `state-*` panel id in the page markup.
    pub fn panel(self) -> &'static str {
        match self {
            UiState::Disconnected => "disconnected",
            UiState::AwaitingConnection => "qr",
            UiState::Connected => "connected",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub address: Option<WalletAddress>,
    pub mode: Option<SessionMode>,
}

/// Entry of the SDK wallet list (`getWallets()`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "appName")]
    pub app_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletAccount {
    pub address: String,
    #[serde(default)]
    pub chain: String,
}

/// Wallet object reported by the SDK once a session is established.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectedWallet {
    pub account: WalletAccount,
}

/// `tonconnect-manifest.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TonConnectManifest {
    pub url: String,
    pub name: String,
    #[serde(rename = "iconUrl")]
    pub icon_url: String,
    #[serde(default, rename = "termsOfUseUrl", skip_serializing_if = "Option::is_none")]
    pub terms_of_use_url: Option<String>,
    #[serde(default, rename = "privacyPolicyUrl", skip_serializing_if = "Option::is_none")]
    pub privacy_policy_url: Option<String>,
}

/// toncenter v2 `getAddressBalance` body. `result` is a nanoton integer string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressBalanceResponse {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdk_wallet_objects_ignore_unknown_fields() {
        let raw = r#"{
            "name": "Tonkeeper",
            "appName": "tonkeeper",
            "imageUrl": "https://tonkeeper.com/assets/tonconnect-icon.png",
            "platforms": ["ios", "android"]
        }"#;
        let wallet: WalletDescriptor = serde_json::from_str(raw).unwrap();
        assert_eq!(wallet.app_name, "tonkeeper");
        assert_eq!(wallet.name, "Tonkeeper");

        let raw = r#"{
            "device": { "appName": "tonkeeper" },
            "account": { "address": "0:abcd", "chain": "-239", "publicKey": "ff" }
        }"#;
        let connected: ConnectedWallet = serde_json::from_str(raw).unwrap();
        assert_eq!(connected.account.address, "0:abcd");
        assert_eq!(connected.account.chain, "-239");
    }

    #[test]
    fn manifest_requires_icon_url() {
        let ok = r#"{"url":"https://a.b","name":"TonPort","iconUrl":"https://a.b/i.png"}"#;
        assert!(serde_json::from_str::<TonConnectManifest>(ok).is_ok());

        let missing = r#"{"url":"https://a.b","name":"TonPort"}"#;
        assert!(serde_json::from_str::<TonConnectManifest>(missing).is_err());
    }

    #[test]
    fn panels_match_markup_ids() {
        assert_eq!(UiState::default(), UiState::Disconnected);
        assert_eq!(UiState::AwaitingConnection.panel(), "qr");
        assert_eq!(UiState::Connected.panel(), "connected");
    }
}
