use anyhow::{Context, Result};
use async_trait::async_trait;
use tp_api_types::{AddressBalanceResponse, WalletAddress};
use tp_wallet_client::BalanceSource;
use tracing::debug;

pub const TONCENTER_MAINNET: &str = "https://toncenter.com/api/v2";

/// HTTP balance lookup against the toncenter v2 API.
///
/// Talks to the public mainnet endpoint unless one is given.
pub struct TonCenterClient {
    endpoint: String,
    http: reqwest::Client,
}

impl Default for TonCenterClient {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TonCenterClient {
    pub fn new(endpoint: Option<String>) -> Self {
        let endpoint = endpoint.unwrap_or_else(|| TONCENTER_MAINNET.to_string());
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl BalanceSource for TonCenterClient {
    async fn address_balance(&self, address: &WalletAddress) -> Result<u128> {
        let url = format!("{}/getAddressBalance", self.endpoint);

        let response = self
            .http
            .get(&url)
            .query(&[("address", address.as_str())])
            .send()
            .await
            .context("toncenter getAddressBalance transport")?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        // toncenter reports errors as `{ "ok": false, ... }` with a 4xx status,
        // so the body is parsed before the status is judged.
        let body: AddressBalanceResponse = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(err) => anyhow::bail!("toncenter getAddressBalance HTTP {status}: {err}: {text}"),
        };

        if !body.ok {
            let reason = body.error.unwrap_or_else(|| "unknown error".to_owned());
            anyhow::bail!("toncenter getAddressBalance rejected (HTTP {status}): {reason}");
        }

        let raw = body
            .result
            .context("toncenter getAddressBalance: ok response without result")?;
        let nanotons: u128 = raw
            .trim()
            .parse()
            .with_context(|| format!("toncenter getAddressBalance: non-integer result '{raw}'"))?;

        debug!(address = %address, nanotons, "balance fetched");
        Ok(nanotons)
    }
}
