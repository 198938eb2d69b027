//! Page-level configuration derived from where the page is served.

use tp_wallet_core::Timings;

pub const SDK_SCRIPT_URL: &str = "https://unpkg.com/@tonconnect/ui@latest/dist/tonconnect-ui.min.js";
pub const QR_SCRIPT_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/qrcodejs/1.0.0/qrcode.min.js";
pub const MANIFEST_FILE: &str = "tonconnect-manifest.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Absolute URL of the TON Connect app manifest next to the page.
    pub manifest_url: String,
    pub sdk_script_url: String,
    pub qr_script_url: String,
    /// `None` keeps the balance client's own default endpoint.
    pub balance_endpoint: Option<String>,
    pub timings: Timings,
}

impl AppConfig {
    pub fn from_location(href: &str) -> Self {
        Self {
            manifest_url: manifest_url_for(href),
            sdk_script_url: SDK_SCRIPT_URL.to_string(),
            qr_script_url: QR_SCRIPT_URL.to_string(),
            balance_endpoint: None,
            timings: Timings::default(),
        }
    }
}

/// Resolve the manifest against the page URL, the way a relative link would:
/// query and fragment dropped, the last path segment (e.g. `index.html`)
/// replaced by the manifest file name.
pub fn manifest_url_for(href: &str) -> String {
    let end = href.find(['?', '#']).unwrap_or(href.len());
    let page = &href[..end];
    let path_start = page.find("://").map_or(0, |i| i + 3);
    let base = match page[path_start..].rfind('/') {
        Some(i) => &page[..path_start + i + 1],
        None => return format!("{page}/{MANIFEST_FILE}"),
    };
    format!("{base}{MANIFEST_FILE}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_sits_next_to_the_page() {
        assert_eq!(
            manifest_url_for("https://example.org/app/index.html"),
            "https://example.org/app/tonconnect-manifest.json"
        );
        assert_eq!(
            manifest_url_for("https://example.org/app/"),
            "https://example.org/app/tonconnect-manifest.json"
        );
    }

    #[test]
    fn query_and_fragment_are_ignored() {
        assert_eq!(
            manifest_url_for("https://example.org/index.html?ref=tg#top"),
            "https://example.org/tonconnect-manifest.json"
        );
        assert_eq!(
            manifest_url_for("http://localhost:8080/?a=b/c"),
            "http://localhost:8080/tonconnect-manifest.json"
        );
    }

    #[test]
    fn bare_origin_gets_a_path() {
        assert_eq!(
            manifest_url_for("https://example.org"),
            "https://example.org/tonconnect-manifest.json"
        );
    }

    #[test]
    fn defaults_use_public_cdns() {
        let config = AppConfig::from_location("https://example.org/");
        assert!(config.sdk_script_url.contains("@tonconnect/ui"));
        assert!(config.qr_script_url.ends_with("qrcode.min.js"));
        assert!(config.balance_endpoint.is_none());
        assert_eq!(config.timings, Timings::default());
    }
}
