//! Address display helpers.

use tp_api_types::WalletAddress;
use tracing::debug;

pub const SEPARATOR: &str = "...";

const HEAD: usize = 6;
const TAIL: usize = 4;
const MIN_SHORTENED: usize = 12;

/// `UQDabc...wxyz` for long inputs; anything under 12 characters is returned as is.
pub fn shorten(address: &str) -> String {
    let len = address.chars().count();
    if len < MIN_SHORTENED {
        return address.to_owned();
    }
    let head: String = address.chars().take(HEAD).collect();
    let tail: String = address.chars().skip(len - TAIL).collect();
    format!("{head}{SEPARATOR}{tail}")
}

/// True when `raw` already starts like a user-friendly (base64url) address.
pub fn looks_friendly(raw: &str) -> bool {
    let mut chars = raw.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('U' | 'E' | 'k' | '0'), Some('Q' | 'f'))
    )
}

/// Address shown to the user.
///
/// No conversion from the raw `workchain:hex` form is performed; raw input is
/// passed through unchanged.
pub fn to_display_form(raw: &str) -> WalletAddress {
    if !looks_friendly(raw) {
        debug!(address = raw, "raw-form address shown without conversion");
    }
    WalletAddress(raw.to_owned())
}

pub fn wallet_label(hint: &str) -> &str {
    match hint {
        "tonkeeper" => "Tonkeeper",
        "mytonwallet" => "MyTonWallet",
        "tonhub" => "Tonhub",
        "openmask" => "OpenMask",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_inputs_are_untouched() {
        for input in ["", "UQ", "EQabcdefgh", "0123456789a"] {
            assert_eq!(shorten(input), input);
        }
    }

    #[test]
    fn long_inputs_keep_head_and_tail() {
        assert_eq!(shorten("0123456789ab"), "012345...89ab");
        let address = "UQDa1b2c3d4e5f60718293a4b5c6d7e8f9a0b1c2d3e4f5a6b7c";
        let short = shorten(address);
        assert_eq!(short, "UQDa1b...6b7c");
        assert!(short.starts_with(&address[..6]));
        assert!(short.ends_with(&address[address.len() - 4..]));
    }

    #[test]
    fn shorten_counts_characters() {
        assert_eq!(shorten("ÄÖÜäöüßéèêëï"), "ÄÖÜäöü...èêëï");
    }

    #[test]
    fn display_form_is_a_passthrough() {
        let raw = "0:83dfd552e63729b472fcbcc8c45ebcc6691702558b68ec7527e1ba403a0f31a8";
        assert!(!looks_friendly(raw));
        assert_eq!(to_display_form(raw).as_str(), raw);

        let friendly = "EQCD39VS5jcptHL8vMjEXrzGaRcCVYto7HUn4bpAOg8xqB2N";
        assert!(looks_friendly(friendly));
        assert_eq!(to_display_form(friendly).as_str(), friendly);
    }

    #[test]
    fn known_wallets_have_labels() {
        assert_eq!(wallet_label("tonkeeper"), "Tonkeeper");
        assert_eq!(wallet_label("mytonwallet"), "MyTonWallet");
        assert_eq!(wallet_label("bitget"), "bitget");
    }
}
