use anyhow::Result;
use async_trait::async_trait;
use tp_api_types::UiState;

/// Everything the controller renders. Implemented over the DOM in the browser.
#[async_trait(?Send)]
pub trait Surface {
    /// Show exactly one state panel, hiding the others.
    fn show_state(&self, state: UiState);
    fn show_account(&self, short: &str, full: &str);
    fn show_balance(&self, text: &str);
    fn show_qr(&self, payload: &str);
    fn show_toast(&self, message: &str);
    fn hide_toast(&self);
    fn pulse_card(&self);
    async fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}
