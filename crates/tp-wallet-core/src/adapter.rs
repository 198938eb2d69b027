use crate::demo::DemoSession;
use std::rc::Rc;
use tp_api_types::SessionMode;
use tp_wallet_client::{SessionError, WalletSession};
use tracing::{info, warn};

/// Session backend for the lifetime of the page. Chosen once, never re-probed.
pub enum SessionAdapter {
    Live(Rc<dyn WalletSession>),
    Demo(DemoSession),
}

impl SessionAdapter {
    /// Commit to the live SDK if it came up, otherwise to the demo simulator.
    pub fn select(live: Result<Rc<dyn WalletSession>, SessionError>, demo: DemoSession) -> Self {
        match live {
            Ok(session) => {
                info!("wallet SDK initialised");
                SessionAdapter::Live(session)
            }
            Err(err) => {
                warn!(error = %err, "wallet SDK unavailable, running in demo mode");
                SessionAdapter::Demo(demo)
            }
        }
    }

    pub fn mode(&self) -> SessionMode {
        match self {
            SessionAdapter::Live(_) => SessionMode::Live,
            SessionAdapter::Demo(_) => SessionMode::Demo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Timings;
    use crate::test_support::{FakeWalletSession, TokioRuntime};

    fn demo() -> DemoSession {
        DemoSession::new(Rc::new(TokioRuntime), Timings::default())
    }

    #[test]
    fn any_bootstrap_error_selects_demo() {
        let errors = [
            SessionError::SdkUnavailable("script failed to load".to_owned()),
            SessionError::ManifestUnavailable {
                url: "https://example.org/tonconnect-manifest.json".to_owned(),
                reason: "404 Not Found".to_owned(),
            },
            SessionError::InitFailed("TonConnectUI is not a constructor".to_owned()),
        ];
        for err in errors {
            assert_eq!(SessionAdapter::select(Err(err), demo()).mode(), SessionMode::Demo);
        }
    }

    #[test]
    fn working_sdk_selects_live() {
        let live: Rc<dyn WalletSession> = Rc::new(FakeWalletSession::default());
        assert_eq!(SessionAdapter::select(Ok(live), demo()).mode(), SessionMode::Live);
    }
}
