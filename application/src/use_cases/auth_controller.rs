//! Auth controller use case.
//!
//! UI-facing wrapper around an [`InteractiveAuth`] adapter. It runs the
//! silent sign-in check, drives login and logout, and keeps a status the
//! display layer renders next to its sign-in control.

use crate::ports::identity::{AuthError, InteractiveAuth};
use assistant_domain::{AccessToken, Account};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Shown when the login prompt could not be presented.
pub const LOGIN_BLOCKED_MESSAGE: &str =
    "The login prompt could not be shown. Run the assistant in an interactive terminal and try again.";

/// Shown when login failed without a usable error message.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

/// Shown when the user interrupted a pending login.
pub const LOGIN_CANCELLED_MESSAGE: &str = "Login cancelled.";

/// Snapshot of the sign-in state for display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub account: Option<Account>,
    /// Human-readable problem to show near the sign-in control.
    pub error: Option<String>,
}

/// Drives sign-in, sign-out and silent token checks
pub struct AuthController {
    auth: Arc<dyn InteractiveAuth>,
    status: Mutex<AuthStatus>,
}

impl AuthController {
    pub fn new(auth: Arc<dyn InteractiveAuth>) -> Self {
        Self {
            auth,
            status: Mutex::new(AuthStatus::default()),
        }
    }

    /// Latest status without touching the identity provider.
    pub fn status(&self) -> AuthStatus {
        self.status
            .lock()
            .map(|status| status.clone())
            .unwrap_or_default()
    }

    /// Initialize the adapter if needed and silently check for a session.
    ///
    /// A missing account is the normal signed-out state and records no error.
    pub async fn check(&self) -> AuthStatus {
        if !self.auth.is_ready()
            && let Err(e) = self.auth.initialize().await
        {
            warn!("Identity client failed to initialize: {}", e);
            return self.set(AuthStatus {
                authenticated: false,
                account: None,
                error: Some(e.to_string()),
            });
        }

        match self.auth.get_token().await {
            Ok(_) => {
                let account = self.auth.account().await;
                self.set(AuthStatus {
                    authenticated: true,
                    account,
                    error: None,
                })
            }
            Err(e) if e.is_no_account() => self.set(AuthStatus::default()),
            Err(e) => {
                warn!("Silent token check failed: {}", e);
                self.set(AuthStatus {
                    authenticated: false,
                    account: None,
                    error: Some(e.to_string()),
                })
            }
        }
    }

    /// Run the interactive login, then re-check the session.
    pub async fn login(&self) -> AuthStatus {
        self.clear_error();

        match self.auth.login().await {
            Ok(account) => {
                info!("Signed in as {}", account.username);
                self.check().await
            }
            Err(e) => {
                warn!("Login failed: {}", e);
                self.set(AuthStatus {
                    authenticated: false,
                    account: None,
                    error: Some(Self::login_message(&e)),
                })
            }
        }
    }

    /// Like [`login`](Self::login), but gives up as soon as `cancellation`
    /// fires. The abandoned attempt leaves the user signed out.
    pub async fn login_until(&self, cancellation: Option<&CancellationToken>) -> AuthStatus {
        let Some(token) = cancellation else {
            return self.login().await;
        };

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                info!("Login cancelled");
                self.set(AuthStatus {
                    authenticated: false,
                    account: None,
                    error: Some(LOGIN_CANCELLED_MESSAGE.to_string()),
                })
            }
            status = self.login() => status,
        }
    }

    /// Sign out. The authenticated flag is kept if the provider refused.
    pub async fn logout(&self) -> AuthStatus {
        self.clear_error();

        match self.auth.logout().await {
            Ok(()) => {
                info!("Signed out");
                self.set(AuthStatus::default())
            }
            Err(e) => {
                warn!("Logout failed: {}", e);
                let mut status = self.status();
                status.error = Some(e.to_string());
                self.set(status)
            }
        }
    }

    /// Silent token acquisition that keeps the status in sync.
    pub async fn access_token(&self) -> Result<AccessToken, AuthError> {
        match self.auth.get_token().await {
            Ok(token) => Ok(token),
            Err(e) => {
                let error = if e.is_no_account() || e.kind().needs_login() {
                    None
                } else {
                    Some(e.to_string())
                };
                self.set(AuthStatus {
                    authenticated: false,
                    account: None,
                    error,
                });
                Err(e)
            }
        }
    }

    pub fn login_message(error: &AuthError) -> String {
        match error {
            AuthError::LoginBlocked(_) => LOGIN_BLOCKED_MESSAGE.to_string(),
            other => {
                let message = other.to_string();
                if message.trim().is_empty() {
                    LOGIN_FAILED_MESSAGE.to_string()
                } else {
                    message
                }
            }
        }
    }

    fn clear_error(&self) {
        if let Ok(mut status) = self.status.lock() {
            status.error = None;
        }
    }

    fn set(&self, status: AuthStatus) -> AuthStatus {
        if let Ok(mut current) = self.status.lock() {
            *current = status.clone();
        }
        status
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use assistant_domain::AuthState;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    // ==================== Test Mocks ====================

    pub(crate) struct MockAuth {
        pub ready: AtomicBool,
        pub init_result: Mutex<Result<(), AuthError>>,
        pub token: Mutex<Result<AccessToken, AuthError>>,
        pub login_result: Mutex<Result<Account, AuthError>>,
        pub logout_result: Mutex<Result<(), AuthError>>,
        pub login_calls: AtomicUsize,
        pub token_calls: AtomicUsize,
        /// Login never resolves, like a device code nobody enters.
        pub hang_login: AtomicBool,
    }

    impl MockAuth {
        pub fn signed_in() -> Self {
            Self::with_token(Ok(AccessToken::new("token-123")))
        }

        pub fn signed_out() -> Self {
            Self::with_token(Err(AuthError::NoAccount))
        }

        pub fn with_token(token: Result<AccessToken, AuthError>) -> Self {
            Self {
                ready: AtomicBool::new(true),
                init_result: Mutex::new(Ok(())),
                token: Mutex::new(token),
                login_result: Mutex::new(Ok(Account::new("jane@contoso.com"))),
                logout_result: Mutex::new(Ok(())),
                login_calls: AtomicUsize::new(0),
                token_calls: AtomicUsize::new(0),
                hang_login: AtomicBool::new(false),
            }
        }

        pub fn logins(&self) -> usize {
            self.login_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl InteractiveAuth for MockAuth {
        async fn initialize(&self) -> Result<(), AuthError> {
            let result = self.init_result.lock().unwrap().clone();
            if result.is_ok() {
                self.ready.store(true, Ordering::SeqCst);
            }
            result
        }

        fn is_ready(&self) -> bool {
            self.ready.load(Ordering::SeqCst)
        }

        async fn login(&self) -> Result<Account, AuthError> {
            self.login_calls.fetch_add(1, Ordering::SeqCst);
            if self.hang_login.load(Ordering::SeqCst) {
                std::future::pending::<()>().await;
            }
            let result = self.login_result.lock().unwrap().clone();
            if result.is_ok() {
                *self.token.lock().unwrap() = Ok(AccessToken::new("fresh-token"));
            }
            result
        }

        async fn logout(&self) -> Result<(), AuthError> {
            let result = self.logout_result.lock().unwrap().clone();
            if result.is_ok() {
                *self.token.lock().unwrap() = Err(AuthError::NoAccount);
            }
            result
        }

        async fn get_token(&self) -> Result<AccessToken, AuthError> {
            self.token_calls.fetch_add(1, Ordering::SeqCst);
            self.token.lock().unwrap().clone()
        }

        async fn state(&self) -> AuthState {
            if self.token.lock().unwrap().is_ok() {
                AuthState::Authenticated
            } else {
                AuthState::Unauthenticated
            }
        }

        async fn account(&self) -> Option<Account> {
            if self.token.lock().unwrap().is_ok() {
                Some(Account::new("jane@contoso.com"))
            } else {
                None
            }
        }
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_check_signed_in() {
        let controller = AuthController::new(Arc::new(MockAuth::signed_in()));
        let status = controller.check().await;
        assert!(status.authenticated);
        assert_eq!(status.account.unwrap().username, "jane@contoso.com");
        assert!(status.error.is_none());
    }

    #[tokio::test]
    async fn test_check_without_account_records_no_error() {
        let controller = AuthController::new(Arc::new(MockAuth::signed_out()));
        let status = controller.check().await;
        assert!(!status.authenticated);
        assert!(status.error.is_none());
    }

    #[tokio::test]
    async fn test_check_unexpected_failure_records_error() {
        let auth = MockAuth::with_token(Err(AuthError::TokenAcquisition(
            "invalid_grant".to_string(),
        )));
        let controller = AuthController::new(Arc::new(auth));
        let status = controller.check().await;
        assert!(!status.authenticated);
        assert!(status.error.unwrap().contains("invalid_grant"));
    }

    #[tokio::test]
    async fn test_check_initializes_when_not_ready() {
        let auth = Arc::new(MockAuth::signed_out());
        auth.ready.store(false, Ordering::SeqCst);
        let controller = AuthController::new(auth.clone());
        controller.check().await;
        assert!(auth.is_ready());
    }

    #[tokio::test]
    async fn test_check_reports_initialization_failure() {
        let auth = MockAuth::signed_out();
        auth.ready.store(false, Ordering::SeqCst);
        *auth.init_result.lock().unwrap() = Err(AuthError::Other("bad authority".to_string()));
        let controller = AuthController::new(Arc::new(auth));
        let status = controller.check().await;
        assert!(!status.authenticated);
        assert!(status.error.unwrap().contains("bad authority"));
    }

    #[tokio::test]
    async fn test_login_success_rechecks_session() {
        let auth = Arc::new(MockAuth::signed_out());
        let controller = AuthController::new(auth.clone());
        let status = controller.login().await;
        assert!(status.authenticated);
        assert_eq!(auth.logins(), 1);
    }

    #[tokio::test]
    async fn test_login_blocked_has_friendly_message() {
        let auth = MockAuth::signed_out();
        *auth.login_result.lock().unwrap() =
            Err(AuthError::LoginBlocked("stdin is not a terminal".to_string()));
        let controller = AuthController::new(Arc::new(auth));
        let status = controller.login().await;
        assert!(!status.authenticated);
        assert_eq!(status.error.as_deref(), Some(LOGIN_BLOCKED_MESSAGE));
    }

    #[tokio::test]
    async fn test_login_failure_keeps_provider_message() {
        let auth = MockAuth::signed_out();
        *auth.login_result.lock().unwrap() =
            Err(AuthError::LoginFailed("authorization_declined".to_string()));
        let controller = AuthController::new(Arc::new(auth));
        let status = controller.login().await;
        assert_eq!(
            status.error.as_deref(),
            Some("Login failed: authorization_declined")
        );
        assert_eq!(controller.status(), status);
    }

    #[tokio::test]
    async fn test_login_until_cancelled_gives_up() {
        let auth = Arc::new(MockAuth::signed_out());
        auth.hang_login.store(true, Ordering::SeqCst);
        let controller = AuthController::new(auth.clone());
        let token = CancellationToken::new();

        let cancel_soon = async {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            token.cancel();
        };
        let (status, _) = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            async { tokio::join!(controller.login_until(Some(&token)), cancel_soon) },
        )
        .await
        .expect("login ignored cancellation");

        assert!(!status.authenticated);
        assert_eq!(status.error.as_deref(), Some(LOGIN_CANCELLED_MESSAGE));
        assert_eq!(auth.logins(), 1);
    }

    #[tokio::test]
    async fn test_login_until_without_token_is_plain_login() {
        let controller = AuthController::new(Arc::new(MockAuth::signed_out()));
        let status = controller.login_until(None).await;
        assert!(status.authenticated);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let controller = AuthController::new(Arc::new(MockAuth::signed_in()));
        controller.check().await;
        let status = controller.logout().await;
        assert!(!status.authenticated);
        assert!(status.error.is_none());
    }

    #[tokio::test]
    async fn test_logout_failure_keeps_authenticated_flag() {
        let auth = MockAuth::signed_in();
        *auth.logout_result.lock().unwrap() = Err(AuthError::LogoutFailed("offline".to_string()));
        let controller = AuthController::new(Arc::new(auth));
        controller.check().await;
        let status = controller.logout().await;
        assert!(status.authenticated);
        assert!(status.error.unwrap().contains("offline"));
    }

    #[tokio::test]
    async fn test_access_token_without_account_is_silent() {
        let controller = AuthController::new(Arc::new(MockAuth::signed_out()));
        let result = controller.access_token().await;
        assert!(matches!(result, Err(AuthError::NoAccount)));
        assert!(controller.status().error.is_none());
    }
}
