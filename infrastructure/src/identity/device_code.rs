//! Device code identity provider.
//!
//! Implements [`InteractiveAuth`] for terminal use: the user opens the
//! verification URL on any device and types the code shown by the
//! [`LoginPrompt`], while this adapter polls the token endpoint.

use super::protocol::{
    DEVICE_CODE_GRANT, DeviceCodeResponse, GraphProfile, PollStep, REFRESH_GRANT,
    TokenErrorResponse, TokenResponse, classify_poll_error,
};
use crate::config::FileConfig;
use crate::http::{build_client, join_url, snippet};
use assistant_application::{AuthError, DeviceCodeChallenge, InteractiveAuth, LoginPrompt};
use assistant_domain::{AccessToken, Account, AuthSession, AuthState};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Tokens expiring within this window are refreshed before use.
const EXPIRY_SKEW_SECS: i64 = 60;
const SLOW_DOWN_STEP: Duration = Duration::from_secs(5);
const OFFLINE_ACCESS: &str = "offline_access";
const MAX_TOKEN_LIFETIME_SECS: u64 = 24 * 60 * 60;
const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Settings the provider needs, resolved from configuration.
#[derive(Debug, Clone)]
pub struct IdentitySettings {
    pub client_id: String,
    pub authority: String,
    pub scopes: Vec<String>,
    pub post_logout_redirect_uri: String,
    pub graph_base_url: String,
    pub request_timeout: Duration,
}

impl IdentitySettings {
    pub fn from_config(config: &FileConfig) -> Self {
        Self {
            client_id: config.identity.client_id.clone(),
            authority: config.identity.authority(),
            scopes: config.identity.scopes.clone(),
            post_logout_redirect_uri: config.identity.post_logout_redirect_uri().to_string(),
            graph_base_url: config.search.graph_base_url.clone(),
            request_timeout: config.behavior.request_timeout(),
        }
    }

    /// Space-separated scope list, always including `offline_access` so a
    /// refresh token is issued.
    fn scope_param(&self) -> String {
        let mut scopes: Vec<&str> = self.scopes.iter().map(String::as_str).collect();
        if !scopes.contains(&OFFLINE_ACCESS) {
            scopes.push(OFFLINE_ACCESS);
        }
        scopes.join(" ")
    }

    fn endpoint(&self, name: &str) -> String {
        join_url(&self.authority, &format!("oauth2/v2.0/{}", name))
    }
}

#[derive(Default)]
struct SessionCache {
    state: AuthState,
    session: Option<AuthSession>,
}

impl SessionCache {
    fn clear(&mut self) {
        self.state = AuthState::Unauthenticated;
        self.session = None;
    }
}

pub struct DeviceCodeIdentityProvider {
    settings: IdentitySettings,
    client: Client,
    prompt: Arc<dyn LoginPrompt>,
    ready: AtomicBool,
    cache: RwLock<SessionCache>,
}

impl DeviceCodeIdentityProvider {
    pub fn new(settings: IdentitySettings, prompt: Arc<dyn LoginPrompt>) -> Result<Self, AuthError> {
        let client = build_client(settings.request_timeout)
            .map_err(|e| AuthError::Other(e.to_string()))?;
        Ok(Self {
            settings,
            client,
            prompt,
            ready: AtomicBool::new(false),
            cache: RwLock::new(SessionCache::default()),
        })
    }

    fn ensure_ready(&self) -> Result<(), AuthError> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(AuthError::NotReady)
        }
    }

    async fn request_device_code(&self) -> Result<DeviceCodeResponse, AuthError> {
        let scope = self.settings.scope_param();
        let response = self
            .client
            .post(self.settings.endpoint("devicecode"))
            .form(&[
                ("client_id", self.settings.client_id.as_str()),
                ("scope", scope.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::LoginFailed(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::LoginFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(AuthError::LoginFailed(error_summary(&text)));
        }
        serde_json::from_str(&text).map_err(|e| AuthError::LoginFailed(e.to_string()))
    }

    /// Post to the token endpoint. `Ok(Err(..))` carries the provider's
    /// OAuth error so callers can decide whether to keep polling.
    async fn token_request(
        &self,
        form: &[(&str, &str)],
    ) -> Result<Result<TokenResponse, TokenErrorResponse>, String> {
        let response = self
            .client
            .post(self.settings.endpoint("token"))
            .form(form)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        let text = response.text().await.map_err(|e| e.to_string())?;

        if status.is_success() {
            serde_json::from_str(&text)
                .map(Ok)
                .map_err(|e| format!("{}: {}", e, snippet(&text)))
        } else {
            serde_json::from_str(&text)
                .map(Err)
                .map_err(|_| format!("HTTP {}: {}", status.as_u16(), snippet(&text)))
        }
    }

    async fn poll_for_token(&self, grant: &DeviceCodeResponse) -> Result<TokenResponse, AuthError> {
        let (lifetime, mut interval) = poll_timing(grant.expires_in, grant.interval);
        let deadline = Instant::now() + lifetime;
        let form = [
            ("grant_type", DEVICE_CODE_GRANT),
            ("client_id", self.settings.client_id.as_str()),
            ("device_code", grant.device_code.as_str()),
        ];

        loop {
            tokio::time::sleep(interval).await;
            if Instant::now() >= deadline {
                return Err(AuthError::LoginFailed("The sign-in code expired".into()));
            }

            match self.token_request(&form).await.map_err(AuthError::LoginFailed)? {
                Ok(token) => return Ok(token),
                Err(error) => match classify_poll_error(&error) {
                    PollStep::Pending => debug!("Waiting for device code confirmation"),
                    PollStep::SlowDown => {
                        interval += SLOW_DOWN_STEP;
                        debug!(interval_secs = interval.as_secs(), "Identity provider asked to slow down");
                    }
                    PollStep::Failed(reason) => return Err(AuthError::LoginFailed(reason)),
                },
            }
        }
    }

    /// Resolve the signed-in account from Graph. Best-effort: a profile
    /// failure does not undo an otherwise successful login.
    async fn fetch_account(&self, token: &AccessToken) -> Account {
        let url = join_url(&self.settings.graph_base_url, "me");
        let result = async {
            let response = self
                .client
                .get(&url)
                .bearer_auth(token.secret())
                .send()
                .await?
                .error_for_status()?;
            response.json::<GraphProfile>().await
        }
        .await;

        match result {
            Ok(profile) => profile.into_account(),
            Err(e) => {
                warn!(error = %e, "Could not read the signed-in profile");
                Account::new("unknown")
            }
        }
    }

    async fn run_login(&self) -> Result<AuthSession, AuthError> {
        let grant = self.request_device_code().await?;

        let challenge = DeviceCodeChallenge {
            message: grant.message.clone().unwrap_or_else(|| {
                format!(
                    "To sign in, open {} and enter the code {}",
                    grant.verification_uri, grant.user_code
                )
            }),
            verification_uri: grant.verification_uri.clone(),
            user_code: grant.user_code.clone(),
            expires_in_secs: grant.expires_in,
        };
        self.prompt
            .present(&challenge)
            .map_err(|e| AuthError::LoginBlocked(e.to_string()))?;

        let token = self.poll_for_token(&grant).await?;
        let access_token = AccessToken::new(token.access_token);
        let account = self.fetch_account(&access_token).await;

        Ok(AuthSession {
            account,
            access_token,
            expires_at: expires_at(token.expires_in),
            refresh_token: token.refresh_token,
        })
    }

    async fn refresh(&self, session: &AuthSession) -> Result<AuthSession, AuthError> {
        let refresh_token = session
            .refresh_token
            .as_deref()
            .ok_or_else(|| AuthError::TokenAcquisition("session expired".into()))?;
        let scope = self.settings.scope_param();
        let form = [
            ("grant_type", REFRESH_GRANT),
            ("client_id", self.settings.client_id.as_str()),
            ("refresh_token", refresh_token),
            ("scope", scope.as_str()),
        ];

        match self
            .token_request(&form)
            .await
            .map_err(AuthError::TokenAcquisition)?
        {
            Ok(token) => Ok(AuthSession {
                account: session.account.clone(),
                access_token: AccessToken::new(token.access_token),
                expires_at: expires_at(token.expires_in),
                // The provider may rotate the refresh token.
                refresh_token: token.refresh_token.or_else(|| session.refresh_token.clone()),
            }),
            Err(error) => Err(AuthError::TokenAcquisition(error.summary())),
        }
    }

    #[cfg(test)]
    async fn install_session(&self, session: AuthSession) {
        let mut cache = self.cache.write().await;
        cache.state = AuthState::Authenticated;
        cache.session = Some(session);
    }
}

/// Code lifetime and initial poll interval, clamped to sane bounds.
fn poll_timing(expires_in: u64, interval: u64) -> (Duration, Duration) {
    (
        Duration::from_secs(expires_in.min(MAX_TOKEN_LIFETIME_SECS)),
        Duration::from_secs(interval).max(MIN_POLL_INTERVAL),
    )
}

fn expires_at(expires_in: u64) -> chrono::DateTime<Utc> {
    let secs = i64::try_from(expires_in.min(MAX_TOKEN_LIFETIME_SECS)).unwrap_or(0);
    Utc::now() + chrono::Duration::seconds(secs)
}

/// Rolls an abandoned login back to signed-out when its future is dropped
/// mid-poll.
struct PendingLogin<'a> {
    provider: &'a DeviceCodeIdentityProvider,
    settled: bool,
}

impl<'a> PendingLogin<'a> {
    fn new(provider: &'a DeviceCodeIdentityProvider) -> Self {
        Self {
            provider,
            settled: false,
        }
    }

    fn settle(&mut self) {
        self.settled = true;
    }
}

impl Drop for PendingLogin<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        debug!("Sign-in abandoned before completion");
        self.provider.prompt.finished(false);
        if let Ok(mut cache) = self.provider.cache.try_write()
            && cache.state == AuthState::Authenticating
        {
            cache.clear();
        }
    }
}

fn error_summary(text: &str) -> String {
    serde_json::from_str::<TokenErrorResponse>(text)
        .map(|e| e.summary())
        .unwrap_or_else(|_| snippet(text))
}

#[async_trait]
impl InteractiveAuth for DeviceCodeIdentityProvider {
    async fn initialize(&self) -> Result<(), AuthError> {
        if self.is_ready() {
            return Ok(());
        }
        if self.settings.client_id.trim().is_empty() {
            return Err(AuthError::Other(
                "identity.client_id is not configured".into(),
            ));
        }
        self.ready.store(true, Ordering::SeqCst);
        debug!(authority = %self.settings.authority, "Identity provider initialized");
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn login(&self) -> Result<Account, AuthError> {
        self.ensure_ready()?;
        self.cache.write().await.state = AuthState::Authenticating;

        let mut pending = PendingLogin::new(self);
        let result = self.run_login().await;
        pending.settle();
        self.prompt.finished(result.is_ok());

        let mut cache = self.cache.write().await;
        match result {
            Ok(session) => {
                let account = session.account.clone();
                info!(account = %account.username, "Signed in");
                cache.state = AuthState::Authenticated;
                cache.session = Some(session);
                Ok(account)
            }
            Err(e) => {
                warn!(error = %e, "Sign-in failed");
                cache.clear();
                Err(e)
            }
        }
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.ensure_ready()?;
        let mut cache = self.cache.write().await;
        if let Some(session) = cache.session.take() {
            info!(
                account = %session.account.username,
                redirect = %self.settings.post_logout_redirect_uri,
                "Signed out"
            );
        }
        cache.clear();
        Ok(())
    }

    async fn get_token(&self) -> Result<AccessToken, AuthError> {
        self.ensure_ready()?;
        let skew = chrono::Duration::seconds(EXPIRY_SKEW_SECS);

        let session = {
            let cache = self.cache.read().await;
            match &cache.session {
                None => return Err(AuthError::NoAccount),
                Some(session) if session.is_valid_at(Utc::now(), skew) => {
                    return Ok(session.access_token.clone());
                }
                Some(session) => session.clone(),
            }
        };

        debug!("Access token near expiry, refreshing");
        match self.refresh(&session).await {
            Ok(refreshed) => {
                let token = refreshed.access_token.clone();
                let mut cache = self.cache.write().await;
                cache.state = AuthState::Authenticated;
                cache.session = Some(refreshed);
                Ok(token)
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed, dropping session");
                self.cache.write().await.clear();
                Err(e)
            }
        }
    }

    async fn state(&self) -> AuthState {
        self.cache.read().await.state
    }

    async fn account(&self) -> Option<Account> {
        self.cache
            .read()
            .await
            .session
            .as_ref()
            .map(|s| s.account.clone())
    }
}
