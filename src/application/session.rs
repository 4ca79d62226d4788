//! 인증 세션 매니저.
//! 제공자별 초기화 상태를 소유하고 토큰 요청을 해당 어댑터로 라우팅한다.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared, WeakShared};
use tracing::{debug, info, warn};

use crate::application::ports::AuthProvider;
use crate::domain::credential::{CredentialResult, ProviderId};
use crate::domain::error::AuthError;

/// 초기화 시 한 번 실행되는 SDK 등록 동작.
pub type SetupAction<'a> = Box<dyn FnOnce() -> anyhow::Result<()> + Send + 'a>;

type TokenAttempt = BoxFuture<'static, Result<CredentialResult, AuthError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializationState {
    NotInitialized,
    Initialized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializationOutcome {
    /// 이번 호출에서 상태가 전이됨
    Initialized,
    /// 이미 초기화되어 있어 아무 것도 하지 않음
    AlreadyInitialized,
}

/// 조립 시점에 만들어 `Arc`로 공유하는 세션 매니저.
pub struct AuthSessionManager {
    states: BTreeMap<ProviderId, Mutex<InitializationState>>,
    adapters: BTreeMap<ProviderId, Arc<dyn AuthProvider>>,
    in_flight: Mutex<HashMap<ProviderId, WeakShared<TokenAttempt>>>,
}

#[derive(Default)]
pub struct AuthSessionManagerBuilder {
    adapters: BTreeMap<ProviderId, Arc<dyn AuthProvider>>,
}

impl AuthSessionManagerBuilder {
    /// 어댑터를 등록한다. 같은 제공자를 다시 등록하면 나중 것이 사용된다.
    pub fn register(mut self, adapter: Arc<dyn AuthProvider>) -> Self {
        self.adapters.insert(adapter.provider(), adapter);
        self
    }

    pub fn build(self) -> AuthSessionManager {
        AuthSessionManager {
            states: ProviderId::ALL
                .into_iter()
                .map(|p| (p, Mutex::new(InitializationState::NotInitialized)))
                .collect(),
            adapters: self.adapters,
            in_flight: Mutex::new(HashMap::new()),
        }
    }
}

impl AuthSessionManager {
    pub fn builder() -> AuthSessionManagerBuilder {
        AuthSessionManagerBuilder::default()
    }

    /// 어댑터가 등록된 제공자 목록.
    pub fn providers(&self) -> Vec<ProviderId> {
        self.adapters.keys().copied().collect()
    }

    pub fn state(&self, provider: ProviderId) -> InitializationState {
        self.states
            .get(&provider)
            .map(|slot| *slot.lock().unwrap_or_else(PoisonError::into_inner))
            .unwrap_or(InitializationState::NotInitialized)
    }

    pub fn is_initialized(&self, provider: ProviderId) -> bool {
        self.state(provider) == InitializationState::Initialized
    }

    /// 제공자를 한 번만 초기화한다.
    /// - 이미 초기화된 경우 setup을 실행하지 않는다.
    /// - setup은 제공자별 임계 구역 안에서 실행되므로 동시 호출에도 최대 한 번만 실행된다.
    /// - setup이 실패하면 상태는 `NotInitialized`로 남아 재시도할 수 있다.
    pub fn initialize(
        &self,
        provider: ProviderId,
        setup: Option<SetupAction<'_>>,
    ) -> Result<InitializationOutcome, AuthError> {
        let slot = self
            .states
            .get(&provider)
            .ok_or(AuthError::UnsupportedProvider(provider))?;
        // setup 도중 패닉이 나도 상태는 전이 전이므로 poison 값을 그대로 사용한다.
        let mut state = slot.lock().unwrap_or_else(PoisonError::into_inner);

        if *state == InitializationState::Initialized {
            debug!(%provider, "authentication already initialized");
            return Ok(InitializationOutcome::AlreadyInitialized);
        }

        if let Some(setup) = setup
            && let Err(err) = setup()
        {
            let reason = format!("{err:#}");
            warn!(%provider, error = %reason, "authentication setup failed");
            return Err(AuthError::SetupFailed { provider, reason });
        }

        *state = InitializationState::Initialized;
        info!(%provider, "authentication initialized");
        Ok(InitializationOutcome::Initialized)
    }

    /// 토큰 요청 전 동기적으로 검사 가능한 전제 조건.
    pub fn ensure_ready(&self, provider: ProviderId) -> Result<(), AuthError> {
        if !self.is_initialized(provider) {
            return Err(AuthError::NotInitialized(provider));
        }
        if !self.adapters.contains_key(&provider) {
            return Err(AuthError::UnsupportedProvider(provider));
        }
        Ok(())
    }

    /// 제공자 로그인 흐름을 거쳐 인증 결과를 얻는다.
    /// 초기화 전이면 자동 초기화 없이 즉시 `NotInitialized`로 실패한다.
    /// 같은 제공자의 요청이 진행 중이면 새 UI 흐름을 열지 않고 그 결과를 공유한다.
    pub async fn fetch_token(&self, provider: ProviderId) -> Result<CredentialResult, AuthError> {
        self.ensure_ready(provider)?;
        let attempt = self.join_or_start(provider)?;
        attempt.await
    }

    fn join_or_start(&self, provider: ProviderId) -> Result<Shared<TokenAttempt>, AuthError> {
        let adapter = self
            .adapters
            .get(&provider)
            .cloned()
            .ok_or(AuthError::UnsupportedProvider(provider))?;

        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = in_flight.get(&provider).and_then(WeakShared::upgrade)
            && pending.peek().is_none()
        {
            debug!(%provider, "joining in-flight token request");
            return Ok(pending);
        }

        debug!(%provider, "dispatching token request to adapter");
        let attempt: TokenAttempt =
            async move { ensure_same_provider(provider, adapter.fetch_token().await) }.boxed();
        let attempt = attempt.shared();
        match attempt.downgrade() {
            Some(weak) => {
                in_flight.insert(provider, weak);
            }
            None => {
                in_flight.remove(&provider);
            }
        }
        Ok(attempt)
    }
}

/// 어댑터가 다른 제공자의 결과를 돌려주면 요청한 제공자의 실패로 바꾼다.
fn ensure_same_provider(
    provider: ProviderId,
    result: Result<CredentialResult, AuthError>,
) -> Result<CredentialResult, AuthError> {
    let returned = match &result {
        Ok(credential) => credential.provider(),
        Err(err) => err.provider(),
    };
    if returned == provider {
        return result;
    }
    warn!(%provider, %returned, "adapter answered for a different provider");
    Err(AuthError::provider_failure(
        provider,
        format!("adapter returned a result for {returned}"),
    ))
}
