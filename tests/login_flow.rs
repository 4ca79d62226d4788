//! 세션 매니저 + 제공자 어댑터 + 로그인 뷰모델을 공개 API로 엮어 검증한다.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use lifepoop_auth::application::binding::ViewModelType;
use lifepoop_auth::application::ports::{
    AuthorizationRequest, NativeAuthorization, NativeAuthorizationFlow, NativeCredential,
    NativeFlowError,
};
use lifepoop_auth::application::session::AuthSessionManager;
use lifepoop_auth::application::viewmodels::LoginViewModel;
use lifepoop_auth::domain::credential::{CredentialResult, ProviderId};
use lifepoop_auth::domain::error::AuthError;
use lifepoop_auth::domain::login_state::LoginState;
use lifepoop_auth::infrastructure::providers::{AppleAuthProvider, KakaoAuthProvider};

/// 호출 횟수를 세고 고정 결과를 돌려주는 네이티브 흐름.
struct CannedFlow {
    response: Result<NativeAuthorization, NativeFlowError>,
    delay: Duration,
    calls: AtomicUsize,
}

impl CannedFlow {
    fn new(response: Result<NativeAuthorization, NativeFlowError>) -> Arc<Self> {
        Self::delayed(response, Duration::ZERO)
    }

    fn delayed(response: Result<NativeAuthorization, NativeFlowError>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            response,
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NativeAuthorizationFlow for CannedFlow {
    async fn authorize(
        &self,
        _request: &AuthorizationRequest,
    ) -> Result<NativeAuthorization, NativeFlowError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.response.clone()
    }
}

fn apple_token(token: &[u8]) -> Result<NativeAuthorization, NativeFlowError> {
    Ok(NativeAuthorization {
        credential: Some(NativeCredential::AppleId {
            user: "001234.abcd".to_string(),
            email: None,
            identity_token: Some(token.to_vec()),
        }),
    })
}

fn apple_manager(flow: Arc<CannedFlow>) -> AuthSessionManager {
    AuthSessionManager::builder()
        .register(Arc::new(AppleAuthProvider::new(flow)))
        .build()
}

#[tokio::test]
async fn fetch_before_initialize_is_rejected_for_every_provider() {
    let flow = CannedFlow::new(apple_token(b"tok123"));
    let manager = AuthSessionManager::builder()
        .register(Arc::new(AppleAuthProvider::new(flow.clone())))
        .register(Arc::new(KakaoAuthProvider::new(flow.clone())))
        .build();

    for provider in ProviderId::ALL {
        assert_eq!(
            manager.fetch_token(provider).await,
            Err(AuthError::NotInitialized(provider))
        );
    }
    assert_eq!(flow.calls(), 0);
}

#[tokio::test]
async fn initialized_apple_login_yields_identity_token() {
    let flow = CannedFlow::new(apple_token(b"tok123"));
    let manager = apple_manager(flow.clone());
    let setups = AtomicUsize::new(0);

    for _ in 0..2 {
        manager
            .initialize(
                ProviderId::Apple,
                Some(Box::new(|| {
                    setups.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })),
            )
            .expect("initialize");
    }

    assert_eq!(setups.load(Ordering::SeqCst), 1);
    assert_eq!(
        manager.fetch_token(ProviderId::Apple).await,
        Ok(CredentialResult::new("tok123", ProviderId::Apple))
    );
}

#[tokio::test]
async fn flow_errors_stay_distinguishable() {
    let cases = [
        (
            CannedFlow::new(Ok(NativeAuthorization::default())),
            "missing credential",
        ),
        (CannedFlow::new(apple_token(&[0xff, 0xfe])), "undecodable"),
        (CannedFlow::new(Err(NativeFlowError::Cancelled)), "cancelled"),
    ];

    let mut results = Vec::new();
    for (flow, _) in &cases {
        let manager = apple_manager(flow.clone());
        manager
            .initialize(ProviderId::Apple, None)
            .expect("initialize");
        results.push(manager.fetch_token(ProviderId::Apple).await);
    }

    assert!(matches!(results[0], Err(AuthError::ProviderFailure { .. })));
    assert_eq!(results[1], Err(AuthError::TokenDecodingFailure(ProviderId::Apple)));
    assert_eq!(results[2], Err(AuthError::UserCancelled(ProviderId::Apple)));
}

#[tokio::test]
async fn double_tap_runs_native_flow_once() {
    let flow = CannedFlow::delayed(apple_token(b"tok123"), Duration::from_millis(30));
    let manager = apple_manager(flow.clone());
    manager
        .initialize(ProviderId::Apple, None)
        .expect("initialize");

    let (first, second) = tokio::join!(
        manager.fetch_token(ProviderId::Apple),
        manager.fetch_token(ProviderId::Apple)
    );

    assert_eq!(first, second);
    assert_eq!(first, Ok(CredentialResult::new("tok123", ProviderId::Apple)));
    assert_eq!(flow.calls(), 1);
}

#[tokio::test]
async fn view_model_drives_a_full_login() {
    let flow = CannedFlow::new(apple_token(b"tok123"));
    let manager = Arc::new(apple_manager(flow));
    manager
        .initialize(ProviderId::Apple, None)
        .expect("initialize");

    let vm = LoginViewModel::spawn(manager);
    let mut state = vm.output().login_state.subscribe();
    let mut enabled = vm.output().is_sign_in_enabled.subscribe();
    let mut signed_in = vm.output().did_sign_in.subscribe();

    vm.input()
        .did_tap_sign_in
        .accept(ProviderId::Apple)
        .expect("input accepted");

    let credential = tokio::time::timeout(Duration::from_secs(1), signed_in.recv())
        .await
        .expect("signed in in time")
        .expect("output alive");
    assert_eq!(credential, CredentialResult::new("tok123", ProviderId::Apple));
    assert_eq!(enabled.recv().await, Some(false));
    assert_eq!(enabled.recv().await, Some(true));
    assert_eq!(*state.borrow_and_update(), LoginState::Succeeded(ProviderId::Apple));

    vm.input()
        .did_confirm_result
        .accept(())
        .expect("input accepted");
    tokio::time::timeout(
        Duration::from_secs(1),
        state.wait_for(|s| *s == LoginState::Idle),
    )
    .await
    .expect("idle in time")
    .expect("view model alive");
}

#[cfg(unix)]
#[tokio::test]
async fn configured_login_helper_is_used_end_to_end() {
    use lifepoop_auth::application::config::{Config, ProviderConfig, ProvidersConfig};
    use lifepoop_auth::infrastructure::providers::build_auth_providers;

    // identity_token = base64("tok123")
    let script = r#"printf '{"status":"authorized","credential":{"kind":"apple_id","user":"u","identity_token":"dG9rMTIz"}}'"#;
    let config = Config {
        providers: ProvidersConfig {
            apple: Some(ProviderConfig {
                login_command: Some(vec!["sh".into(), "-c".into(), script.into()]),
                ..ProviderConfig::default()
            }),
            kakao: None,
        },
    };

    let manager = build_auth_providers(&config)
        .into_iter()
        .fold(AuthSessionManager::builder(), |builder, adapter| {
            builder.register(adapter)
        })
        .build();
    assert_eq!(manager.providers(), vec![ProviderId::Apple]);

    manager
        .initialize(ProviderId::Apple, None)
        .expect("initialize");
    assert_eq!(
        manager.fetch_token(ProviderId::Apple).await,
        Ok(CredentialResult::new("tok123", ProviderId::Apple))
    );
    assert_eq!(
        manager.fetch_token(ProviderId::Kakao).await,
        Err(AuthError::NotInitialized(ProviderId::Kakao))
    );
}
