//! 제공자별 인증 어댑터 공통 모듈.
//! 각 네이티브 로그인 흐름(Apple/Kakao)을 호출하고 결과를 `CredentialResult`로 표준화한다.

pub mod apple;
pub mod kakao;

use std::sync::Arc;

use tracing::debug;

use crate::application::config::Config;
use crate::application::ports::{AuthProvider, NativeFlowError};
use crate::domain::credential::ProviderId;
use crate::domain::error::AuthError;
use crate::infrastructure::native::CommandAuthorizationFlow;

pub use apple::AppleAuthProvider;
pub use kakao::KakaoAuthProvider;

/// 로그인 명령이 설정된 활성 제공자만 어댑터로 구성한다.
pub fn build_auth_providers(config: &Config) -> Vec<Arc<dyn AuthProvider>> {
    let mut providers: Vec<Arc<dyn AuthProvider>> = Vec::new();

    for provider in config.enabled_providers() {
        let Some(provider_cfg) = config.provider_config(provider) else {
            continue;
        };
        let Some(command) = provider_cfg.login_command() else {
            debug!(%provider, "login_command not configured; adapter skipped");
            continue;
        };

        let flow = Arc::new(CommandAuthorizationFlow::new(command.to_vec()));
        match provider {
            ProviderId::Apple => providers.push(Arc::new(
                AppleAuthProvider::new(flow).with_client_id(provider_cfg.client_id.clone()),
            )),
            ProviderId::Kakao => providers.push(Arc::new(
                KakaoAuthProvider::new(flow)
                    .with_client_id(provider_cfg.client_id.clone())
                    .prefer_talk(provider_cfg.prefer_talk()),
            )),
        }
    }

    providers
}

/// 네이티브 흐름 오류를 인증 오류로 정규화한다. 취소는 실패와 구분한다.
pub(crate) fn normalize_flow_error(provider: ProviderId, err: NativeFlowError) -> AuthError {
    match err {
        NativeFlowError::Cancelled => AuthError::UserCancelled(provider),
        NativeFlowError::Failed(reason) => AuthError::provider_failure(provider, reason),
    }
}

/// 토큰 원문 바이트를 UTF-8 텍스트로 해석한다.
pub(crate) fn decode_token(provider: ProviderId, raw: Vec<u8>) -> Result<String, AuthError> {
    let token = String::from_utf8(raw).map_err(|_| AuthError::TokenDecodingFailure(provider))?;
    if token.trim().is_empty() {
        return Err(AuthError::provider_failure(provider, "provider returned an empty token"));
    }
    Ok(token)
}
