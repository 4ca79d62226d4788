//! 카카오 로그인 어댑터.
//! 카카오톡 앱 로그인이 가능하면 우선 사용하고, 아니면 카카오 계정 로그인으로 진행한다.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{
    AuthProvider, AuthorizationRequest, NativeAuthorizationFlow, NativeCredential,
};
use crate::domain::credential::{AuthScope, CredentialResult, LoginChannel, ProviderId};
use crate::domain::error::AuthError;

use super::{decode_token, normalize_flow_error};

pub struct KakaoAuthProvider {
    flow: Arc<dyn NativeAuthorizationFlow>,
    client_id: Option<String>,
    prefer_talk: bool,
}

impl KakaoAuthProvider {
    pub fn new(flow: Arc<dyn NativeAuthorizationFlow>) -> Self {
        Self {
            flow,
            client_id: None,
            prefer_talk: true,
        }
    }

    pub fn with_client_id(mut self, client_id: Option<String>) -> Self {
        self.client_id = client_id;
        self
    }

    pub fn prefer_talk(mut self, prefer_talk: bool) -> Self {
        self.prefer_talk = prefer_talk;
        self
    }

    fn channel(&self) -> LoginChannel {
        if self.prefer_talk && self.flow.supports(LoginChannel::KakaoTalk) {
            LoginChannel::KakaoTalk
        } else {
            LoginChannel::KakaoAccount
        }
    }
}

#[async_trait]
impl AuthProvider for KakaoAuthProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::Kakao
    }

    async fn fetch_token(&self) -> Result<CredentialResult, AuthError> {
        let request = AuthorizationRequest {
            provider: ProviderId::Kakao,
            scopes: vec![AuthScope::Profile, AuthScope::AccountEmail],
            channel: self.channel(),
            client_id: self.client_id.clone(),
        };
        debug!(channel = request.channel.code(), "starting Kakao login");

        let authorization = self
            .flow
            .authorize(&request)
            .await
            .map_err(|err| normalize_flow_error(ProviderId::Kakao, err))?;

        let Some(NativeCredential::KakaoOAuth { access_token, .. }) = authorization.credential
        else {
            return Err(AuthError::provider_failure(
                ProviderId::Kakao,
                "login did not return a Kakao OAuth token",
            ));
        };

        let token = decode_token(ProviderId::Kakao, access_token)?;
        Ok(CredentialResult::new(token, ProviderId::Kakao))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::NativeFlowError;
    use crate::infrastructure::providers::test_support::ScriptedFlow;

    fn oauth(token: &[u8]) -> Option<NativeCredential> {
        Some(NativeCredential::KakaoOAuth {
            access_token: token.to_vec(),
            refresh_token: None,
            scopes: vec!["profile_nickname".to_string()],
        })
    }

    #[tokio::test]
    async fn prefers_kakao_talk_when_available() {
        let flow = Arc::new(ScriptedFlow::returning(oauth(b"kakao-tok")));
        let provider = KakaoAuthProvider::new(flow.clone());

        let result = provider.fetch_token().await;

        assert_eq!(result, Ok(CredentialResult::new("kakao-tok", ProviderId::Kakao)));
        let request = flow.last_request().expect("flow invoked");
        assert_eq!(request.channel, LoginChannel::KakaoTalk);
        assert_eq!(request.scopes, vec![AuthScope::Profile, AuthScope::AccountEmail]);
    }

    #[tokio::test]
    async fn falls_back_to_account_login() {
        let flow = Arc::new(ScriptedFlow::returning(oauth(b"t")).without(LoginChannel::KakaoTalk));
        KakaoAuthProvider::new(flow.clone())
            .fetch_token()
            .await
            .expect("login succeeds");
        assert_eq!(
            flow.last_request().map(|r| r.channel),
            Some(LoginChannel::KakaoAccount)
        );

        let flow = Arc::new(ScriptedFlow::returning(oauth(b"t")));
        KakaoAuthProvider::new(flow.clone())
            .prefer_talk(false)
            .fetch_token()
            .await
            .expect("login succeeds");
        assert_eq!(
            flow.last_request().map(|r| r.channel),
            Some(LoginChannel::KakaoAccount)
        );
    }

    #[tokio::test]
    async fn apple_credential_is_rejected() {
        let flow = Arc::new(ScriptedFlow::returning(Some(NativeCredential::AppleId {
            user: "u".to_string(),
            email: None,
            identity_token: Some(b"tok".to_vec()),
        })));
        let result = KakaoAuthProvider::new(flow).fetch_token().await;
        assert!(matches!(
            result,
            Err(AuthError::ProviderFailure { provider: ProviderId::Kakao, .. })
        ));
    }

    #[tokio::test]
    async fn failures_are_normalized() {
        let flow = Arc::new(ScriptedFlow::returning(oauth(&[0xff])));
        assert_eq!(
            KakaoAuthProvider::new(flow).fetch_token().await,
            Err(AuthError::TokenDecodingFailure(ProviderId::Kakao))
        );

        let flow = Arc::new(ScriptedFlow::responding(Err(NativeFlowError::Cancelled)));
        assert_eq!(
            KakaoAuthProvider::new(flow).fetch_token().await,
            Err(AuthError::UserCancelled(ProviderId::Kakao))
        );
    }
}
