//! Sign in with Apple 어댑터.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{
    AuthProvider, AuthorizationRequest, NativeAuthorizationFlow, NativeCredential,
};
use crate::domain::credential::{AuthScope, CredentialResult, LoginChannel, ProviderId};
use crate::domain::error::AuthError;

use super::{decode_token, normalize_flow_error};

pub struct AppleAuthProvider {
    flow: Arc<dyn NativeAuthorizationFlow>,
    client_id: Option<String>,
}

impl AppleAuthProvider {
    pub fn new(flow: Arc<dyn NativeAuthorizationFlow>) -> Self {
        Self {
            flow,
            client_id: None,
        }
    }

    pub fn with_client_id(mut self, client_id: Option<String>) -> Self {
        self.client_id = client_id;
        self
    }
}

#[async_trait]
impl AuthProvider for AppleAuthProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::Apple
    }

    async fn fetch_token(&self) -> Result<CredentialResult, AuthError> {
        let request = AuthorizationRequest {
            provider: ProviderId::Apple,
            scopes: vec![AuthScope::FullName, AuthScope::Email],
            channel: LoginChannel::SystemSheet,
            client_id: self.client_id.clone(),
        };

        let authorization = self
            .flow
            .authorize(&request)
            .await
            .map_err(|err| normalize_flow_error(ProviderId::Apple, err))?;

        // 비밀번호 자격 증명 등 다른 형태는 토큰을 주지 않는다.
        let Some(NativeCredential::AppleId {
            user,
            identity_token,
            ..
        }) = authorization.credential
        else {
            return Err(AuthError::provider_failure(
                ProviderId::Apple,
                "authorization did not return an Apple ID credential",
            ));
        };

        let raw = identity_token.ok_or_else(|| {
            AuthError::provider_failure(
                ProviderId::Apple,
                "Apple ID credential carries no identity token",
            )
        })?;
        debug!(user = %user, "Apple ID credential received");

        let token = decode_token(ProviderId::Apple, raw)?;
        Ok(CredentialResult::new(token, ProviderId::Apple))
    }
}
