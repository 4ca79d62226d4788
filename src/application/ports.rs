//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::{Config, ProviderConfig};
use crate::domain::credential::{AuthScope, CredentialResult, LoginChannel, ProviderId};
use crate::domain::error::AuthError;

/// 제공자 하나의 네이티브 로그인 흐름을 공통 계약으로 감싸는 어댑터 포트.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// 매니저가 디스패치에 사용하는 식별자
    fn provider(&self) -> ProviderId;
    /// 네이티브 로그인 UI를 거쳐 정규화된 인증 결과를 얻는다.
    async fn fetch_token(&self) -> Result<CredentialResult, AuthError>;
}

/// 네이티브 인증 흐름 호출 요청.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub provider: ProviderId,
    pub scopes: Vec<AuthScope>,
    pub channel: LoginChannel,
    pub client_id: Option<String>,
}

/// 네이티브 흐름이 돌려주는 불투명 결과.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NativeAuthorization {
    pub credential: Option<NativeCredential>,
}

/// 제공자별 자격 증명 원형(raw bytes 포함).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeCredential {
    AppleId {
        user: String,
        email: Option<String>,
        identity_token: Option<Vec<u8>>,
    },
    /// 키체인 비밀번호 자격 증명(토큰 없음).
    Password { user: String },
    KakaoOAuth {
        access_token: Vec<u8>,
        refresh_token: Option<Vec<u8>>,
        scopes: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NativeFlowError {
    #[error("authorization cancelled")]
    Cancelled,
    #[error("{0}")]
    Failed(String),
}

/// 제공자 UI 흐름(외부 경계) 포트.
#[async_trait]
pub trait NativeAuthorizationFlow: Send + Sync {
    async fn authorize(
        &self,
        request: &AuthorizationRequest,
    ) -> std::result::Result<NativeAuthorization, NativeFlowError>;

    /// 해당 진입점을 실행할 수 있는지(예: 카카오톡 설치 여부).
    fn supports(&self, _channel: LoginChannel) -> bool {
        true
    }
}

/// 설정에서 활성화된 제공자 어댑터를 구성하는 팩토리 포트.
pub trait AuthProviderFactory: Send + Sync {
    fn build(&self, config: &Config) -> Vec<Arc<dyn AuthProvider>>;
}

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 앱 자격 정보로 제공자 SDK를 등록하는 포트(`initialize`의 setup 동작).
pub trait SdkRegistrar: Send + Sync {
    fn register(&self, provider: ProviderId, provider_cfg: Option<&ProviderConfig>) -> Result<()>;
}

/// 콘솔/로그 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn section(&self, name: &str);
    fn kv(&self, key: &str, value: &str);
    fn status(&self, scope: &str, message: &str);
}
