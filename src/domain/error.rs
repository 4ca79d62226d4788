//! 인증 실패 분류.

use thiserror::Error;

use crate::domain::credential::ProviderId;

/// 세션 매니저/어댑터가 반환하는 인증 오류.
/// 모든 실패는 값으로 반환되며 호출자가 재시도 여부를 결정한다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{0} authentication is not initialized")]
    NotInitialized(ProviderId),

    #[error("{0} login was cancelled by the user")]
    UserCancelled(ProviderId),

    #[error("{provider} login failed: {reason}")]
    ProviderFailure { provider: ProviderId, reason: String },

    #[error("{0} identity token is not valid UTF-8")]
    TokenDecodingFailure(ProviderId),

    #[error("{provider} initialization failed: {reason}")]
    SetupFailed { provider: ProviderId, reason: String },

    #[error("no adapter registered for {0}")]
    UnsupportedProvider(ProviderId),
}

impl AuthError {
    pub fn provider_failure(provider: ProviderId, reason: impl Into<String>) -> Self {
        Self::ProviderFailure {
            provider,
            reason: reason.into(),
        }
    }

    pub fn provider(&self) -> ProviderId {
        match self {
            Self::NotInitialized(provider)
            | Self::UserCancelled(provider)
            | Self::TokenDecodingFailure(provider)
            | Self::UnsupportedProvider(provider) => *provider,
            Self::ProviderFailure { provider, .. } | Self::SetupFailed { provider, .. } => {
                *provider
            }
        }
    }

    pub fn is_user_cancelled(&self) -> bool {
        matches!(self, Self::UserCancelled(_))
    }

    /// `initialize` 호출 후 재시도하면 해소될 수 있는 오류인지.
    pub fn is_recoverable_by_initialize(&self) -> bool {
        matches!(self, Self::NotInitialized(_) | Self::SetupFailed { .. })
    }

    /// 사용자에게 "다시 시도" 안내를 띄워야 하는지.
    /// 사용자가 직접 취소한 경우는 오류 UI를 띄우지 않는다.
    pub fn should_notify_user(&self) -> bool {
        !self.is_user_cancelled()
    }
}
