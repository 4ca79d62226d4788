//! 화면 단위 로그인 진행 상태 머신.
//!
//! `Idle → Initializing → AwaitingProviderUi → { Succeeded | Failed }` 순서로 진행하고,
//! 호출자가 종료 이벤트를 소비하면 `Idle`로 돌아간다.

use thiserror::Error;

use crate::domain::credential::ProviderId;
use crate::domain::error::AuthError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoginState {
    #[default]
    Idle,
    Initializing(ProviderId),
    /// 유일한 대기(suspending) 상태. 제공자 UI 흐름이 끝나길 기다린다.
    AwaitingProviderUi(ProviderId),
    Succeeded(ProviderId),
    Failed(AuthError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid login state transition: {from:?} -> {to:?}")]
pub struct InvalidTransition {
    pub from: LoginState,
    pub to: LoginState,
}

impl LoginState {
    /// 진행 중(로그인 버튼 비활성) 상태인지.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Initializing(_) | Self::AwaitingProviderUi(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    /// 허용된 전이만 수행한다.
    pub fn transition(&self, to: LoginState) -> Result<LoginState, InvalidTransition> {
        let allowed = match (self, &to) {
            (Self::Idle, Self::Initializing(_)) => true,
            (Self::Initializing(a), Self::AwaitingProviderUi(b)) => a == b,
            (Self::Initializing(a), Self::Failed(err)) => *a == err.provider(),
            (Self::AwaitingProviderUi(a), Self::Succeeded(b)) => a == b,
            (Self::AwaitingProviderUi(a), Self::Failed(err)) => *a == err.provider(),
            // 화면이 닫혀 대기 중인 흐름을 버리는 경우.
            (Self::AwaitingProviderUi(_), Self::Idle) => true,
            (Self::Succeeded(_) | Self::Failed(_), Self::Idle) => true,
            _ => false,
        };

        if allowed {
            Ok(to)
        } else {
            Err(InvalidTransition {
                from: self.clone(),
                to,
            })
        }
    }
}
