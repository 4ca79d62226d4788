//! 로그인 화면 뷰모델을 구동해 한 번의 로그인 시도를 끝까지 진행하는 유스케이스.

use anyhow::{Context, Result, bail};

use crate::application::binding::ViewModelType;
use crate::application::ports::Reporter;
use crate::application::viewmodels::LoginViewModel;
use crate::domain::credential::{CredentialResult, ProviderId};
use crate::domain::error::AuthError;
use crate::domain::login_state::LoginState;

/// 로그인 시도의 최종 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    SignedIn(CredentialResult),
    Failed(AuthError),
    /// 결과가 나오기 전에 화면이 닫혔다.
    Dismissed,
}

pub struct SignInUseCase<'a> {
    pub view_model: &'a LoginViewModel,
    pub reporter: &'a dyn Reporter,
}

impl<'a> SignInUseCase<'a> {
    /// 로그인 탭을 입력하고 성공/실패/닫힘 중 하나가 될 때까지 기다린다.
    pub async fn execute(&self, provider: ProviderId) -> Result<SignInOutcome> {
        self.reporter.section("Sign in");
        self.reporter.kv("Provider", provider.display_name());

        let output = self.view_model.output();
        // 탭 전에 구독해야 이번 시도의 출력을 놓치지 않는다.
        let mut state = output.login_state.subscribe();
        let mut signed_in = output.did_sign_in.subscribe();
        let mut dismissed = output.should_dismiss.subscribe();

        self.view_model
            .input()
            .did_tap_sign_in
            .accept(provider)
            .context("failed to submit sign-in")?;

        loop {
            tokio::select! {
                changed = state.changed() => {
                    if changed.is_err() {
                        bail!("login view model stopped unexpectedly");
                    }
                    let current = state.borrow_and_update().clone();
                    match current {
                        LoginState::Succeeded(_) => {
                            let credential = signed_in
                                .recv()
                                .await
                                .context("login view model stopped before emitting the credential")?;
                            return Ok(SignInOutcome::SignedIn(credential));
                        }
                        LoginState::Failed(err) => return Ok(SignInOutcome::Failed(err)),
                        _ => {}
                    }
                }
                Some(()) = dismissed.recv() => return Ok(SignInOutcome::Dismissed),
            }
        }
    }
}
