//! 로그인 화면 뷰모델.
//!
//! 입력은 하나의 큐에 쌓여 단일 태스크가 수락 순서대로 처리한다.
//! 한 입력의 출력은 다음 입력 처리 전에 모두 방출된다.

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::binding::{Relay, Signal, StateSignal, ViewModelType};
use crate::application::session::AuthSessionManager;
use crate::domain::credential::{CredentialResult, ProviderId};
use crate::domain::error::AuthError;
use crate::domain::login_state::LoginState;

pub struct LoginViewModelInput {
    /// 제공자 로그인 버튼 탭
    pub did_tap_sign_in: Relay<ProviderId>,
    /// 결과(성공/실패) 안내 확인
    pub did_confirm_result: Relay<()>,
    /// 화면 닫기
    pub did_close_scene: Relay<()>,
}

#[derive(Clone)]
pub struct LoginViewModelOutput {
    pub login_state: StateSignal<LoginState>,
    pub is_sign_in_enabled: Signal<bool>,
    pub did_sign_in: Signal<CredentialResult>,
    /// 사용자 취소는 방출하지 않는다.
    pub should_show_error_popup: Signal<AuthError>,
    pub should_dismiss: Signal<()>,
}

#[derive(Debug)]
enum LoginEvent {
    SignIn(ProviderId),
    ConfirmResult,
    CloseScene,
}

pub struct LoginViewModel {
    input: LoginViewModelInput,
    output: LoginViewModelOutput,
    worker: JoinHandle<()>,
}

impl ViewModelType for LoginViewModel {
    type Input = LoginViewModelInput;
    type Output = LoginViewModelOutput;

    fn input(&self) -> &Self::Input {
        &self.input
    }

    fn output(&self) -> &Self::Output {
        &self.output
    }
}

impl LoginViewModel {
    /// 입력 처리 태스크를 띄운다. tokio 런타임 안에서 호출해야 한다.
    pub fn spawn(manager: Arc<AuthSessionManager>) -> Self {
        let (queue, events) = mpsc::unbounded_channel();
        let input = LoginViewModelInput {
            did_tap_sign_in: Relay::forwarding(queue.clone(), LoginEvent::SignIn),
            did_confirm_result: Relay::forwarding(queue.clone(), |()| LoginEvent::ConfirmResult),
            did_close_scene: Relay::forwarding(queue, |()| LoginEvent::CloseScene),
        };
        let output = LoginViewModelOutput {
            login_state: StateSignal::new(LoginState::Idle),
            is_sign_in_enabled: Signal::default(),
            did_sign_in: Signal::default(),
            should_show_error_popup: Signal::default(),
            should_dismiss: Signal::default(),
        };

        let worker = LoginWorker {
            manager,
            output: output.clone(),
            state: LoginState::Idle,
        };
        let worker = tokio::spawn(worker.run(events));

        Self {
            input,
            output,
            worker,
        }
    }

    /// 화면이 닫혀 더 이상 입력을 처리하지 않는지.
    pub fn is_closed(&self) -> bool {
        self.worker.is_finished()
    }
}

struct LoginWorker {
    manager: Arc<AuthSessionManager>,
    output: LoginViewModelOutput,
    state: LoginState,
}

impl LoginWorker {
    async fn run(mut self, mut events: mpsc::UnboundedReceiver<LoginEvent>) {
        while let Some(event) = events.recv().await {
            let flow = match event {
                LoginEvent::SignIn(provider) => self.sign_in(provider, &mut events).await,
                LoginEvent::ConfirmResult => {
                    self.confirm_result();
                    ControlFlow::Continue(())
                }
                LoginEvent::CloseScene => {
                    self.output.should_dismiss.emit(());
                    ControlFlow::Break(())
                }
            };
            if flow.is_break() {
                break;
            }
        }

        events.close();
        let mut discarded = 0usize;
        while events.try_recv().is_ok() {
            discarded += 1;
        }
        debug!(discarded, "login view model stopped");
    }

    async fn sign_in(
        &mut self,
        provider: ProviderId,
        events: &mut mpsc::UnboundedReceiver<LoginEvent>,
    ) -> ControlFlow<()> {
        if self.state.is_busy() {
            debug!(%provider, "sign-in ignored while another login is in progress");
            return ControlFlow::Continue(());
        }
        if self.state.is_terminal() {
            self.set_state(LoginState::Idle);
        }

        self.set_state(LoginState::Initializing(provider));
        self.output.is_sign_in_enabled.emit(false);

        if let Err(err) = self.manager.ensure_ready(provider) {
            self.finish(Err(err));
            return ControlFlow::Continue(());
        }

        self.set_state(LoginState::AwaitingProviderUi(provider));
        let manager = Arc::clone(&self.manager);
        let fetch = manager.fetch_token(provider);
        tokio::pin!(fetch);

        let result = loop {
            tokio::select! {
                biased;
                result = &mut fetch => break result,
                event = events.recv() => match event {
                    Some(LoginEvent::SignIn(other)) => {
                        // 버튼이 비활성화된 동안의 중복 탭은 무시한다.
                        debug!(%provider, ignored = %other, "sign-in tap gated while awaiting provider UI");
                    }
                    Some(LoginEvent::ConfirmResult) => {
                        debug!(%provider, "nothing to confirm while awaiting provider UI");
                    }
                    Some(LoginEvent::CloseScene) => {
                        debug!(%provider, "scene closed; abandoning provider UI flow");
                        self.set_state(LoginState::Idle);
                        self.output.should_dismiss.emit(());
                        return ControlFlow::Break(());
                    }
                    None => {
                        self.set_state(LoginState::Idle);
                        return ControlFlow::Break(());
                    }
                },
            }
        };

        self.finish(result);
        ControlFlow::Continue(())
    }

    fn finish(&mut self, result: Result<CredentialResult, AuthError>) {
        match result {
            Ok(credential) => {
                self.set_state(LoginState::Succeeded(credential.provider()));
                self.output.did_sign_in.emit(credential);
            }
            Err(err) => {
                self.set_state(LoginState::Failed(err.clone()));
                if err.should_notify_user() {
                    self.output.should_show_error_popup.emit(err);
                } else {
                    debug!(provider = %err.provider(), "login cancelled by user");
                }
            }
        }
        self.output.is_sign_in_enabled.emit(true);
    }

    fn confirm_result(&mut self) {
        if self.state.is_terminal() {
            self.set_state(LoginState::Idle);
        } else {
            debug!(state = ?self.state, "no login result to confirm");
        }
    }

    fn set_state(&mut self, next: LoginState) {
        match self.state.transition(next) {
            Ok(state) => {
                self.state = state.clone();
                self.output.login_state.set(state);
            }
            Err(err) => warn!(%err, "login state transition rejected"),
        }
    }
}
