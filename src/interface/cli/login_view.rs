//! 콘솔 로그인 화면.
//!
//! 뷰모델 출력을 리포터로 그리고, Ctrl-C를 화면 닫기 입력으로 연결한다.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::application::binding::{ViewModelType, ViewType};
use crate::application::ports::Reporter;
use crate::application::viewmodels::LoginViewModel;
use crate::domain::login_state::LoginState;

pub struct ConsoleLoginView {
    reporter: Arc<dyn Reporter>,
    tasks: Vec<JoinHandle<()>>,
}

impl ConsoleLoginView {
    pub fn new(reporter: Arc<dyn Reporter>) -> Self {
        Self {
            reporter,
            tasks: Vec::new(),
        }
    }
}

impl ViewType for ConsoleLoginView {
    type ViewModel = LoginViewModel;

    fn bind_input(&mut self, view_model: &LoginViewModel) {
        let close = view_model.input().did_close_scene.clone();
        self.tasks.push(tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("ctrl-c received; closing login scene");
                // 이미 닫힌 뷰모델이면 무시한다.
                let _ = close.accept(());
            }
        }));
    }

    fn bind_output(&mut self, view_model: &LoginViewModel) {
        let output = view_model.output();

        let mut state = output.login_state.subscribe();
        let reporter = Arc::clone(&self.reporter);
        self.tasks.push(tokio::spawn(async move {
            while state.changed().await.is_ok() {
                let current = state.borrow_and_update().clone();
                reporter.status("login", &describe(&current));
            }
        }));

        let mut enabled = output.is_sign_in_enabled.subscribe();
        self.tasks.push(tokio::spawn(async move {
            while let Some(enabled) = enabled.recv().await {
                debug!(enabled, "sign-in button state changed");
            }
        }));

        let mut popups = output.should_show_error_popup.subscribe();
        let reporter = Arc::clone(&self.reporter);
        self.tasks.push(tokio::spawn(async move {
            while let Some(err) = popups.recv().await {
                reporter.status("error", &format!("{err}. Please try again."));
            }
        }));
    }
}

impl Drop for ConsoleLoginView {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

fn describe(state: &LoginState) -> String {
    match state {
        LoginState::Idle => "idle".to_string(),
        LoginState::Initializing(provider) => {
            format!("initializing {}", provider.display_name())
        }
        LoginState::AwaitingProviderUi(provider) => {
            format!("awaiting {} login", provider.display_name())
        }
        LoginState::Succeeded(provider) => format!("succeeded with {}", provider.display_name()),
        LoginState::Failed(err) if err.is_user_cancelled() => "cancelled".to_string(),
        LoginState::Failed(err) => format!("failed: {err}"),
    }
}
