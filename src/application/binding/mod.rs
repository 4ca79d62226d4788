//! 뷰모델 바인딩 계약.
//! 화면(View)은 Input 의도를 넣고 Output 스트림을 구독할 뿐, 세션 매니저에 직접 의존하지 않는다.

mod relay;
mod signal;

use thiserror::Error;

pub use relay::Relay;
pub use signal::{Signal, StateSignal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("view model is no longer accepting input")]
    Closed,
}

/// 화면별 고정 Input/Output 묶음을 노출하는 뷰모델.
pub trait ViewModelType {
    type Input;
    type Output;

    fn input(&self) -> &Self::Input;
    fn output(&self) -> &Self::Output;
}

/// 뷰모델에 입력을 연결하고 출력을 구독하는 화면 측 계약.
pub trait ViewType {
    type ViewModel: ViewModelType;

    fn bind_input(&mut self, view_model: &Self::ViewModel);
    fn bind_output(&mut self, view_model: &Self::ViewModel);

    fn bind(&mut self, view_model: &Self::ViewModel) {
        self.bind_input(view_model);
        self.bind_output(view_model);
    }
}
