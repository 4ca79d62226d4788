//! 화면별 뷰모델 구현.

pub mod login;

pub use login::{LoginViewModel, LoginViewModelInput, LoginViewModelOutput};
