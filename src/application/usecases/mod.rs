//! 애플리케이션 유스케이스 모음.

pub mod initialize_providers;
pub mod inspect_config;
pub mod sign_in;

pub use initialize_providers::{InitializeProvidersUseCase, ProviderInitialization};
pub use inspect_config::InspectConfigUseCase;
pub use sign_in::{SignInOutcome, SignInUseCase};
