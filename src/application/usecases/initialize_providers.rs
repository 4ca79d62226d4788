//! 앱 시작 시 활성 제공자를 한 번씩 초기화하는 유스케이스.

use crate::application::config::Config;
use crate::application::ports::{Reporter, SdkRegistrar};
use crate::application::session::{AuthSessionManager, InitializationOutcome};
use crate::domain::credential::ProviderId;
use crate::domain::error::AuthError;

/// 제공자 하나의 초기화 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInitialization {
    pub provider: ProviderId,
    pub result: Result<InitializationOutcome, AuthError>,
}

/// 설정에서 활성화된 제공자마다 SDK 등록을 setup으로 넘겨 초기화한다.
/// 한 제공자의 실패가 다른 제공자 초기화를 막지 않는다.
pub struct InitializeProvidersUseCase<'a> {
    pub registrar: &'a dyn SdkRegistrar,
    pub manager: &'a AuthSessionManager,
    pub reporter: &'a dyn Reporter,
}

impl<'a> InitializeProvidersUseCase<'a> {
    pub fn execute(&self, config: &Config) -> Vec<ProviderInitialization> {
        let enabled = config.enabled_providers();
        self.reporter.section("Providers");
        if enabled.is_empty() {
            self.reporter
                .status("providers", "no provider is enabled in config");
        }

        enabled
            .into_iter()
            .map(|provider| {
                let provider_cfg = config.provider_config(provider);
                let registrar = self.registrar;
                let result = self.manager.initialize(
                    provider,
                    Some(Box::new(move || registrar.register(provider, provider_cfg))),
                );

                let message = match &result {
                    Ok(InitializationOutcome::Initialized) => "ready".to_string(),
                    Ok(InitializationOutcome::AlreadyInitialized) => "ready (already)".to_string(),
                    Err(err) => format!("failed: {err}"),
                };
                self.reporter.status(provider.code(), &message);

                ProviderInitialization { provider, result }
            })
            .collect()
    }
}
