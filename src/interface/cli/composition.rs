//! 애플리케이션 조립(composition root) 모듈.

use std::sync::Arc;

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::{AuthProviderFactory, ConfigRepository};
use crate::application::session::AuthSessionManager;
use crate::application::usecases::{InitializeProvidersUseCase, InspectConfigUseCase, SignInUseCase};
use crate::application::viewmodels::LoginViewModel;
use crate::infrastructure::adapters::{
    AuthProviderFactoryAdapter, ConfigSdkRegistrar, ConsoleReporter, JsonConfigRepository,
};
use crate::interface::cli::ConsoleLoginView;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    provider_factory: AuthProviderFactoryAdapter,
    registrar: ConfigSdkRegistrar,
    reporter: Arc<ConsoleReporter>,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self {
            config_repo: JsonConfigRepository,
            provider_factory: AuthProviderFactoryAdapter,
            registrar: ConfigSdkRegistrar,
            reporter: Arc::new(ConsoleReporter::new()),
        }
    }
}

impl AppComposition {
    /// 병합된 설정을 로딩한다.
    pub fn load_config(&self) -> Result<Config> {
        self.config_repo.load()
    }

    /// 설정의 어댑터를 등록한 세션 매니저를 만든다. 초기화는 하지 않는다.
    pub fn build_session_manager(&self, config: &Config) -> Arc<AuthSessionManager> {
        let manager = self
            .provider_factory
            .build(config)
            .into_iter()
            .fold(AuthSessionManager::builder(), |builder, adapter| {
                builder.register(adapter)
            })
            .build();
        Arc::new(manager)
    }

    /// 제공자 초기화 유스케이스를 생성한다.
    pub fn initialize_providers_usecase<'a>(
        &'a self,
        manager: &'a AuthSessionManager,
    ) -> InitializeProvidersUseCase<'a> {
        InitializeProvidersUseCase {
            registrar: &self.registrar,
            manager,
            reporter: self.reporter.as_ref(),
        }
    }

    /// 로그인 실행 유스케이스를 생성한다.
    pub fn sign_in_usecase<'a>(&'a self, view_model: &'a LoginViewModel) -> SignInUseCase<'a> {
        SignInUseCase {
            view_model,
            reporter: self.reporter.as_ref(),
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
            reporter: self.reporter.as_ref(),
        }
    }

    /// 콘솔 로그인 화면을 생성한다.
    pub fn login_view(&self) -> ConsoleLoginView {
        ConsoleLoginView::new(self.reporter.clone())
    }
}
