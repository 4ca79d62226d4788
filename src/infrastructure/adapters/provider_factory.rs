//! 인증 제공자 팩토리 포트 구현 어댑터.

use std::sync::Arc;

use crate::application::config::Config;
use crate::application::ports::{AuthProvider, AuthProviderFactory};
use crate::infrastructure::providers;

/// 설정에서 로그인 명령 기반 어댑터를 구성한다.
pub struct AuthProviderFactoryAdapter;

impl AuthProviderFactory for AuthProviderFactoryAdapter {
    fn build(&self, config: &Config) -> Vec<Arc<dyn AuthProvider>> {
        providers::build_auth_providers(config)
    }
}
