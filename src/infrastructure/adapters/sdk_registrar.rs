//! 제공자 SDK 등록 포트 구현.
//!
//! 카카오는 앱 키 없이 SDK를 초기화할 수 없다.
//! Apple은 별도 등록 절차가 없으므로 설정 확인만 한다.

use anyhow::{Result, bail};
use tracing::{debug, info};

use crate::application::config::ProviderConfig;
use crate::application::ports::SdkRegistrar;
use crate::domain::credential::ProviderId;
use crate::infrastructure::config::{command_exists, resolve_app_key};

/// 설정 파일/환경변수로 SDK 등록 조건을 검사하는 어댑터.
pub struct ConfigSdkRegistrar;

impl SdkRegistrar for ConfigSdkRegistrar {
    fn register(&self, provider: ProviderId, provider_cfg: Option<&ProviderConfig>) -> Result<()> {
        let Some(cfg) = provider_cfg else {
            bail!("{provider} is not configured");
        };
        if !cfg.is_enabled() {
            bail!("{provider} is disabled in config");
        }

        if let Some(program) = cfg.login_command().and_then(|cmd| cmd.first())
            && !command_exists(program.trim())
        {
            bail!("login helper not found in PATH: '{}'", program.trim());
        }

        match provider {
            ProviderId::Kakao => {
                let resolved = resolve_app_key(cfg);
                let Some(app_key) = resolved.app_key else {
                    match resolved.source {
                        Some(source) => bail!("kakao app key is not configured ({source})"),
                        None => bail!("kakao app key is not configured"),
                    }
                };
                info!(
                    source = resolved.source.as_deref().unwrap_or("-"),
                    key_len = app_key.len(),
                    "kakao sdk registered"
                );
            }
            ProviderId::Apple => {
                debug!(client_id = ?cfg.client_id, "apple requires no sdk registration");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kakao_requires_app_key() {
        let cfg = ProviderConfig {
            app_key_env: Some("LIFEPOOP_TEST_SURELY_UNSET_KAKAO_KEY".to_string()),
            ..ProviderConfig::default()
        };
        let err = ConfigSdkRegistrar
            .register(ProviderId::Kakao, Some(&cfg))
            .expect_err("missing key");
        assert!(err.to_string().contains("kakao app key is not configured"));

        let cfg = ProviderConfig {
            app_key: Some("native-app-key".to_string()),
            ..ProviderConfig::default()
        };
        assert!(ConfigSdkRegistrar.register(ProviderId::Kakao, Some(&cfg)).is_ok());
    }

    #[test]
    fn apple_needs_only_enabled_config() {
        assert!(
            ConfigSdkRegistrar
                .register(ProviderId::Apple, Some(&ProviderConfig::default()))
                .is_ok()
        );
        assert!(ConfigSdkRegistrar.register(ProviderId::Apple, None).is_err());

        let disabled = ProviderConfig {
            enabled: Some(false),
            ..ProviderConfig::default()
        };
        assert!(ConfigSdkRegistrar.register(ProviderId::Apple, Some(&disabled)).is_err());
    }

    #[test]
    fn missing_login_helper_fails_registration() {
        let cfg = ProviderConfig {
            login_command: Some(vec!["lifepoop-auth-no-such-helper".to_string()]),
            ..ProviderConfig::default()
        };
        let err = ConfigSdkRegistrar
            .register(ProviderId::Apple, Some(&cfg))
            .expect_err("missing helper");
        assert!(err.to_string().contains("not found"));
    }
}
