//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::resolve_app_key;
use super::utils::command_exists;
use crate::application::config::ProviderConfig;
use crate::domain::credential::ProviderId;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub providers: ProvidersInspection,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvidersInspection {
    pub apple: Option<ProviderInspection>,
    pub kakao: Option<ProviderInspection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderInspection {
    pub enabled: bool,
    /// 활성 + (필요 시) 앱 키 + 로그인 명령 실행 가능
    pub ready: bool,
    pub app_key_source: Option<String>,
    pub app_key_resolved: bool,
    pub client_id: Option<String>,
    pub login_command: Option<Vec<String>>,
    pub login_command_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefer_talk: Option<bool>,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let providers = &loaded.config.providers;
        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            providers: ProvidersInspection {
                apple: providers
                    .apple
                    .as_ref()
                    .map(|cfg| ProviderInspection::from_config(ProviderId::Apple, cfg)),
                kakao: providers
                    .kakao
                    .as_ref()
                    .map(|cfg| ProviderInspection::from_config(ProviderId::Kakao, cfg)),
            },
        }
    }
}

impl ProviderInspection {
    fn from_config(provider: ProviderId, cfg: &ProviderConfig) -> Self {
        let enabled = cfg.is_enabled();
        let app_key = resolve_app_key(cfg);
        let app_key_resolved = app_key.app_key.is_some();
        let login_command = cfg.login_command().map(<[String]>::to_vec);
        let login_command_available = login_command
            .as_ref()
            .and_then(|cmd| cmd.first())
            .is_some_and(|program| command_exists(program.trim()));
        let needs_app_key = provider == ProviderId::Kakao;

        Self {
            enabled,
            ready: enabled && login_command_available && (app_key_resolved || !needs_app_key),
            app_key_source: app_key.source,
            app_key_resolved,
            client_id: cfg.client_id.clone(),
            login_command,
            login_command_available,
            prefer_talk: needs_app_key.then(|| cfg.prefer_talk()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper_config(command: &str) -> ProviderConfig {
        ProviderConfig {
            login_command: Some(vec![command.to_string()]),
            app_key_env: Some("LIFEPOOP_TEST_SURELY_UNSET_INSPECT_KEY".to_string()),
            ..ProviderConfig::default()
        }
    }

    #[cfg(unix)]
    #[test]
    fn kakao_needs_app_key_but_apple_does_not() {
        let kakao = ProviderInspection::from_config(ProviderId::Kakao, &helper_config("sh"));
        assert!(kakao.login_command_available);
        assert!(!kakao.app_key_resolved);
        assert!(!kakao.ready);
        assert_eq!(
            kakao.app_key_source.as_deref(),
            Some("env:LIFEPOOP_TEST_SURELY_UNSET_INSPECT_KEY (missing)")
        );

        let apple = ProviderInspection::from_config(ProviderId::Apple, &helper_config("sh"));
        assert!(apple.login_command_available);
        assert!(apple.ready);

        let keyed = ProviderConfig {
            app_key: Some("native-app-key".to_string()),
            ..helper_config("sh")
        };
        assert!(ProviderInspection::from_config(ProviderId::Kakao, &keyed).ready);
    }

    #[cfg(unix)]
    #[test]
    fn disabled_provider_is_never_ready() {
        let cfg = ProviderConfig {
            enabled: Some(false),
            ..helper_config("sh")
        };
        let inspection = ProviderInspection::from_config(ProviderId::Apple, &cfg);
        assert!(!inspection.enabled);
        assert!(!inspection.ready);
    }

    #[test]
    fn missing_or_absent_helper_is_unavailable() {
        let missing = ProviderInspection::from_config(
            ProviderId::Apple,
            &helper_config("lifepoop-auth-no-such-helper"),
        );
        assert!(!missing.login_command_available);
        assert!(!missing.ready);

        let absent = ProviderInspection::from_config(ProviderId::Apple, &ProviderConfig::default());
        assert_eq!(absent.login_command, None);
        assert!(!absent.login_command_available);
    }

    #[test]
    fn prefer_talk_is_reported_for_kakao_only() {
        let cfg = ProviderConfig {
            prefer_talk: Some(false),
            ..ProviderConfig::default()
        };
        let apple = serde_json::to_value(ProviderInspection::from_config(ProviderId::Apple, &cfg))
            .expect("serialize");
        assert!(apple.get("prefer_talk").is_none());

        let kakao = serde_json::to_value(ProviderInspection::from_config(ProviderId::Kakao, &cfg))
            .expect("serialize");
        assert_eq!(kakao["prefer_talk"], serde_json::json!(false));
    }
}
