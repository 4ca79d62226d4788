//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수/프로세스 접근은 `infrastructure`에서만 수행한다.

use serde::{Deserialize, Serialize};

use crate::domain::credential::ProviderId;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 제공자별 SDK 등록/로그인 흐름 설정
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProvidersConfig {
    pub apple: Option<ProviderConfig>,
    pub kakao: Option<ProviderConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProviderConfig {
    /// 제공자 활성화 여부(기본 true)
    pub enabled: Option<bool>,
    /// SDK 등록용 앱 키(직접값, 민감정보: 권장하지 않음)
    pub app_key: Option<String>,
    /// 앱 키를 읽을 환경변수 이름
    pub app_key_env: Option<String>,
    /// Apple Service ID 등 클라이언트 식별자(선택)
    pub client_id: Option<String>,
    /// 네이티브 로그인 흐름을 대행하는 헬퍼 명령 (예: ["lifepoop-apple-signin"])
    pub login_command: Option<Vec<String>>,
    /// 카카오톡 앱 로그인 우선 여부(기본 true, kakao 전용)
    pub prefer_talk: Option<bool>,
}

impl Config {
    pub fn provider_config(&self, provider: ProviderId) -> Option<&ProviderConfig> {
        match provider {
            ProviderId::Apple => self.providers.apple.as_ref(),
            ProviderId::Kakao => self.providers.kakao.as_ref(),
        }
    }

    /// 설정이 존재하고 비활성화되지 않은 제공자 목록.
    pub fn enabled_providers(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|p| self.provider_config(*p).is_some_and(ProviderConfig::is_enabled))
            .collect()
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        self.providers.merge_from(other.providers);
    }
}

impl ProviderConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn prefer_talk(&self) -> bool {
        self.prefer_talk.unwrap_or(true)
    }

    /// 비어 있지 않은 로그인 명령만 반환한다.
    pub fn login_command(&self) -> Option<&[String]> {
        self.login_command
            .as_deref()
            .filter(|cmd| cmd.first().is_some_and(|p| !p.trim().is_empty()))
    }

    pub fn merge_from(&mut self, other: ProviderConfig) {
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
        if other.app_key.is_some() {
            self.app_key = other.app_key;
        }
        if other.app_key_env.is_some() {
            self.app_key_env = other.app_key_env;
        }
        if other.client_id.is_some() {
            self.client_id = other.client_id;
        }
        if other.login_command.is_some() {
            self.login_command = other.login_command;
        }
        if other.prefer_talk.is_some() {
            self.prefer_talk = other.prefer_talk;
        }
    }
}

impl ProvidersConfig {
    pub fn merge_from(&mut self, other: ProvidersConfig) {
        merge_provider_config(&mut self.apple, other.apple);
        merge_provider_config(&mut self.kakao, other.kakao);
    }
}

fn merge_provider_config(target: &mut Option<ProviderConfig>, incoming: Option<ProviderConfig>) {
    match (target.as_mut(), incoming) {
        (Some(existing), Some(next)) => existing.merge_from(next),
        (None, Some(next)) => *target = Some(next),
        _ => {}
    }
}
