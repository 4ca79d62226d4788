//! 설정 값(app key/env 등)을 실제 런타임 값으로 해석하는 유틸리티.
//!
//! - 환경변수 접근은 인프라 계층에서만 수행한다.

use std::env;

use crate::application::config::ProviderConfig;

/// 앱 키 해석 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppKeyResolution {
    pub app_key: Option<String>,
    pub source: Option<String>,
}

/// 앱 키는 `app_key`(inline) 우선, 없으면 `app_key_env`를 조회한다.
pub fn resolve_app_key(cfg: &ProviderConfig) -> AppKeyResolution {
    if let Some(key) = cfg.app_key.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        return AppKeyResolution {
            app_key: Some(key.to_string()),
            source: Some("inline".to_string()),
        };
    }

    let Some(env_name) = cfg
        .app_key_env
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
    else {
        return AppKeyResolution {
            app_key: None,
            source: None,
        };
    };

    match env::var(env_name).ok().map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => AppKeyResolution {
            app_key: Some(v),
            source: Some(format!("env:{env_name}")),
        },
        _ => AppKeyResolution {
            app_key: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}
