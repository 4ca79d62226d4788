//! 설정 파일 탐색/병합 로더.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::config::Config;

/// 명시 설정 파일 경로를 지정하는 환경변수.
pub const CONFIG_ENV: &str = "LIFEPOOP_AUTH_CONFIG";

#[derive(Debug, Clone)]
pub(crate) struct LoadedConfig {
    pub config: Config,
    pub searched_paths: Vec<PathBuf>,
    pub loaded_paths: Vec<PathBuf>,
}

/// 우선순위 경로를 순회해 JSON 설정을 병합한다.
pub(crate) fn load_merged_config() -> Result<LoadedConfig> {
    load_from_paths(config_paths())
}

/// 주어진 경로 목록(낮은 우선순위 -> 높은 우선순위)을 병합한다.
/// 존재하지 않는 경로는 건너뛰고, 파일이 하나도 없으면 기본 설정을 쓴다.
pub(crate) fn load_from_paths(paths: Vec<PathBuf>) -> Result<LoadedConfig> {
    let mut merged = Config::default();
    let mut loaded_paths = Vec::new();

    for path in &paths {
        if !path.exists() {
            continue;
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let parsed: Config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?;
        merged.merge_from(parsed);
        debug!(path = %path.display(), "config file merged");
        loaded_paths.push(path.to_path_buf());
    }

    Ok(LoadedConfig {
        config: merged,
        searched_paths: paths,
        loaded_paths,
    })
}

/// 시스템 + 사용자 + 프로젝트 + 명시 경로 순으로 병합 경로를 구성한다.
pub fn config_paths() -> Vec<PathBuf> {
    // 낮은 우선순위 -> 높은 우선순위 순서로 병합됨.
    let mut paths = vec![PathBuf::from("/etc/lifepoop-auth/config.json")];

    if let Some(base) = dirs::config_dir() {
        paths.push(base.join("lifepoop-auth").join("config.json"));
    }

    paths.push(PathBuf::from(".lifepoop-auth/config.json"));

    if let Ok(path) = env::var(CONFIG_ENV)
        && !path.trim().is_empty()
    {
        paths.push(Path::new(&path).to_path_buf());
    }

    dedup_paths(paths)
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for p in paths {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::credential::ProviderId;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).expect("write config");
        path
    }

    #[test]
    fn later_files_override_earlier_ones() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = write(
            dir.path(),
            "base.json",
            r#"{"providers":{"kakao":{"app_key":"base-key","login_command":["kakao-login"]},"apple":{"enabled":true}}}"#,
        );
        let local = write(
            dir.path(),
            "local.json",
            r#"{"providers":{"kakao":{"app_key":"local-key","prefer_talk":false}}}"#,
        );
        let missing = dir.path().join("missing.json");

        let loaded =
            load_from_paths(vec![base.clone(), missing.clone(), local.clone()]).expect("load");

        assert_eq!(loaded.loaded_paths, vec![base, local]);
        assert_eq!(loaded.searched_paths.len(), 3);
        let kakao = loaded
            .config
            .provider_config(ProviderId::Kakao)
            .expect("kakao config");
        assert_eq!(kakao.app_key.as_deref(), Some("local-key"));
        assert_eq!(kakao.login_command(), Some(&["kakao-login".to_string()][..]));
        assert!(!kakao.prefer_talk());
        assert!(loaded.config.provider_config(ProviderId::Apple).is_some());
    }

    #[test]
    fn no_files_yields_default_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = load_from_paths(vec![dir.path().join("nope.json")]).expect("load");
        assert!(loaded.loaded_paths.is_empty());
        assert!(loaded.config.enabled_providers().is_empty());
    }

    #[test]
    fn malformed_json_names_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bad = write(dir.path(), "bad.json", "{ not json");
        let err = load_from_paths(vec![bad]).expect_err("must fail");
        assert!(format!("{err:#}").contains("bad.json"));
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let paths = dedup_paths(vec![
            PathBuf::from("a"),
            PathBuf::from("b"),
            PathBuf::from("a"),
        ]);
        assert_eq!(paths, vec![PathBuf::from("a"), PathBuf::from("b")]);
    }
}
