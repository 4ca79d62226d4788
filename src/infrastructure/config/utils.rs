//! 설정 모듈 공용 유틸리티.

use std::env;
use std::path::{Path, PathBuf};

/// 로그인 헬퍼 명령이 실행 가능한지 탐지한다.
/// 경로가 포함된 명령은 파일 존재만, 이름만 주어지면 PATH를 검사한다.
pub fn command_exists(command: &str) -> bool {
    let command = command.trim();
    if command.is_empty() {
        return false;
    }

    let command_path = Path::new(command);
    if command_path.components().count() > 1 {
        return command_path.is_file();
    }

    let Some(path_var) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&path_var)
        .flat_map(|dir| candidates(&dir, command))
        .any(|candidate| candidate.is_file())
}

#[cfg(not(windows))]
fn candidates(dir: &Path, command: &str) -> Vec<PathBuf> {
    vec![dir.join(command)]
}

/// Windows는 확장자를 생략할 수 있으므로 PATHEXT 후보를 함께 본다.
#[cfg(windows)]
fn candidates(dir: &Path, command: &str) -> Vec<PathBuf> {
    let mut out = vec![dir.join(command)];
    if Path::new(command).extension().is_some() {
        return out;
    }
    let pathext = env::var_os("PATHEXT").unwrap_or_else(|| ".EXE;.CMD;.BAT;.COM".into());
    out.extend(
        pathext
            .to_string_lossy()
            .split(';')
            .map(str::trim)
            .filter(|ext| !ext.is_empty())
            .map(|ext| dir.join(format!("{command}{ext}"))),
    );
    out
}
