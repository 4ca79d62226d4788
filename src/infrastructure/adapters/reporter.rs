//! 콘솔 리포터 포트 구현 어댑터.

use std::io::{self, IsTerminal};

use crate::application::ports::Reporter;

/// 콘솔 전용 리포터 어댑터. stderr로 출력해 stdout을 결과 전용으로 남긴다.
pub struct ConsoleReporter {
    colored: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    /// stderr가 TTY일 때만 상태 색상을 사용한다.
    pub fn new() -> Self {
        Self {
            colored: io::stderr().is_terminal(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, name: &str) {
        eprintln!();
        eprintln!("==================== {} ====================", name);
    }

    fn kv(&self, key: &str, value: &str) {
        eprintln!("{:<12}: {}", key, value);
    }

    fn status(&self, scope: &str, message: &str) {
        if self.colored {
            eprintln!("[{:<12}] {}", scope, colorize_status(message));
        } else {
            eprintln!("[{:<12}] {}", scope, message);
        }
    }
}

fn colorize_status(message: &str) -> String {
    let head = message
        .split(|c: char| !c.is_ascii_alphabetic())
        .next()
        .unwrap_or_default();
    match head {
        "initializing" | "awaiting" => format!("\x1b[33m{message}\x1b[0m"),
        "succeeded" | "ready" => format!("\x1b[32m{message}\x1b[0m"),
        "failed" | "error" => format!("\x1b[31m{message}\x1b[0m"),
        _ => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_follow_leading_status_word() {
        assert_eq!(colorize_status("succeeded apple"), "\x1b[32msucceeded apple\x1b[0m");
        assert_eq!(colorize_status("failed: boom"), "\x1b[31mfailed: boom\x1b[0m");
        assert_eq!(colorize_status("idle"), "idle");
    }
}
