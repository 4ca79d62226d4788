//! 외부 헬퍼 명령으로 네이티브 로그인 UI를 대행하는 흐름.
//!
//! 헬퍼는 stdout으로 JSON 문서 하나를 출력한다.
//! 토큰 필드는 표준 base64로 인코딩된 원문 바이트다.
//! stderr는 수집해 문서 없이 실패한 경우의 사유로 쓴다.

use std::process::Stdio;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{
    AuthorizationRequest, NativeAuthorization, NativeAuthorizationFlow, NativeCredential,
    NativeFlowError,
};
use crate::infrastructure::config::command_exists;

/// 셸 관례상 SIGINT(Ctrl-C)로 종료된 헬퍼의 종료 코드.
const EXIT_INTERRUPTED: i32 = 130;

pub struct CommandAuthorizationFlow {
    command: Vec<String>,
}

impl CommandAuthorizationFlow {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

#[async_trait]
impl NativeAuthorizationFlow for CommandAuthorizationFlow {
    async fn authorize(
        &self,
        request: &AuthorizationRequest,
    ) -> Result<NativeAuthorization, NativeFlowError> {
        let program = self
            .command
            .first()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| NativeFlowError::Failed("login command is empty".to_string()))?;
        let args: Vec<&str> = self.command.iter().skip(1).map(|s| s.as_str()).collect();

        if !command_exists(program) {
            return Err(NativeFlowError::Failed(format!(
                "login helper not found in PATH: '{program}'"
            )));
        }

        let scopes: Vec<&str> = request.scopes.iter().map(|s| s.code()).collect();
        let mut cmd = Command::new(program);
        cmd.args(&args)
            .env("LIFEPOOP_AUTH_PROVIDER", request.provider.code())
            .env("LIFEPOOP_AUTH_SCOPES", scopes.join(","))
            .env("LIFEPOOP_AUTH_CHANNEL", request.channel.code())
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // 호출자가 흐름을 버리면 헬퍼 UI도 함께 종료한다.
            .kill_on_drop(true);
        if let Some(client_id) = &request.client_id {
            cmd.env("LIFEPOOP_AUTH_CLIENT_ID", client_id);
        }

        debug!(provider = %request.provider, program, "running login helper");
        let output = cmd.output().await.map_err(|err| {
            NativeFlowError::Failed(format!("failed to run login helper '{program}': {err}"))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!(provider = %request.provider, stderr = %stderr.trim(), "login helper stderr");
        }

        // 결과 문서가 있으면 종료 코드와 무관하게 그 문서를 따른다.
        let parsed = match (!stdout.is_empty()).then(|| parse_response(&stdout)) {
            Some(Ok(response)) => return into_authorization(response),
            unparsed => unparsed,
        };

        if output.status.code() == Some(EXIT_INTERRUPTED) {
            return Err(NativeFlowError::Cancelled);
        }
        if !output.status.success() {
            return Err(NativeFlowError::Failed(match stderr_tail(&stderr) {
                Some(tail) => format!("login helper exited with {}: {tail}", output.status),
                None => format!("login helper exited with {}", output.status),
            }));
        }
        match parsed {
            Some(Err(err)) => Err(NativeFlowError::Failed(format!(
                "unrecognized login helper output: {err}"
            ))),
            _ => Err(NativeFlowError::Failed(
                "login helper returned no output".to_string(),
            )),
        }
    }
}

/// 실패 사유에 붙일 stderr 마지막 몇 줄.
fn stderr_tail(stderr: &str) -> Option<String> {
    const TAIL_LINES: usize = 3;
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let start = lines.len().saturating_sub(TAIL_LINES);
    let tail = lines[start..].join(" | ");
    (!tail.is_empty()).then_some(tail)
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum WireResponse {
    Authorized {
        #[serde(default)]
        credential: Option<WireCredential>,
    },
    Cancelled,
    Failed {
        #[serde(default)]
        reason: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum WireCredential {
    AppleId {
        user: String,
        #[serde(default)]
        email: Option<String>,
        #[serde(default)]
        identity_token: Option<String>,
    },
    Password {
        user: String,
    },
    KakaoOauth {
        access_token: String,
        #[serde(default)]
        refresh_token: Option<String>,
        #[serde(default)]
        scopes: Vec<String>,
    },
}

/// 헬퍼 출력을 해석한다.
pub(crate) fn parse_authorization(raw: &str) -> Result<NativeAuthorization, NativeFlowError> {
    let response = parse_response(raw).map_err(|err| {
        NativeFlowError::Failed(format!("unrecognized login helper output: {err}"))
    })?;
    into_authorization(response)
}

/// 전체가 JSON이 아니면 마지막 비어있지 않은 줄을 시도한다.
fn parse_response(raw: &str) -> Result<WireResponse, serde_json::Error> {
    match serde_json::from_str(raw) {
        Ok(parsed) => Ok(parsed),
        Err(first_err) => raw
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .and_then(|line| serde_json::from_str(line).ok())
            .ok_or(first_err),
    }
}

fn into_authorization(response: WireResponse) -> Result<NativeAuthorization, NativeFlowError> {
    match response {
        WireResponse::Authorized { credential } => Ok(NativeAuthorization {
            credential: credential.map(into_native_credential).transpose()?,
        }),
        WireResponse::Cancelled => Err(NativeFlowError::Cancelled),
        WireResponse::Failed { reason } => Err(NativeFlowError::Failed(
            reason.unwrap_or_else(|| "login helper reported failure".to_string()),
        )),
    }
}

fn into_native_credential(wire: WireCredential) -> Result<NativeCredential, NativeFlowError> {
    Ok(match wire {
        WireCredential::AppleId {
            user,
            email,
            identity_token,
        } => NativeCredential::AppleId {
            user,
            email,
            identity_token: identity_token
                .map(|t| decode_base64("identity_token", &t))
                .transpose()?,
        },
        WireCredential::Password { user } => NativeCredential::Password { user },
        WireCredential::KakaoOauth {
            access_token,
            refresh_token,
            scopes,
        } => NativeCredential::KakaoOAuth {
            access_token: decode_base64("access_token", &access_token)?,
            refresh_token: refresh_token
                .map(|t| decode_base64("refresh_token", &t))
                .transpose()?,
            scopes,
        },
    })
}

fn decode_base64(field: &str, value: &str) -> Result<Vec<u8>, NativeFlowError> {
    STANDARD
        .decode(value.trim())
        .map_err(|err| NativeFlowError::Failed(format!("malformed base64 in {field}: {err}")))
}
