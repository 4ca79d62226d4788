//! 로그인 제공자 식별자와 정규화된 인증 결과 값 객체.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 지원하는 외부 인증 제공자(닫힌 집합).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Apple,
    Kakao,
}

impl ProviderId {
    pub const ALL: [ProviderId; 2] = [ProviderId::Apple, ProviderId::Kakao];

    /// 설정 키/로그용 코드값.
    pub fn code(self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Kakao => "kakao",
        }
    }

    /// 사용자 표시 이름.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Apple => "Apple",
            Self::Kakao => "Kakao",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ProviderId {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "apple" => Ok(Self::Apple),
            "kakao" => Ok(Self::Kakao),
            other => Err(format!(
                "unknown provider '{other}' (expected one of: apple, kakao)"
            )),
        }
    }
}

/// 제공자에게 요청하는 최소 동의 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScope {
    FullName,
    Email,
    Profile,
    AccountEmail,
}

impl AuthScope {
    pub fn code(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Profile => "profile",
            Self::AccountEmail => "account_email",
        }
    }
}

/// 네이티브 로그인 진입점 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginChannel {
    /// OS가 띄우는 시스템 인증 시트(Sign in with Apple).
    SystemSheet,
    /// 카카오톡 앱 간편 로그인.
    KakaoTalk,
    /// 카카오 계정(웹) 로그인.
    KakaoAccount,
}

impl LoginChannel {
    pub fn code(self) -> &'static str {
        match self {
            Self::SystemSheet => "system_sheet",
            Self::KakaoTalk => "kakao_talk",
            Self::KakaoAccount => "kakao_account",
        }
    }
}

/// 제공자 로그인 성공 시 어댑터가 만드는 정규화 결과.
/// 생성 이후 변경되지 않으며 저장하지 않는다.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialResult {
    access_token: String,
    provider: ProviderId,
}

impl CredentialResult {
    pub fn new(access_token: impl Into<String>, provider: ProviderId) -> Self {
        Self {
            access_token: access_token.into(),
            provider,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }
}

// 토큰 원문이 로그에 남지 않도록 길이만 노출한다.
impl fmt::Debug for CredentialResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialResult")
            .field("provider", &self.provider)
            .field("access_token", &format_args!("<{} bytes>", self.access_token.len()))
            .finish()
    }
}
