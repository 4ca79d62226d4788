//! 설정 파일 탐색/병합 결과를 확인하는 유스케이스.

use anyhow::Result;

use crate::application::ports::{ConfigRepository, Reporter};

/// 현재 적용 중인 설정을 사람이 읽기 쉬운 JSON으로 반환한다.
pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub reporter: &'a dyn Reporter,
}

impl<'a> InspectConfigUseCase<'a> {
    /// 병합 설정 기준 활성 제공자를 요약하고, 진단 JSON을 생성한다.
    pub fn execute(&self) -> Result<String> {
        let config = self.config_repo.load()?;
        let enabled: Vec<&str> = config
            .enabled_providers()
            .into_iter()
            .map(|p| p.code())
            .collect();

        let summary = if enabled.is_empty() {
            "-".to_string()
        } else {
            enabled.join(", ")
        };
        self.reporter.section("Config");
        self.reporter.kv("Enabled", &summary);

        self.config_repo.inspect_pretty_json()
    }
}
