//! 적용된 설정 확인.

use anyhow::{Context, Result};

use findash_core::AppConfig;

/// 기본값, 설정 파일, 환경 변수를 모두 반영한 최종 설정을 TOML로 출력합니다.
pub fn render_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config as TOML")
}
