//! 재무 대시보드 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 예산/실적 입력과 대사 보고서
//! - 수입/지출 원장 표 편집과 월별 보고서
//! - 시세 조회 후 지표 보고서
//! - 저축/투자 계산기
//! - 설정 확인

pub mod commands;

pub use commands::OutputFormat;
