//! # Findash Core
//!
//! 개인 재무 대시보드의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 대시보드 전반에서 사용되는 기본 타입을 제공합니다:
//! - 예산/실적 레코드 및 입력 검증
//! - 수입/지출 원장 행 (월별 집계용)
//! - 가격 시계열 구조체
//! - 달력 월 및 금액 유틸리티
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
