//! 데이터 저장 및 조회.
//!
//! 이 crate는 다음을 제공합니다:
//! - 예산/실적 레코드 저장소 (JSON 파일, 인메모리)
//! - 수입/지출 원장 표 저장
//! - 시세 데이터 Provider (Yahoo Finance, 인메모리)

pub mod error;
pub mod provider;
pub mod storage;

pub use error::{DataError, Result};

// 저장소 타입 재내보내기
pub use storage::json::JsonRecordStore;
pub use storage::memory::InMemoryRecordStore;
pub use storage::{LedgerTableStore, RecordStore};

// 시세 Provider 재내보내기
pub use provider::{InMemoryPriceProvider, MarketDataProvider, YahooPriceProvider};
