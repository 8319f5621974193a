//! 레코드 저장소.
//!
//! 예산/실적 레코드는 항목 단위로 추가(append)만 하고,
//! 수입/지출 원장 표는 컬렉션 전체를 한 번에 저장합니다.
//!
//! ## 구현
//! - `JsonRecordStore`: 컬렉션당 JSON 배열 파일 하나
//! - `InMemoryRecordStore`: 테스트 및 임시 세션용

pub mod json;
pub mod memory;

use findash_core::{ActualItem, BudgetItem, ExpenseRow, IncomeRow};

use crate::error::Result;

/// 예산/실적 레코드 저장소.
///
/// 로드는 항상 전체 컬렉션을 반환하고, 저장은 다음 로드 전에 반영되어야 합니다.
pub trait RecordStore: Send + Sync {
    /// 저장소 이름 (로그용)
    fn name(&self) -> &str;

    /// 모든 예산 항목 로드
    fn load_budget_items(&self) -> Result<Vec<BudgetItem>>;

    /// 예산 항목 추가
    fn save_budget_item(&self, item: &BudgetItem) -> Result<()>;

    /// 모든 실적 항목 로드
    fn load_actual_items(&self) -> Result<Vec<ActualItem>>;

    /// 실적 항목 추가
    fn save_actual_item(&self, item: &ActualItem) -> Result<()>;
}

/// 수입/지출 원장 표 저장소.
///
/// 표 편집기는 행 전체를 다시 저장하므로 컬렉션 단위로 덮어씁니다.
pub trait LedgerTableStore: Send + Sync {
    fn load_income_rows(&self) -> Result<Vec<IncomeRow>>;

    fn save_income_rows(&self, rows: &[IncomeRow]) -> Result<()>;

    fn load_expense_rows(&self) -> Result<Vec<ExpenseRow>>;

    fn save_expense_rows(&self, rows: &[ExpenseRow]) -> Result<()>;
}
