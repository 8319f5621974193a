//! JSON 파일 기반 레코드 저장소.
//!
//! 컬렉션마다 JSON 배열 파일 하나를 사용합니다.
//! 파일이 없거나 비어 있으면 빈 컬렉션으로 취급합니다.
//! 쓰기는 임시 파일에 먼저 기록한 뒤 rename하므로 중간에 실패해도 기존 파일이 남습니다.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use findash_core::{ActualItem, BudgetItem, ExpenseRow, IncomeRow, StorageConfig};

use super::{LedgerTableStore, RecordStore};
use crate::error::{DataError, Result};

/// JSON 파일 레코드 저장소.
pub struct JsonRecordStore {
    config: StorageConfig,
    /// 같은 프로세스 내 read-modify-write 직렬화
    write_lock: Mutex<()>,
}

impl JsonRecordStore {
    /// 저장소 설정으로 생성합니다.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// 기본 파일 이름으로 디렉토리에 저장소를 생성합니다.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(StorageConfig::in_dir(data_dir))
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn append<T>(&self, path: &Path, item: &T) -> Result<()>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut records: Vec<T> = read_collection(path)?;
        records.push(item.clone());
        write_collection(path, &records)?;
        debug!(path = %path.display(), total = records.len(), "레코드 추가");
        Ok(())
    }

    fn replace<T: Serialize>(&self, path: &Path, records: &[T]) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        write_collection(path, records)
    }
}

impl RecordStore for JsonRecordStore {
    fn name(&self) -> &str {
        "json"
    }

    fn load_budget_items(&self) -> Result<Vec<BudgetItem>> {
        read_collection(&self.config.budget_path())
    }

    fn save_budget_item(&self, item: &BudgetItem) -> Result<()> {
        self.append(&self.config.budget_path(), item)?;
        info!(category = %item.category, amount = %item.budgeted_amount, "예산 항목 저장");
        Ok(())
    }

    fn load_actual_items(&self) -> Result<Vec<ActualItem>> {
        read_collection(&self.config.actuals_path())
    }

    fn save_actual_item(&self, item: &ActualItem) -> Result<()> {
        self.append(&self.config.actuals_path(), item)?;
        info!(category = %item.category, amount = %item.actual_amount, date = %item.date, "실적 항목 저장");
        Ok(())
    }
}

impl LedgerTableStore for JsonRecordStore {
    fn load_income_rows(&self) -> Result<Vec<IncomeRow>> {
        read_collection(&self.config.income_path())
    }

    fn save_income_rows(&self, rows: &[IncomeRow]) -> Result<()> {
        self.replace(&self.config.income_path(), rows)?;
        info!(rows = rows.len(), "수입 표 저장");
        Ok(())
    }

    fn load_expense_rows(&self) -> Result<Vec<ExpenseRow>> {
        read_collection(&self.config.expenses_path())
    }

    fn save_expense_rows(&self, rows: &[ExpenseRow]) -> Result<()> {
        self.replace(&self.config.expenses_path(), rows)?;
        info!(rows = rows.len(), "지출 표 저장");
        Ok(())
    }
}

/// 컬렉션 파일을 읽습니다.
fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        debug!(path = %path.display(), "컬렉션 파일 없음, 빈 컬렉션 반환");
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content).map_err(|e| {
        warn!(path = %path.display(), error = %e, "컬렉션 파일 파싱 실패");
        DataError::Corrupt {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    })
}

/// 컬렉션 전체를 파일에 기록합니다 (임시 파일 → rename).
fn write_collection<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(records)?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use findash_core::Month;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn store() -> (TempDir, JsonRecordStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonRecordStore::in_dir(dir.path());
        (dir, store)
    }

    #[test]
    fn test_missing_files_load_empty() {
        let (_dir, store) = store();
        assert!(store.load_budget_items().unwrap().is_empty());
        assert!(store.load_actual_items().unwrap().is_empty());
        assert!(store.load_income_rows().unwrap().is_empty());
        assert!(store.load_expense_rows().unwrap().is_empty());
    }

    #[test]
    fn test_budget_items_append_not_overwrite() {
        let (_dir, store) = store();
        store.save_budget_item(&BudgetItem::new("Rent", dec!(1000)).unwrap()).unwrap();
        store.save_budget_item(&BudgetItem::new("Rent", dec!(200)).unwrap()).unwrap();

        let items = store.load_budget_items().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].budgeted_amount, dec!(1000));
        assert_eq!(items[1].budgeted_amount, dec!(200));
    }

    #[test]
    fn test_actual_item_persisted_with_date() {
        let (_dir, store) = store();
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        store.save_actual_item(&ActualItem::new("Food", dec!(42.5), date).unwrap()).unwrap();

        let items = store.load_actual_items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].date, date);
        assert_eq!(items[0].actual_amount, dec!(42.5));
    }

    #[test]
    fn test_corrupt_file_reported() {
        let (_dir, store) = store();
        fs::write(store.config().budget_path(), "{not json").unwrap();

        let err = store.load_budget_items().unwrap_err();
        assert!(matches!(err, DataError::Corrupt { .. }));
    }

    #[test]
    fn test_out_of_range_stored_amount_is_corrupt() {
        let (_dir, store) = store();
        fs::write(
            store.config().budget_path(),
            r#"[{"category": "Rent", "budgeted_amount": "79228162514264337593543950335"}]"#,
        )
        .unwrap();

        let err = store.load_budget_items().unwrap_err();
        assert!(matches!(err, DataError::Corrupt { .. }));
    }

    #[test]
    fn test_ledger_rows_replaced_as_whole() {
        let (_dir, store) = store();
        let rows = vec![
            IncomeRow::new(Month::January, "Salary", dec!(3000), dec!(3100)),
            IncomeRow::new(Month::February, "Salary", dec!(3000), dec!(2900)),
        ];
        store.save_income_rows(&rows).unwrap();
        store.save_income_rows(&rows[..1]).unwrap();

        let loaded = store.load_income_rows().unwrap();
        assert_eq!(loaded, rows[..1].to_vec());
    }

    #[test]
    fn test_ledger_rows_lenient_amounts() {
        let (_dir, store) = store();
        fs::write(
            store.config().expenses_path(),
            r#"[{"month": "March", "category": "Rent", "budgeted_amount": "", "actual_amount": "950"},
                {"month": null, "category": "", "budgeted_amount": null, "actual_amount": null}]"#,
        )
        .unwrap();

        let rows = store.load_expense_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].budgeted_amount, dec!(0));
        assert_eq!(rows[0].actual_amount, dec!(950));
        assert_eq!(rows[1].month, None);
    }
}
