//! 인메모리 레코드 저장소.

use std::sync::RwLock;

use findash_core::{ActualItem, BudgetItem, ExpenseRow, IncomeRow};

use super::{LedgerTableStore, RecordStore};
use crate::error::Result;

#[derive(Debug, Default)]
struct Collections {
    budget: Vec<BudgetItem>,
    actuals: Vec<ActualItem>,
    income: Vec<IncomeRow>,
    expenses: Vec<ExpenseRow>,
}

/// 프로세스 메모리에만 보관하는 저장소.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    inner: RwLock<Collections>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 초기 예산/실적 항목으로 생성합니다.
    pub fn with_items(budget: Vec<BudgetItem>, actuals: Vec<ActualItem>) -> Self {
        Self {
            inner: RwLock::new(Collections {
                budget,
                actuals,
                ..Default::default()
            }),
        }
    }

    fn read<R>(&self, f: impl FnOnce(&Collections) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    fn write(&self, f: impl FnOnce(&mut Collections)) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard);
    }
}

impl RecordStore for InMemoryRecordStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn load_budget_items(&self) -> Result<Vec<BudgetItem>> {
        Ok(self.read(|c| c.budget.clone()))
    }

    fn save_budget_item(&self, item: &BudgetItem) -> Result<()> {
        self.write(|c| c.budget.push(item.clone()));
        Ok(())
    }

    fn load_actual_items(&self) -> Result<Vec<ActualItem>> {
        Ok(self.read(|c| c.actuals.clone()))
    }

    fn save_actual_item(&self, item: &ActualItem) -> Result<()> {
        self.write(|c| c.actuals.push(item.clone()));
        Ok(())
    }
}

impl LedgerTableStore for InMemoryRecordStore {
    fn load_income_rows(&self) -> Result<Vec<IncomeRow>> {
        Ok(self.read(|c| c.income.clone()))
    }

    fn save_income_rows(&self, rows: &[IncomeRow]) -> Result<()> {
        self.write(|c| c.income = rows.to_vec());
        Ok(())
    }

    fn load_expense_rows(&self) -> Result<Vec<ExpenseRow>> {
        Ok(self.read(|c| c.expenses.clone()))
    }

    fn save_expense_rows(&self, rows: &[ExpenseRow]) -> Result<()> {
        self.write(|c| c.expenses = rows.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_memory_store_append() {
        let store = InMemoryRecordStore::new();
        store.save_budget_item(&BudgetItem::new("Rent", dec!(1000)).unwrap()).unwrap();
        store.save_budget_item(&BudgetItem::new("Food", dec!(300)).unwrap()).unwrap();

        let items = store.load_budget_items().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].category, "Food");
        assert!(store.load_actual_items().unwrap().is_empty());
    }
}
