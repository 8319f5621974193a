//! 예산 대비 실적 대사(reconciliation).
//!
//! 예산 항목과 실적 항목을 카테고리 기준으로 외부 조인(outer join)하고
//! 카테고리별 차이(예산 − 실적)를 계산합니다.
//!
//! - 카테고리 비교는 대소문자를 구분하는 정확한 일치
//! - 한쪽에만 있는 카테고리도 유효한 데이터이며 없는 쪽은 0
//! - 같은 쪽에 같은 카테고리가 여러 번 있으면 먼저 합산
//! - 결과는 카테고리 사전순

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use findash_core::{ActualItem, Amount, BudgetItem};

/// 카테고리별 대사 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledCategory {
    pub category: String,
    pub budgeted_amount: Amount,
    pub actual_amount: Amount,
    /// 예산 − 실적 (양수면 예산 이하로 지출)
    pub variance: Amount,
}

impl ReconciledCategory {
    fn new(category: String, budgeted_amount: Amount, actual_amount: Amount) -> Self {
        Self {
            category,
            budgeted_amount,
            actual_amount,
            variance: budgeted_amount - actual_amount,
        }
    }
}

/// 대사 결과 합계.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationTotals {
    pub total_budgeted: Amount,
    pub total_actual: Amount,
    /// total_budgeted − total_actual
    pub total_variance: Amount,
}

/// 예산/실적 항목을 카테고리별로 대사합니다.
pub fn reconcile(budget_items: &[BudgetItem], actual_items: &[ActualItem]) -> Vec<ReconciledCategory> {
    let span = findash_core::ledger_span!("reconcile", "budget_vs_actual", budget_items.len() + actual_items.len());
    let _enter = span.enter();

    let mut merged: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();

    for item in budget_items {
        merged.entry(item.category.as_str()).or_default().0 += item.budgeted_amount;
    }
    for item in actual_items {
        merged.entry(item.category.as_str()).or_default().1 += item.actual_amount;
    }

    debug!(
        budget_items = budget_items.len(),
        actual_items = actual_items.len(),
        categories = merged.len(),
        "카테고리 병합 완료"
    );

    merged
        .into_iter()
        .map(|(category, (budgeted, actual))| {
            ReconciledCategory::new(category.to_string(), budgeted, actual)
        })
        .collect()
}

/// 대사 결과의 전체 합계. 빈 입력이면 (0, 0, 0).
pub fn totals(rows: &[ReconciledCategory]) -> ReconciliationTotals {
    let total_budgeted: Decimal = rows.iter().map(|r| r.budgeted_amount).sum();
    let total_actual: Decimal = rows.iter().map(|r| r.actual_amount).sum();

    ReconciliationTotals {
        total_budgeted,
        total_actual,
        total_variance: total_budgeted - total_actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn budget(category: &str, amount: Decimal) -> BudgetItem {
        BudgetItem::new(category, amount).unwrap()
    }

    fn actual(category: &str, amount: Decimal) -> ActualItem {
        ActualItem::new(category, amount, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()).unwrap()
    }

    #[test]
    fn test_reconcile_matching_category() {
        let rows = reconcile(&[budget("Rent", dec!(1000))], &[actual("Rent", dec!(950))]);

        assert_eq!(
            rows,
            vec![ReconciledCategory {
                category: "Rent".to_string(),
                budgeted_amount: dec!(1000),
                actual_amount: dec!(950),
                variance: dec!(50),
            }]
        );
    }

    #[test]
    fn test_reconcile_unmatched_categories_zero_filled() {
        let rows = reconcile(&[budget("Rent", dec!(1000))], &[actual("Travel", dec!(200))]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Rent");
        assert_eq!(rows[0].actual_amount, Decimal::ZERO);
        assert_eq!(rows[0].variance, dec!(1000));
        assert_eq!(rows[1].category, "Travel");
        assert_eq!(rows[1].budgeted_amount, Decimal::ZERO);
        assert_eq!(rows[1].variance, dec!(-200));
    }

    #[test]
    fn test_reconcile_duplicates_summed() {
        let rows = reconcile(
            &[budget("Food", dec!(200)), budget("Food", dec!(100))],
            &[actual("Food", dec!(120)), actual("Food", dec!(90))],
        );

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].budgeted_amount, dec!(300));
        assert_eq!(rows[0].actual_amount, dec!(210));
        assert_eq!(rows[0].variance, dec!(90));
    }

    #[test]
    fn test_reconcile_case_sensitive() {
        let rows = reconcile(&[budget("rent", dec!(1))], &[actual("Rent", dec!(1))]);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_totals() {
        let rows = reconcile(
            &[budget("Rent", dec!(1000)), budget("Food", dec!(300))],
            &[actual("Rent", dec!(950)), actual("Fun", dec!(80))],
        );
        let t = totals(&rows);

        assert_eq!(t.total_budgeted, dec!(1300));
        assert_eq!(t.total_actual, dec!(1030));
        assert_eq!(t.total_variance, dec!(270));
    }

    #[test]
    fn test_totals_empty() {
        assert_eq!(totals(&[]), ReconciliationTotals::default());
        assert!(reconcile(&[], &[]).is_empty());
    }
}
