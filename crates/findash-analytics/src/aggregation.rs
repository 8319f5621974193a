//! 월별 집계.
//!
//! 수입/지출 원장 행을 달력 월로 묶어 합산하고,
//! 월 순서(1월 → 12월)대로 순이익과 누적 순이익을 계산합니다.

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use findash_core::{Amount, LedgerRow, Month};

/// 월별 요약.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: Month,
    pub budgeted_income: Amount,
    pub actual_income: Amount,
    pub budgeted_expenses: Amount,
    pub actual_expenses: Amount,
    /// 실제 수입 − 실제 지출
    pub net_income: Amount,
    /// 1월부터 해당 월까지 순이익 누계
    pub cumulative_net_income: Amount,
}

impl MonthlySummary {
    /// 금액으로 요약을 생성합니다 (누계는 0).
    pub fn new(
        month: Month,
        budgeted_income: Amount,
        actual_income: Amount,
        budgeted_expenses: Amount,
        actual_expenses: Amount,
    ) -> Self {
        Self {
            month,
            budgeted_income,
            actual_income,
            budgeted_expenses,
            actual_expenses,
            net_income: actual_income - actual_expenses,
            cumulative_net_income: Decimal::ZERO,
        }
    }
}

#[derive(Default)]
struct MonthTotals {
    budgeted_income: Decimal,
    actual_income: Decimal,
    budgeted_expenses: Decimal,
    actual_expenses: Decimal,
}

/// 수입/지출 행을 월별로 요약합니다.
///
/// 어느 한쪽에라도 있는 월만 결과에 포함되며, 없는 쪽은 0입니다.
/// 월이 비어 있는 행은 어느 월에도 속하지 않으므로 제외합니다.
pub fn summarize_by_month<I, E>(income_rows: &[I], expense_rows: &[E]) -> Vec<MonthlySummary>
where
    I: LedgerRow,
    E: LedgerRow,
{
    let mut by_month: BTreeMap<Month, MonthTotals> = BTreeMap::new();
    let mut skipped = 0usize;

    for row in income_rows {
        let Some(month) = row.month() else {
            skipped += 1;
            continue;
        };
        let totals = by_month.entry(month).or_default();
        totals.budgeted_income += row.budgeted();
        totals.actual_income += row.actual();
    }

    for row in expense_rows {
        let Some(month) = row.month() else {
            skipped += 1;
            continue;
        };
        let totals = by_month.entry(month).or_default();
        totals.budgeted_expenses += row.budgeted();
        totals.actual_expenses += row.actual();
    }

    if skipped > 0 {
        debug!(skipped, "월이 없는 원장 행 제외");
    }

    let summaries: Vec<MonthlySummary> = by_month
        .into_iter()
        .map(|(month, t)| {
            MonthlySummary::new(
                month,
                t.budgeted_income,
                t.actual_income,
                t.budgeted_expenses,
                t.actual_expenses,
            )
        })
        .collect();

    cumulative_cash_flow(&summaries)
}

/// 같은 월을 하나로 합치고 달력 순서로 순이익을 누적합니다.
///
/// 입력 순서와 무관하게 같은 결과를 반환합니다.
pub fn cumulative_cash_flow(summaries: &[MonthlySummary]) -> Vec<MonthlySummary> {
    let mut by_month: BTreeMap<Month, MonthTotals> = BTreeMap::new();
    for s in summaries {
        let totals = by_month.entry(s.month).or_default();
        totals.budgeted_income += s.budgeted_income;
        totals.actual_income += s.actual_income;
        totals.budgeted_expenses += s.budgeted_expenses;
        totals.actual_expenses += s.actual_expenses;
    }

    let mut running = Decimal::ZERO;
    by_month
        .into_iter()
        .map(|(month, t)| {
            let mut summary = MonthlySummary::new(
                month,
                t.budgeted_income,
                t.actual_income,
                t.budgeted_expenses,
                t.actual_expenses,
            );
            running += summary.net_income;
            summary.cumulative_net_income = running;
            summary
        })
        .collect()
}

/// 선택한 수입원/카테고리의 행만 남깁니다.
///
/// 선택이 비어 있으면 모든 행을 그대로 반환합니다.
pub fn filter_by<R, S>(rows: &[R], selection: &[S]) -> Vec<R>
where
    R: LedgerRow + Clone,
    S: AsRef<str>,
{
    if selection.is_empty() {
        return rows.to_vec();
    }

    let wanted: HashSet<&str> = selection.iter().map(|s| s.as_ref()).collect();
    rows.iter()
        .filter(|r| wanted.contains(r.label()))
        .cloned()
        .collect()
}

/// 필터 드롭다운용 고유 수입원/카테고리 목록 (처음 나온 순서, 빈 값 제외).
pub fn filter_options<R: LedgerRow>(rows: &[R]) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.iter()
        .map(|r| r.label().trim())
        .filter(|label| !label.is_empty() && seen.insert(*label))
        .map(str::to_string)
        .collect()
}
