//! 대시보드 서비스.
//!
//! UI가 호출하는 진입점입니다. 입력 검증은 여기서 끝나며,
//! 검증 실패나 저장소 오류는 사용자 메시지로 바뀌고 아무것도 저장되지 않습니다.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use findash_core::{
    ActualInput, ActualItem, BudgetInput, BudgetItem, ExpenseRow, FinanceError, FinanceResult,
    IncomeRow,
};
use findash_data::{LedgerTableStore, RecordStore};

use crate::aggregation::{filter_by, filter_options, summarize_by_month, MonthlySummary};
use crate::charts::{
    budget_vs_actual_chart, cumulative_cash_flow_chart, monthly_comparison_chart, CategoryPoint,
    Chart,
};
use crate::metrics::FinancialMetrics;
use crate::reconciliation::{reconcile, totals, ReconciledCategory, ReconciliationTotals};

/// 입력 제출 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    /// 저장 여부
    pub saved: bool,
    /// 사용자에게 보여줄 메시지
    pub message: String,
}

impl SubmitOutcome {
    fn saved(message: String) -> Self {
        Self {
            saved: true,
            message,
        }
    }

    fn rejected(err: &FinanceError) -> Self {
        Self {
            saved: false,
            message: err.user_message(),
        }
    }
}

/// 예산 대비 실적 보고서.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetReport {
    pub rows: Vec<ReconciledCategory>,
    pub totals: ReconciliationTotals,
}

/// 예산/실적 입력과 대사 보고서를 다루는 서비스.
pub struct BudgetDashboard<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> BudgetDashboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 예산 입력을 검증하고 저장합니다.
    pub fn submit_budget(&self, input: BudgetInput) -> SubmitOutcome {
        let result = BudgetItem::try_from(input).and_then(|item| {
            self.store.save_budget_item(&item)?;
            Ok(item)
        });

        match result {
            Ok(item) => {
                info!(category = %item.category, "예산 입력 저장");
                SubmitOutcome::saved(format!("'{}' 예산이 저장되었습니다", item.category))
            }
            Err(e) => {
                warn!(error = %e, "예산 입력 거부");
                SubmitOutcome::rejected(&e)
            }
        }
    }

    /// 실적 입력을 검증하고 저장합니다.
    pub fn submit_actual(&self, input: ActualInput) -> SubmitOutcome {
        let result = ActualItem::try_from(input).and_then(|item| {
            self.store.save_actual_item(&item)?;
            Ok(item)
        });

        match result {
            Ok(item) => {
                info!(category = %item.category, date = %item.date, "실적 입력 저장");
                SubmitOutcome::saved(format!("'{}' 실적이 저장되었습니다", item.category))
            }
            Err(e) => {
                warn!(error = %e, "실적 입력 거부");
                SubmitOutcome::rejected(&e)
            }
        }
    }

    /// 저장된 전체 예산/실적을 다시 읽어 대사합니다.
    pub fn budget_report(&self) -> FinanceResult<BudgetReport> {
        let budget = self.store.load_budget_items()?;
        let actuals = self.store.load_actual_items()?;

        let rows = reconcile(&budget, &actuals);
        let totals = totals(&rows);
        Ok(BudgetReport { rows, totals })
    }

    /// 예산 대비 실적 차트. 보고서를 만들 수 없으면 빈 차트를 반환합니다.
    pub fn budget_chart(&self) -> Chart<CategoryPoint> {
        match self.budget_report() {
            Ok(report) => budget_vs_actual_chart(&report.rows),
            Err(e) => {
                warn!(error = %e, "예산 보고서 생성 실패, 빈 차트 반환");
                Chart::empty("Budget vs Actuals")
            }
        }
    }
}

/// 월별 보고서.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub summaries: Vec<MonthlySummary>,
    pub metrics: FinancialMetrics,
}

impl MonthlyReport {
    pub fn comparison_chart(&self) -> Chart<CategoryPoint> {
        monthly_comparison_chart(&self.summaries)
    }

    pub fn cash_flow_chart(&self) -> Chart<CategoryPoint> {
        cumulative_cash_flow_chart(&self.summaries)
    }
}

/// 필터 드롭다운 선택지.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub income_sources: Vec<String>,
    pub expense_categories: Vec<String>,
}

/// 수입/지출 원장 표를 다루는 서비스.
pub struct LedgerDashboard<S: LedgerTableStore> {
    store: S,
}

impl<S: LedgerTableStore> LedgerDashboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 수입 행을 표 끝에 추가합니다.
    pub fn add_income_row(&self, row: IncomeRow) -> FinanceResult<usize> {
        let mut rows = self.store.load_income_rows()?;
        rows.push(row);
        self.store.save_income_rows(&rows)?;
        Ok(rows.len())
    }

    /// 지출 행을 표 끝에 추가합니다.
    pub fn add_expense_row(&self, row: ExpenseRow) -> FinanceResult<usize> {
        let mut rows = self.store.load_expense_rows()?;
        rows.push(row);
        self.store.save_expense_rows(&rows)?;
        Ok(rows.len())
    }

    /// 두 표를 모두 비웁니다.
    pub fn clear(&self) -> FinanceResult<()> {
        self.store.save_income_rows(&[])?;
        self.store.save_expense_rows(&[])?;
        info!("원장 표 초기화");
        Ok(())
    }

    pub fn filter_options(&self) -> FinanceResult<FilterOptions> {
        Ok(FilterOptions {
            income_sources: filter_options(&self.store.load_income_rows()?),
            expense_categories: filter_options(&self.store.load_expense_rows()?),
        })
    }

    /// 선택한 수입원/카테고리로 거른 월별 보고서.
    ///
    /// 재무 지표는 필터와 무관하게 전체 행으로 계산합니다.
    pub fn monthly_report(
        &self,
        sources: &[String],
        categories: &[String],
    ) -> FinanceResult<MonthlyReport> {
        let income = self.store.load_income_rows()?;
        let expenses = self.store.load_expense_rows()?;

        let summaries = summarize_by_month(
            &filter_by(&income, sources),
            &filter_by(&expenses, categories),
        );
        let metrics = FinancialMetrics::from_rows(&income, &expenses);

        Ok(MonthlyReport { summaries, metrics })
    }
}
