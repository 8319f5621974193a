//! 예산/실적 입력과 대사 보고서.

use anyhow::Result;
use tracing::info;

use findash_analytics::{BudgetDashboard, BudgetReport, SubmitOutcome};
use findash_core::{ActualInput, AmountExt, BudgetInput, StorageConfig};
use findash_data::JsonRecordStore;

use super::{to_json, OutputFormat};

fn dashboard(storage: &StorageConfig) -> BudgetDashboard<JsonRecordStore> {
    BudgetDashboard::new(JsonRecordStore::new(storage.clone()))
}

/// 예산 항목 추가.
pub fn add_budget(storage: &StorageConfig, category: Option<&str>, amount: Option<&str>) -> SubmitOutcome {
    dashboard(storage).submit_budget(BudgetInput::new(category, amount))
}

/// 실적 항목 추가.
pub fn add_actual(
    storage: &StorageConfig,
    category: Option<&str>,
    amount: Option<&str>,
    date: Option<&str>,
) -> SubmitOutcome {
    dashboard(storage).submit_actual(ActualInput::new(category, amount, date))
}

/// 저장된 항목으로 대사 보고서를 만듭니다.
pub fn budget_report(storage: &StorageConfig) -> Result<BudgetReport> {
    let report = dashboard(storage).budget_report()?;
    info!(categories = report.rows.len(), "예산 보고서 생성");
    Ok(report)
}

/// 보고서 출력 문자열.
pub fn render_budget_report(report: &BudgetReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Table => Ok(budget_table(report)),
    }
}

fn budget_table(report: &BudgetReport) -> String {
    if report.rows.is_empty() {
        return "저장된 예산/실적 항목이 없습니다.".to_string();
    }

    let mut out = format!(
        "{:<20} {:>14} {:>14} {:>14}\n",
        "Category", "Budgeted", "Actual", "Variance"
    );
    out.push_str(&"-".repeat(65));
    out.push('\n');

    for row in &report.rows {
        out.push_str(&format!(
            "{:<20} {:>14} {:>14} {:>14}\n",
            row.category,
            row.budgeted_amount.to_currency_string(),
            row.actual_amount.to_currency_string(),
            row.variance.to_currency_string()
        ));
    }

    out.push_str(&"-".repeat(65));
    out.push('\n');
    out.push_str(&format!(
        "{:<20} {:>14} {:>14} {:>14}",
        "Total",
        report.totals.total_budgeted.to_currency_string(),
        report.totals.total_actual.to_currency_string(),
        report.totals.total_variance.to_currency_string()
    ));
    out
}
