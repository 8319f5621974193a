//! 수입/지출 원장 표와 월별 보고서.

use anyhow::{anyhow, Result};
use tracing::info;

use findash_analytics::{FilterOptions, LedgerDashboard, MonthlyReport};
use findash_core::{parse_amount, Amount, AmountExt, ExpenseRow, IncomeRow, Month, StorageConfig};
use findash_data::JsonRecordStore;

use super::{to_json, OutputFormat};

/// 원장 행 입력 값.
#[derive(Debug, Clone)]
pub struct LedgerRowArgs {
    pub month: String,
    /// 수입원 또는 지출 카테고리
    pub label: String,
    pub budgeted: String,
    pub actual: String,
}

impl LedgerRowArgs {
    fn parse(&self) -> Result<(Month, String, Amount, Amount)> {
        let month: Month = self.month.parse().map_err(|e: String| anyhow!(e))?;
        let label = self.label.trim();
        if label.is_empty() {
            return Err(anyhow!("수입원/카테고리를 입력하세요"));
        }
        Ok((
            month,
            label.to_string(),
            parse_amount(&self.budgeted)?,
            parse_amount(&self.actual)?,
        ))
    }
}

fn dashboard(storage: &StorageConfig) -> LedgerDashboard<JsonRecordStore> {
    LedgerDashboard::new(JsonRecordStore::new(storage.clone()))
}

/// 수입 행 추가. 추가 후 행 수를 반환합니다.
pub fn add_income(storage: &StorageConfig, args: &LedgerRowArgs) -> Result<usize> {
    let (month, source, budgeted, actual) = args.parse()?;
    let count = dashboard(storage).add_income_row(IncomeRow::new(month, source, budgeted, actual))?;
    info!(rows = count, "수입 행 추가");
    Ok(count)
}

/// 지출 행 추가. 추가 후 행 수를 반환합니다.
pub fn add_expense(storage: &StorageConfig, args: &LedgerRowArgs) -> Result<usize> {
    let (month, category, budgeted, actual) = args.parse()?;
    let count =
        dashboard(storage).add_expense_row(ExpenseRow::new(month, category, budgeted, actual))?;
    info!(rows = count, "지출 행 추가");
    Ok(count)
}

/// 두 원장 표를 모두 비웁니다.
pub fn clear_ledger(storage: &StorageConfig) -> Result<()> {
    dashboard(storage).clear()?;
    Ok(())
}

pub fn filter_options(storage: &StorageConfig) -> Result<FilterOptions> {
    Ok(dashboard(storage).filter_options()?)
}

/// 필터를 적용한 월별 보고서.
pub fn monthly_report(
    storage: &StorageConfig,
    sources: &[String],
    categories: &[String],
) -> Result<MonthlyReport> {
    Ok(dashboard(storage).monthly_report(sources, categories)?)
}

pub fn render_monthly_report(report: &MonthlyReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Table => Ok(monthly_table(report)),
    }
}

fn monthly_table(report: &MonthlyReport) -> String {
    let mut out = String::new();

    if report.summaries.is_empty() {
        out.push_str("월별 데이터가 없습니다.\n");
    } else {
        out.push_str(&format!(
            "{:<10} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
            "Month", "Bud.Inc", "Act.Inc", "Bud.Exp", "Act.Exp", "Net", "Cumulative"
        ));
        out.push_str(&"-".repeat(90));
        out.push('\n');
        for s in &report.summaries {
            out.push_str(&format!(
                "{:<10} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
                s.month.abbreviation(),
                s.budgeted_income.to_currency_string(),
                s.actual_income.to_currency_string(),
                s.budgeted_expenses.to_currency_string(),
                s.actual_expenses.to_currency_string(),
                s.net_income.to_currency_string(),
                s.cumulative_net_income.to_currency_string()
            ));
        }
    }

    out.push('\n');
    out.push_str(&report.metrics.display_lines().join("\n"));
    out
}

/// 필터 선택지 출력 문자열.
pub fn render_filter_options(options: &FilterOptions, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(options),
        OutputFormat::Table => Ok(format!(
            "수입원: {}\n지출 카테고리: {}",
            options.income_sources.join(", "),
            options.expense_categories.join(", ")
        )),
    }
}
