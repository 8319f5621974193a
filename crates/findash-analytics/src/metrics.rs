//! 재무 지표 요약.
//!
//! 원장 행의 실제 금액으로 총수입, 총지출, 순이익, 저축률, 지출 비율을 계산합니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use findash_core::{Amount, AmountExt, LedgerRow, Percentage};

/// 재무 지표.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    pub total_income: Amount,
    pub total_expenses: Amount,
    /// 총수입 − 총지출
    pub net_income: Amount,
    /// 순이익 / 총수입 × 100 (총수입이 0이면 None)
    pub savings_rate: Option<Percentage>,
    /// 총지출 / 총수입 × 100 (총수입이 0이면 None)
    pub expense_ratio: Option<Percentage>,
}

impl FinancialMetrics {
    /// 수입/지출 행의 실제 금액으로 지표를 계산합니다.
    pub fn from_rows<I, E>(income_rows: &[I], expense_rows: &[E]) -> Self
    where
        I: LedgerRow,
        E: LedgerRow,
    {
        let total_income: Decimal = income_rows.iter().map(|r| r.actual()).sum();
        let total_expenses: Decimal = expense_rows.iter().map(|r| r.actual()).sum();
        Self::from_totals(total_income, total_expenses)
    }

    /// 총수입과 총지출로 지표를 계산합니다.
    pub fn from_totals(total_income: Amount, total_expenses: Amount) -> Self {
        let net_income = total_income - total_expenses;
        let ratio = |numerator: Decimal| {
            if total_income.is_zero() {
                None
            } else {
                Some(numerator / total_income * dec!(100))
            }
        };

        Self {
            total_income,
            total_expenses,
            net_income,
            savings_rate: ratio(net_income),
            expense_ratio: ratio(total_expenses),
        }
    }

    /// 표시용 문자열 목록 (정의되지 않은 비율은 "N/A").
    pub fn display_lines(&self) -> Vec<String> {
        let pct = |v: Option<Percentage>| {
            v.map(|p| p.to_percentage_string())
                .unwrap_or_else(|| "N/A".to_string())
        };

        vec![
            format!("총수입: {}", self.total_income.to_currency_string()),
            format!("총지출: {}", self.total_expenses.to_currency_string()),
            format!("순이익: {}", self.net_income.to_currency_string()),
            format!("저축률: {}", pct(self.savings_rate)),
            format!("지출 비율: {}", pct(self.expense_ratio)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use findash_core::{ExpenseRow, IncomeRow, Month};

    #[test]
    fn test_metrics_from_rows() {
        let income = vec![
            IncomeRow::new(Month::January, "Salary", dec!(3000), dec!(3000)),
            IncomeRow::new(Month::February, "Salary", dec!(3000), dec!(1000)),
        ];
        let expenses = vec![ExpenseRow::new(Month::January, "Rent", dec!(1000), dec!(3000))];

        let m = FinancialMetrics::from_rows(&income, &expenses);
        assert_eq!(m.total_income, dec!(4000));
        assert_eq!(m.total_expenses, dec!(3000));
        assert_eq!(m.net_income, dec!(1000));
        assert_eq!(m.savings_rate, Some(dec!(25)));
        assert_eq!(m.expense_ratio, Some(dec!(75)));
    }

    #[test]
    fn test_rates_undefined_without_income() {
        let m = FinancialMetrics::from_totals(Decimal::ZERO, dec!(500));
        assert_eq!(m.net_income, dec!(-500));
        assert_eq!(m.savings_rate, None);
        assert_eq!(m.expense_ratio, None);
        assert!(m.display_lines()[3].ends_with("N/A"));
    }
}
