//! 수입/지출 원장 행 (표 편집기 모델).
//!
//! 행은 빈 상태로 만들어진 뒤 UI에서 값이 채워집니다.
//! 차이(variance)는 저장하지 않고 항상 금액에서 다시 계산합니다:
//! - 수입: 실제 − 예산 (실제가 많으면 유리)
//! - 지출: 예산 − 실제 (실제가 적으면 유리)

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{deserialize_lenient_amount, Amount, Month};

/// 원장 행 공통 인터페이스.
///
/// 월별 집계와 필터는 이 트레이트만 사용합니다.
pub trait LedgerRow {
    /// 행의 월 (미입력이면 None)
    fn month(&self) -> Option<Month>;

    /// 수입원 또는 지출 카테고리
    fn label(&self) -> &str;

    /// 예산 금액
    fn budgeted(&self) -> Amount;

    /// 실제 금액
    fn actual(&self) -> Amount;

    /// 부호 규칙이 적용된 차이
    fn variance(&self) -> Amount;
}

/// 수입 행.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeRow {
    /// 월
    #[serde(default, deserialize_with = "deserialize_lenient_month")]
    pub month: Option<Month>,
    /// 수입원
    #[serde(default)]
    pub source: String,
    /// 예산 금액
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub budgeted_amount: Amount,
    /// 실제 금액
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub actual_amount: Amount,
}

impl IncomeRow {
    pub fn new(month: Month, source: impl Into<String>, budgeted: Amount, actual: Amount) -> Self {
        Self {
            month: Some(month),
            source: source.into(),
            budgeted_amount: budgeted,
            actual_amount: actual,
        }
    }

    /// 표에 추가되는 빈 행.
    pub fn blank() -> Self {
        Self::default()
    }
}

impl LedgerRow for IncomeRow {
    fn month(&self) -> Option<Month> {
        self.month
    }

    fn label(&self) -> &str {
        &self.source
    }

    fn budgeted(&self) -> Amount {
        self.budgeted_amount
    }

    fn actual(&self) -> Amount {
        self.actual_amount
    }

    fn variance(&self) -> Amount {
        self.actual_amount - self.budgeted_amount
    }
}

/// 지출 행.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRow {
    /// 월
    #[serde(default, deserialize_with = "deserialize_lenient_month")]
    pub month: Option<Month>,
    /// 지출 카테고리
    #[serde(default)]
    pub category: String,
    /// 예산 금액
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub budgeted_amount: Amount,
    /// 실제 금액
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub actual_amount: Amount,
}

impl ExpenseRow {
    pub fn new(
        month: Month,
        category: impl Into<String>,
        budgeted: Amount,
        actual: Amount,
    ) -> Self {
        Self {
            month: Some(month),
            category: category.into(),
            budgeted_amount: budgeted,
            actual_amount: actual,
        }
    }

    /// 표에 추가되는 빈 행.
    pub fn blank() -> Self {
        Self::default()
    }
}

impl LedgerRow for ExpenseRow {
    fn month(&self) -> Option<Month> {
        self.month
    }

    fn label(&self) -> &str {
        &self.category
    }

    fn budgeted(&self) -> Amount {
        self.budgeted_amount
    }

    fn actual(&self) -> Amount {
        self.actual_amount
    }

    fn variance(&self) -> Amount {
        self.budgeted_amount - self.actual_amount
    }
}

/// 빈 문자열이나 알 수 없는 월 이름은 None으로 읽습니다.
fn deserialize_lenient_month<'de, D>(deserializer: D) -> Result<Option<Month>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => s.parse().ok(),
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .and_then(Month::from_number),
        _ => None,
    })
}

/// 행 목록의 차이 합계.
pub fn total_variance<R: LedgerRow>(rows: &[R]) -> Amount {
    rows.iter().map(|r| r.variance()).sum::<Decimal>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_income_variance_sign() {
        let row = IncomeRow::new(Month::January, "Salary", dec!(5000), dec!(5200));
        assert_eq!(row.variance(), dec!(200));
    }

    #[test]
    fn test_expense_variance_sign() {
        let row = ExpenseRow::new(Month::January, "Rent", dec!(1000), dec!(950));
        assert_eq!(row.variance(), dec!(50));
    }

    #[test]
    fn test_variance_follows_edits() {
        let mut row = ExpenseRow::blank();
        assert_eq!(row.variance(), Decimal::ZERO);

        row.budgeted_amount = dec!(300);
        row.actual_amount = dec!(420);
        assert_eq!(row.variance(), dec!(-120));
    }

    #[test]
    fn test_blank_table_row_from_json() {
        let json = r#"{"month": "", "source": "", "budgeted_amount": "", "actual_amount": "", "variance": ""}"#;
        let row: IncomeRow = serde_json::from_str(json).unwrap();
        assert_eq!(row, IncomeRow::blank());
    }

    #[test]
    fn test_row_from_json_with_mixed_cells() {
        let json = r#"{"month": "March", "category": "Food", "budgeted_amount": 400, "actual_amount": "385.5"}"#;
        let row: ExpenseRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.month, Some(Month::March));
        assert_eq!(row.budgeted_amount, dec!(400));
        assert_eq!(row.actual_amount, dec!(385.5));
    }

    #[test]
    fn test_total_variance() {
        let rows = vec![
            ExpenseRow::new(Month::January, "Rent", dec!(1000), dec!(950)),
            ExpenseRow::new(Month::February, "Rent", dec!(1000), dec!(1100)),
        ];
        assert_eq!(total_variance(&rows), dec!(-50));
    }
}
