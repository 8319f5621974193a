//! 예산 항목과 실적 항목.
//!
//! 두 레코드 모두 저장 후 변경/삭제되지 않습니다.
//! 같은 카테고리의 항목이 여러 개 있을 수 있으며, 집계 시 합산됩니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{FinanceError, FinanceResult};
use crate::types::{check_amount_range, deserialize_bounded_amount, parse_amount, Amount};

/// 예산 기간.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetPeriod {
    /// 월 단위 예산
    #[default]
    Monthly,
}

/// 예산 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItem {
    /// 카테고리 (대소문자 구분)
    pub category: String,
    /// 예산 금액
    #[serde(deserialize_with = "deserialize_bounded_amount")]
    pub budgeted_amount: Amount,
    /// 예산 기간
    #[serde(default)]
    pub period: BudgetPeriod,
}

impl BudgetItem {
    /// 새 월 예산 항목을 생성합니다.
    ///
    /// 카테고리가 비어 있거나 금액이 범위를 벗어나면 [`FinanceError::Validation`]을 반환합니다.
    pub fn new(category: impl Into<String>, budgeted_amount: Amount) -> FinanceResult<Self> {
        Ok(Self {
            category: require_category(category.into())?,
            budgeted_amount: check_amount_range(budgeted_amount)?,
            period: BudgetPeriod::Monthly,
        })
    }
}

/// 실적(실제 지출) 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualItem {
    /// 카테고리 (대소문자 구분)
    pub category: String,
    /// 실제 금액
    #[serde(deserialize_with = "deserialize_bounded_amount")]
    pub actual_amount: Amount,
    /// 발생일
    pub date: NaiveDate,
}

impl ActualItem {
    /// 새 실적 항목을 생성합니다.
    pub fn new(
        category: impl Into<String>,
        actual_amount: Amount,
        date: NaiveDate,
    ) -> FinanceResult<Self> {
        Ok(Self {
            category: require_category(category.into())?,
            actual_amount: check_amount_range(actual_amount)?,
            date,
        })
    }
}

fn require_category(category: String) -> FinanceResult<String> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(FinanceError::Validation("카테고리를 입력하세요".to_string()));
    }
    Ok(trimmed.to_string())
}

// ==================== 입력 검증 ====================

/// 카테고리 검증 (공백만 있는 값 거부)
fn validate_category(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("category_blank").with_message("카테고리를 입력하세요".into()));
    }
    Ok(())
}

/// 금액 형식/범위 검증
fn validate_amount_text(value: &str) -> Result<(), ValidationError> {
    if let Err(e) = parse_amount(value) {
        return Err(ValidationError::new("amount_invalid").with_message(e.user_message().into()));
    }
    Ok(())
}

/// 날짜 형식 검증 (YYYY-MM-DD)
fn validate_date_format(value: &str) -> Result<(), ValidationError> {
    if NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_err() {
        return Err(ValidationError::new("invalid_date_format")
            .with_message("날짜 형식은 YYYY-MM-DD여야 합니다".into()));
    }
    Ok(())
}

/// 예산 입력 폼 값.
///
/// UI에서 받은 값을 그대로 담고, [`BudgetItem`]으로 변환할 때 검증합니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BudgetInput {
    /// 카테고리
    #[validate(
        required(message = "카테고리를 입력하세요"),
        custom(function = "validate_category")
    )]
    pub category: Option<String>,
    /// 예산 금액 (문자열 그대로)
    #[validate(
        required(message = "예산 금액을 입력하세요"),
        custom(function = "validate_amount_text")
    )]
    pub amount: Option<String>,
}

impl BudgetInput {
    pub fn new(category: Option<&str>, amount: Option<&str>) -> Self {
        Self {
            category: category.map(str::to_string),
            amount: amount.map(str::to_string),
        }
    }
}

impl TryFrom<BudgetInput> for BudgetItem {
    type Error = FinanceError;

    fn try_from(input: BudgetInput) -> Result<Self, Self::Error> {
        input.validate()?;
        let amount = parse_amount(input.amount.as_deref().unwrap_or_default())?;
        BudgetItem::new(input.category.unwrap_or_default(), amount)
    }
}

/// 실적 입력 폼 값.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ActualInput {
    /// 카테고리
    #[validate(
        required(message = "카테고리를 입력하세요"),
        custom(function = "validate_category")
    )]
    pub category: Option<String>,
    /// 실제 금액 (문자열 그대로)
    #[validate(
        required(message = "실제 금액을 입력하세요"),
        custom(function = "validate_amount_text")
    )]
    pub amount: Option<String>,
    /// 발생일 (YYYY-MM-DD)
    #[validate(
        required(message = "날짜를 입력하세요"),
        custom(function = "validate_date_format")
    )]
    pub date: Option<String>,
}

impl ActualInput {
    pub fn new(category: Option<&str>, amount: Option<&str>, date: Option<&str>) -> Self {
        Self {
            category: category.map(str::to_string),
            amount: amount.map(str::to_string),
            date: date.map(str::to_string),
        }
    }
}

impl TryFrom<ActualInput> for ActualItem {
    type Error = FinanceError;

    fn try_from(input: ActualInput) -> Result<Self, Self::Error> {
        input.validate()?;
        let amount = parse_amount(input.amount.as_deref().unwrap_or_default())?;
        let date = NaiveDate::parse_from_str(input.date.as_deref().unwrap_or_default().trim(), "%Y-%m-%d")
            .map_err(|e| FinanceError::Validation(format!("날짜 파싱 실패: {}", e)))?;
        ActualItem::new(input.category.unwrap_or_default(), amount, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_budget_input_valid() {
        let item = BudgetItem::try_from(BudgetInput::new(Some("Rent"), Some("1000"))).unwrap();
        assert_eq!(item.category, "Rent");
        assert_eq!(item.budgeted_amount, dec!(1000));
        assert_eq!(item.period, BudgetPeriod::Monthly);
    }

    #[test]
    fn test_budget_input_missing_fields() {
        let err = BudgetItem::try_from(BudgetInput::new(None, Some("10"))).unwrap_err();
        assert!(matches!(err, FinanceError::Validation(_)));
        assert!(err.user_message().contains("카테고리"));

        let err = BudgetItem::try_from(BudgetInput::new(Some("Food"), None)).unwrap_err();
        assert!(err.user_message().contains("금액"));

        let err = BudgetItem::try_from(BudgetInput::new(Some("   "), Some("10"))).unwrap_err();
        assert!(matches!(err, FinanceError::Validation(_)));
    }

    #[test]
    fn test_budget_input_non_numeric_amount() {
        let err = BudgetItem::try_from(BudgetInput::new(Some("Food"), Some("lots"))).unwrap_err();
        assert!(matches!(err, FinanceError::Validation(_)));
        assert!(err.user_message().contains("숫자"));
    }

    #[test]
    fn test_out_of_range_amount_rejected() {
        let err = BudgetItem::try_from(BudgetInput::new(
            Some("Rent"),
            Some("79228162514264337593543950335"),
        ))
        .unwrap_err();
        assert!(matches!(err, FinanceError::Validation(_)));
        assert!(err.user_message().contains("범위"));

        assert!(BudgetItem::new("Rent", rust_decimal::Decimal::MAX).is_err());
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(ActualItem::new("Rent", rust_decimal::Decimal::MIN, date).is_err());
    }

    #[test]
    fn test_actual_input() {
        let item = ActualItem::try_from(ActualInput::new(
            Some("Rent"),
            Some("950"),
            Some("2024-03-01"),
        ))
        .unwrap();
        assert_eq!(item.actual_amount, dec!(950));
        assert_eq!(item.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        let err =
            ActualItem::try_from(ActualInput::new(Some("Rent"), Some("950"), None)).unwrap_err();
        assert!(err.user_message().contains("날짜"));

        let err = ActualItem::try_from(ActualInput::new(Some("Rent"), Some("950"), Some("03/01/2024")))
            .unwrap_err();
        assert!(err.user_message().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_category_is_trimmed_but_case_kept() {
        let item = BudgetItem::new("  Groceries ", dec!(50)).unwrap();
        assert_eq!(item.category, "Groceries");
        assert_ne!(item.category, "groceries");
    }

    #[test]
    fn test_budget_item_serde_defaults_period() {
        let item: BudgetItem =
            serde_json::from_str(r#"{"category":"Rent","budgeted_amount":"1000"}"#).unwrap();
        assert_eq!(item.period, BudgetPeriod::Monthly);
    }
}
