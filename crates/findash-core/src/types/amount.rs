//! 금액 계산을 위한 Decimal 유틸리티.
//!
//! 예산/실적 금액은 모두 `Decimal`로 다룹니다.
//! 입력 경로는 두 가지입니다:
//! - [`parse_amount`]: 폼 입력처럼 금액이 반드시 필요한 경우 (엄격)
//! - [`coerce_amount`]: 표 편집기 셀처럼 빈 값/문자가 섞일 수 있는 경우 (관대, 0으로 치환)

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::error::{FinanceError, FinanceResult};

/// 금액 타입.
pub type Amount = Decimal;

/// 퍼센트 타입 (5.25 = 5.25%).
pub type Percentage = Decimal;

/// 허용되는 금액 절댓값 상한 (10^15).
///
/// 이 범위 안의 금액은 합산해도 `Decimal` 범위를 넘지 않습니다.
pub const MAX_AMOUNT: Amount = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// 금액이 ±[`MAX_AMOUNT`] 안에 있는지 확인합니다.
pub fn check_amount_range(amount: Amount) -> FinanceResult<Amount> {
    if amount.abs() > MAX_AMOUNT {
        return Err(FinanceError::Validation(format!(
            "금액이 허용 범위(±{})를 벗어났습니다",
            MAX_AMOUNT
        )));
    }
    Ok(amount)
}

/// 금액 문자열을 엄격하게 파싱합니다.
///
/// 통화 기호(`$`)와 천 단위 구분자(`,`)는 허용합니다.
/// 비어 있거나 숫자가 아니거나 범위를 벗어나면 [`FinanceError::Validation`]을 반환합니다.
pub fn parse_amount(raw: &str) -> FinanceResult<Amount> {
    let cleaned = normalize(raw);
    if cleaned.is_empty() {
        return Err(FinanceError::Validation("금액을 입력하세요".to_string()));
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| FinanceError::Validation(format!("숫자가 아닌 금액입니다: {}", raw.trim())))
        .and_then(check_amount_range)
}

/// 금액 문자열을 관대하게 변환합니다.
///
/// 비어 있거나 숫자가 아니거나 범위를 벗어난 값은 0이 됩니다. 실패하지 않습니다.
pub fn coerce_amount(raw: &str) -> Amount {
    parse_amount(raw).unwrap_or(Decimal::ZERO)
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$' && !c.is_whitespace())
        .collect()
}

/// 표 편집기 셀 값 (숫자, 문자열, null 모두 가능).
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientCell {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

/// serde 필드용 관대한 금액 역직렬화.
///
/// `#[serde(default, deserialize_with = "deserialize_lenient_amount")]`로 사용합니다.
/// 빈 문자열, null, 숫자가 아닌 문자열은 모두 0이 됩니다.
pub fn deserialize_lenient_amount<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match LenientCell::deserialize(deserializer)? {
        LenientCell::Number(n) => coerce_json_number(&n),
        LenientCell::Text(s) => coerce_amount(&s),
        LenientCell::Other(_) => Decimal::ZERO,
    };
    Ok(check_amount_range(amount).unwrap_or(Decimal::ZERO))
}

/// serde 필드용 범위 검사 금액 역직렬화.
///
/// 범위를 벗어난 금액은 역직렬화 오류가 됩니다.
pub fn deserialize_bounded_amount<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
    check_amount_range(amount).map_err(serde::de::Error::custom)
}

fn coerce_json_number(n: &serde_json::Number) -> Amount {
    if let Some(i) = n.as_i64() {
        return Decimal::from(i);
    }
    if let Some(u) = n.as_u64() {
        return Decimal::from(u);
    }
    // 정밀도 손실을 피하려고 문자열 표현을 우선 사용
    Decimal::from_str(&n.to_string())
        .ok()
        .or_else(|| n.as_f64().and_then(Decimal::from_f64))
        .unwrap_or(Decimal::ZERO)
}

/// 금액 관련 확장 트레이트.
pub trait AmountExt {
    /// 퍼센트 문자열로 변환합니다 (예: 5.25 → "5.25%").
    fn to_percentage_string(&self) -> String;

    /// 통화 표시 문자열로 변환합니다 (예: -1234.5 → "-$1234.50").
    fn to_currency_string(&self) -> String;
}

impl AmountExt for Decimal {
    fn to_percentage_string(&self) -> String {
        format!("{:.2}%", self.round_dp(2))
    }

    fn to_currency_string(&self) -> String {
        let rounded = self.round_dp(2);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-${:.2}", rounded.abs())
        } else {
            format!("${:.2}", rounded.abs())
        }
    }
}
