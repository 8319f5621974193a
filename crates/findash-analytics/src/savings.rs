//! 저축 목표 및 투자 예측 계산기.
//!
//! - 목표 금액에 도달하기 위한 월 납입액
//! - 정기 납입 + 복리 수익률을 가정한 미래 가치

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use tracing::debug;

use findash_core::{Amount, FinanceError, FinanceResult};

/// 납입 주기.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionFrequency {
    #[default]
    Monthly,
    Weekly,
}

impl ContributionFrequency {
    /// 연간 납입 횟수.
    pub fn periods_per_year(self) -> u32 {
        match self {
            ContributionFrequency::Monthly => 12,
            ContributionFrequency::Weekly => 52,
        }
    }
}

impl fmt::Display for ContributionFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContributionFrequency::Monthly => write!(f, "monthly"),
            ContributionFrequency::Weekly => write!(f, "weekly"),
        }
    }
}

impl FromStr for ContributionFrequency {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(ContributionFrequency::Monthly),
            "weekly" => Ok(ContributionFrequency::Weekly),
            other => Err(FinanceError::Validation(format!(
                "납입 주기는 monthly 또는 weekly여야 합니다: {}",
                other
            ))),
        }
    }
}

/// 투자 예측 입력.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// 현재 잔액
    pub current_balance: Amount,
    /// 회당 납입액
    pub contribution: Amount,
    pub frequency: ContributionFrequency,
    /// 기간 (개월)
    pub months: u32,
    /// 연 수익률 (소수, 예: 0.05 = 5%)
    pub annual_return_rate: Decimal,
}

/// 목표 금액까지 필요한 월 납입액.
///
/// (목표 − 현재) / 개월 수
pub fn required_contribution(current_balance: Amount, goal: Amount, months: u32) -> FinanceResult<Amount> {
    ensure_non_negative("현재 잔액", current_balance)?;
    ensure_non_negative("목표 금액", goal)?;
    ensure_positive_months(months)?;

    Ok((goal - current_balance) / Decimal::from(months))
}

/// 정기 납입과 복리를 가정한 미래 가치.
///
/// r = 연 수익률 / 연간 납입 횟수, n = 개월 수 × 연간 납입 횟수 / 12
///
/// FV = 현재 × (1 + r)ⁿ + 납입액 × ((1 + r)ⁿ − 1) / r
///
/// 수익률이 0이면 FV = 현재 + 납입액 × n
pub fn investment_projection(input: &ProjectionInput) -> FinanceResult<Amount> {
    ensure_non_negative("현재 잔액", input.current_balance)?;
    ensure_non_negative("납입액", input.contribution)?;
    ensure_non_negative("연 수익률", input.annual_return_rate)?;
    ensure_positive_months(input.months)?;

    let periods_per_year = Decimal::from(input.frequency.periods_per_year());
    let rate = input.annual_return_rate / periods_per_year;
    let periods = Decimal::from(input.months) * periods_per_year / Decimal::from(12);

    debug!(
        frequency = %input.frequency,
        months = input.months,
        periods = %periods,
        rate = %rate,
        "투자 예측 계산"
    );

    if rate.is_zero() {
        return Ok(input.current_balance + input.contribution * periods);
    }

    let growth = (Decimal::ONE + rate).checked_powd(periods).ok_or_else(|| {
        FinanceError::InvalidInput("복리 계산 중 오버플로가 발생했습니다".to_string())
    })?;

    Ok(input.current_balance * growth + input.contribution * (growth - Decimal::ONE) / rate)
}

fn ensure_non_negative(field: &str, value: Decimal) -> FinanceResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(FinanceError::Validation(format!("{}은(는) 음수일 수 없습니다", field)));
    }
    Ok(())
}

fn ensure_positive_months(months: u32) -> FinanceResult<()> {
    if months == 0 {
        return Err(FinanceError::Validation("기간은 1개월 이상이어야 합니다".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(rate: Decimal, frequency: ContributionFrequency) -> ProjectionInput {
        ProjectionInput {
            current_balance: dec!(1000),
            contribution: dec!(100),
            frequency,
            months: 12,
            annual_return_rate: rate,
        }
    }

    #[test]
    fn test_required_contribution() {
        assert_eq!(required_contribution(dec!(1000), dec!(7000), 12).unwrap(), dec!(500));
    }

    #[test]
    fn test_required_contribution_zero_months() {
        assert!(matches!(
            required_contribution(dec!(0), dec!(100), 0),
            Err(FinanceError::Validation(_))
        ));
    }

    #[test]
    fn test_projection_zero_rate() {
        let monthly = investment_projection(&input(dec!(0), ContributionFrequency::Monthly)).unwrap();
        assert_eq!(monthly, dec!(2200));

        let weekly = investment_projection(&input(dec!(0), ContributionFrequency::Weekly)).unwrap();
        assert_eq!(weekly, dec!(6200));
    }

    #[test]
    fn test_projection_with_rate() {
        // 연 12%, 월 납입 → r = 0.01, n = 12
        let fv = investment_projection(&input(dec!(0.12), ContributionFrequency::Monthly)).unwrap();
        // 1000 × 1.01¹² + 100 × (1.01¹² − 1) / 0.01 ≈ 1126.83 + 1268.25
        assert!((fv - dec!(2395.08)).abs() < dec!(0.01));
    }

    #[test]
    fn test_projection_negative_input_rejected() {
        let mut bad = input(dec!(0.05), ContributionFrequency::Monthly);
        bad.contribution = dec!(-1);
        assert!(matches!(investment_projection(&bad), Err(FinanceError::Validation(_))));
    }

    #[test]
    fn test_frequency_from_str() {
        assert_eq!("Weekly".parse::<ContributionFrequency>().unwrap(), ContributionFrequency::Weekly);
        assert!("daily".parse::<ContributionFrequency>().is_err());
    }
}
