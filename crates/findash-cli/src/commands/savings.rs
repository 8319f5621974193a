//! 저축/투자 계산기.

use anyhow::Result;
use rust_decimal::Decimal;

use findash_analytics::{investment_projection, required_contribution, ContributionFrequency, ProjectionInput};
use findash_core::{parse_amount, AmountExt};

/// 목표 금액까지 필요한 월 납입액 안내 문구.
pub fn required_message(current: &str, goal: &str, months: u32) -> Result<String> {
    let current = parse_amount(current)?;
    let goal = parse_amount(goal)?;
    let monthly = required_contribution(current, goal, months)?;

    Ok(format!(
        "{}개월 동안 {}에 도달하려면 매월 {}를 저축해야 합니다.",
        months,
        goal.to_currency_string(),
        monthly.to_currency_string()
    ))
}

/// 투자 예측 인자.
#[derive(Debug, Clone)]
pub struct ProjectionArgs {
    pub current: String,
    pub contribution: String,
    pub frequency: String,
    pub months: u32,
    /// 연 수익률 (%)
    pub rate_percent: String,
}

impl ProjectionArgs {
    fn into_input(self) -> Result<ProjectionInput> {
        let frequency: ContributionFrequency = self.frequency.parse()?;
        let rate_percent = parse_amount(&self.rate_percent)?;

        Ok(ProjectionInput {
            current_balance: parse_amount(&self.current)?,
            contribution: parse_amount(&self.contribution)?,
            frequency,
            months: self.months,
            annual_return_rate: rate_percent / Decimal::ONE_HUNDRED,
        })
    }
}

/// 예상 미래 가치 안내 문구.
pub fn projection_message(args: ProjectionArgs) -> Result<String> {
    let input = args.into_input()?;
    let value = investment_projection(&input)?;

    Ok(format!(
        "{}개월 후 예상 투자 가치: {} ({} 납입)",
        input.months,
        value.to_currency_string(),
        input.frequency
    ))
}
