//! 수익률 통계 유틸리티.
//!
//! 변동성과 베타 계산에서 공통으로 사용합니다.
//! 분산은 공분산과 같은 코드 경로로 계산하므로 cov(x, x) == var(x)가 정확히 성립합니다.

use rust_decimal::Decimal;

use crate::indicators::{IndicatorError, IndicatorResult};

/// 가격 시계열을 퍼센트 변화율(소수)로 변환.
///
/// # 반환
/// 길이 prices.len() - 1의 수익률 벡터
///
/// 이전 가격이 0이면 수익률이 정의되지 않으므로 오류를 반환합니다.
pub fn pct_change(prices: &[Decimal]) -> IndicatorResult<Vec<Decimal>> {
    prices
        .windows(2)
        .map(|w| {
            if w[0].is_zero() {
                Err(IndicatorError::Undefined(
                    "이전 가격이 0이라 수익률을 계산할 수 없습니다".to_string(),
                ))
            } else {
                Ok((w[1] - w[0]) / w[0])
            }
        })
        .collect()
}

/// 산술 평균. 빈 입력이면 None.
fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<Decimal>() / Decimal::from(values.len()))
}

/// 표본 공분산 (n - 1 분모).
///
/// 길이가 다르거나 2개 미만이면 None.
pub fn sample_covariance(x: &[Decimal], y: &[Decimal]) -> Option<Decimal> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let mean_x = mean(x)?;
    let mean_y = mean(y)?;

    let sum: Decimal = x
        .iter()
        .zip(y)
        .map(|(a, b)| (*a - mean_x) * (*b - mean_y))
        .sum();

    Some(sum / Decimal::from(x.len() - 1))
}

/// 표본 분산 (n - 1 분모).
pub fn sample_variance(values: &[Decimal]) -> Option<Decimal> {
    sample_covariance(values, values)
}
