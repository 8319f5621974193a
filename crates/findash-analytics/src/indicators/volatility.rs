//! 변동성 지표 (Volatility Indicators).
//!
//! - 연율화 롤링 변동성

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};
use crate::stats::{pct_change, sample_variance};

/// 롤링 변동성 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VolatilityParams {
    /// 롤링 윈도우 (기본: 14).
    pub window: usize,
    /// 연율화에 사용하는 연간 기간 수 (기본: 252 거래일).
    pub periods_per_year: u32,
}

impl Default for VolatilityParams {
    fn default() -> Self {
        Self {
            window: 14,
            periods_per_year: 252,
        }
    }
}

/// 변동성 지표 계산기.
#[derive(Debug, Default)]
pub struct VolatilityIndicators;

impl VolatilityIndicators {
    /// 새로운 변동성 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 연율화 롤링 변동성 계산.
    ///
    /// σ = stdev(최근 window개 수익률, 표본) × √periods_per_year
    ///
    /// # 반환
    /// 입력과 같은 길이, 처음 `window`개는 None
    pub fn rolling_volatility(
        &self,
        prices: &[Decimal],
        params: VolatilityParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let window = params.window;

        // 표본 표준편차는 최소 2개의 수익률이 필요
        if window < 2 {
            return Err(IndicatorError::InvalidParameter(
                "변동성 윈도우는 2 이상이어야 합니다".to_string(),
            ));
        }
        if params.periods_per_year == 0 {
            return Err(IndicatorError::InvalidParameter(
                "연간 기간 수는 0보다 커야 합니다".to_string(),
            ));
        }
        if prices.len() < window + 1 {
            return Err(IndicatorError::InsufficientData {
                required: window + 1,
                provided: prices.len(),
            });
        }

        let returns = pct_change(prices)?;
        let annualizer = Decimal::from(params.periods_per_year);

        let mut result = vec![None; window];
        // returns[k]는 prices[k+1] 시점의 수익률
        for chunk in returns.windows(window) {
            let variance = sample_variance(chunk).ok_or(IndicatorError::InsufficientData {
                required: 2,
                provided: chunk.len(),
            })?;
            let annualized = (variance * annualizer).sqrt().ok_or_else(|| {
                IndicatorError::Undefined("분산의 제곱근을 계산할 수 없습니다".to_string())
            })?;
            result.push(Some(annualized));
        }

        Ok(result)
    }
}
