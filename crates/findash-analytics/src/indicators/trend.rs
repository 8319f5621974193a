//! 추세 지표 (Trend Indicators).
//!
//! - EMA (Exponential Moving Average)
//! - MACD (Moving Average Convergence Divergence)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// EMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmaParams {
    /// EMA span (α = 2 / (span + 1)).
    pub span: usize,
}

/// MACD 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdParams {
    /// 단기 EMA span (기본: 12).
    pub short_span: usize,
    /// 장기 EMA span (기본: 26).
    pub long_span: usize,
    /// 시그널 라인 span (기본: 9).
    pub signal_span: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            short_span: 12,
            long_span: 26,
            signal_span: 9,
        }
    }
}

/// MACD 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdResult {
    /// MACD 라인 (단기 EMA - 장기 EMA).
    pub macd: Decimal,
    /// 시그널 라인 (MACD의 EMA).
    pub signal: Decimal,
    /// 히스토그램 (MACD - 시그널).
    pub histogram: Decimal,
}

/// 추세 지표 계산기.
#[derive(Debug, Default)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// EMA₀ = P₀
    /// EMAₜ = α × Pₜ + (1 - α) × EMAₜ₋₁ = EMAₜ₋₁ + α × (Pₜ - EMAₜ₋₁), α = 2 / (span + 1)
    ///
    /// 첫 관측값에서 시작하므로 모든 시점에 값이 있습니다.
    pub fn ema(&self, prices: &[Decimal], params: EmaParams) -> IndicatorResult<Vec<Decimal>> {
        if params.span == 0 {
            return Err(IndicatorError::InvalidParameter(
                "EMA span은 0보다 커야 합니다".to_string(),
            ));
        }

        let Some(&first) = prices.first() else {
            return Err(IndicatorError::InsufficientData {
                required: 1,
                provided: 0,
            });
        };

        let alpha = dec!(2) / Decimal::from(params.span + 1);

        let mut result = Vec::with_capacity(prices.len());
        let mut prev = first;
        result.push(prev);
        for &price in &prices[1..] {
            prev += alpha * (price - prev);
            result.push(prev);
        }

        Ok(result)
    }

    /// MACD 계산.
    ///
    /// MACD = EMA(short) - EMA(long)
    /// Signal = EMA(MACD, signal)
    /// Histogram = MACD - Signal
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> IndicatorResult<Vec<MacdResult>> {
        if params.short_span >= params.long_span {
            return Err(IndicatorError::InvalidParameter(format!(
                "단기 span({})은 장기 span({})보다 작아야 합니다",
                params.short_span, params.long_span
            )));
        }

        let short = self.ema(prices, EmaParams { span: params.short_span })?;
        let long = self.ema(prices, EmaParams { span: params.long_span })?;

        let macd_line: Vec<Decimal> = short.iter().zip(&long).map(|(s, l)| s - l).collect();
        let signal = self.ema(&macd_line, EmaParams { span: params.signal_span })?;

        Ok(macd_line
            .into_iter()
            .zip(signal)
            .map(|(macd, signal)| MacdResult {
                macd,
                signal,
                histogram: macd - signal,
            })
            .collect())
    }
}
