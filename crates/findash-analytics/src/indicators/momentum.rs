//! 모멘텀 지표 (Momentum Indicators).
//!
//! 가격 모멘텀과 과매수/과매도 상태를 측정합니다.
//! - RSI (Relative Strength Index)

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// RSI 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RsiParams {
    /// 롤링 윈도우 (기본: 14).
    pub window: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { window: 14 }
    }
}

/// 모멘텀 지표 계산기.
#[derive(Debug, Default)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// RSI (Relative Strength Index) 계산.
    ///
    /// RSI = 100 - (100 / (1 + RS))
    /// RS = 평균 상승폭 / 평균 하락폭
    ///
    /// 평균은 최근 `window`개 가격 변화의 단순 평균입니다.
    /// - 하락 평균이 0이고 상승 평균이 양수면 100
    /// - 상승/하락 평균이 모두 0이면 정의되지 않음 (None)
    ///
    /// # 반환
    /// 입력과 같은 길이, 처음 `window`개는 None
    pub fn rsi(&self, prices: &[Decimal], params: RsiParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        let window = params.window;

        if window == 0 {
            return Err(IndicatorError::InvalidParameter(
                "RSI 윈도우는 0보다 커야 합니다".to_string(),
            ));
        }

        if prices.len() < window + 1 {
            return Err(IndicatorError::InsufficientData {
                required: window + 1,
                provided: prices.len(),
            });
        }

        // deltas[i] = prices[i+1] - prices[i]
        let (gains, losses): (Vec<Decimal>, Vec<Decimal>) = prices
            .windows(2)
            .map(|w| {
                let delta = w[1] - w[0];
                if delta > Decimal::ZERO {
                    (delta, Decimal::ZERO)
                } else {
                    (Decimal::ZERO, -delta)
                }
            })
            .unzip();

        let mut result = vec![None; window];
        let mut gain_sum: Decimal = gains[..window].iter().sum();
        let mut loss_sum: Decimal = losses[..window].iter().sum();

        for i in window..prices.len() {
            if i > window {
                // 윈도우 한 칸 이동
                let enter = i - 1;
                let leave = i - 1 - window;
                gain_sum += gains[enter] - gains[leave];
                loss_sum += losses[enter] - losses[leave];
            }
            // 두 평균의 분모가 같으므로 합계의 비율로 RS를 구함
            result.push(rsi_value(gain_sum, loss_sum));
        }

        Ok(result)
    }
}

fn rsi_value(gain: Decimal, loss: Decimal) -> Option<Decimal> {
    if loss.is_zero() {
        if gain.is_zero() {
            return None;
        }
        return Some(dec!(100));
    }
    let rs = gain / loss;
    Some(dec!(100) - (dec!(100) / (Decimal::ONE + rs)))
}
