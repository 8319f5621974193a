//! 기술적 지표 모듈.
//!
//! 종가 시계열에서 시장 지표를 계산합니다.
//! 모든 함수는 입력 슬라이스만 읽는 순수 함수이며,
//! 결과 벡터는 입력과 같은 길이로 웜업 구간을 `None`으로 채웁니다.
//!
//! # 지원 지표
//!
//! ## 추세 지표 (Trend Indicators)
//! - **EMA**: 지수 이동평균 (첫 관측값에서 시작하는 재귀식)
//! - **MACD**: 이동평균 수렴/확산 + 시그널 라인
//!
//! ## 모멘텀 지표 (Momentum Indicators)
//! - **RSI**: 상대강도지수 (단순 롤링 평균 방식)
//!
//! ## 변동성 지표 (Volatility Indicators)
//! - **Rolling Volatility**: 수익률 표본 표준편차의 연율화 값
//!
//! # 사용 예시
//!
//! ```ignore
//! use findash_analytics::indicators::{IndicatorEngine, RsiParams, MacdParams};
//!
//! let engine = IndicatorEngine::new();
//!
//! let rsi = engine.rsi(&closes, RsiParams { window: 14 })?;
//! let macd = engine.macd(&closes, MacdParams::default())?;
//! ```

pub mod momentum;
pub mod trend;
pub mod volatility;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use findash_core::{FinanceError, IndicatorConfig, PriceSeries};

pub use momentum::{MomentumCalculator, RsiParams};
pub use trend::{EmaParams, MacdParams, MacdResult, TrendIndicators};
pub use volatility::{VolatilityIndicators, VolatilityParams};

/// 지표 계산 오류.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// 데이터 부족 오류
    #[error("데이터가 부족합니다: 필요 {required}개, 제공 {provided}개")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),

    /// 수학적으로 정의되지 않는 결과 (예: 시장 분산 0)
    #[error("정의되지 않은 결과: {0}")]
    Undefined(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

impl From<IndicatorError> for FinanceError {
    fn from(err: IndicatorError) -> Self {
        match err {
            IndicatorError::Undefined(msg) => FinanceError::ComputationUndefined(msg),
            other => FinanceError::InvalidInput(other.to_string()),
        }
    }
}

/// 날짜 인덱스가 붙은 지표 값.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    /// 웜업 구간이거나 정의되지 않으면 None
    pub value: Option<Decimal>,
}

/// 원본 가격 시계열과 같은 날짜 인덱스를 공유하는 지표 시계열.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    /// 지표 이름 (예: "RSI", "MACD")
    pub name: String,
    pub points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// 날짜 인덱스와 값 벡터를 묶습니다.
    ///
    /// 길이가 다르면 짧은 쪽에 맞춥니다.
    pub fn from_values(
        name: impl Into<String>,
        dates: &[NaiveDate],
        values: &[Option<Decimal>],
    ) -> Self {
        Self {
            name: name.into(),
            points: dates
                .iter()
                .zip(values)
                .map(|(&date, &value)| IndicatorPoint { date, value })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 정의된 값만 (날짜, 값) 쌍으로 반환합니다.
    pub fn defined(&self) -> impl Iterator<Item = (NaiveDate, Decimal)> + '_ {
        self.points
            .iter()
            .filter_map(|p| p.value.map(|v| (p.date, v)))
    }

    /// 가장 최근의 정의된 값.
    pub fn latest(&self) -> Option<Decimal> {
        self.points.iter().rev().find_map(|p| p.value)
    }
}

/// 통합 지표 엔진.
///
/// 설정에서 읽은 파라미터를 보관하고 각 계산기에 위임합니다.
#[derive(Debug, Default)]
pub struct IndicatorEngine {
    trend: TrendIndicators,
    momentum: MomentumCalculator,
    volatility: VolatilityIndicators,
}

impl IndicatorEngine {
    /// 새로운 지표 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== 추세 지표 ====================

    /// 지수 이동평균 (EMA) 계산.
    pub fn ema(&self, prices: &[Decimal], params: EmaParams) -> IndicatorResult<Vec<Decimal>> {
        self.trend.ema(prices, params)
    }

    /// MACD 계산.
    ///
    /// # 반환
    /// 각 시점의 MACD 라인, 시그널 라인, 히스토그램
    pub fn macd(&self, prices: &[Decimal], params: MacdParams) -> IndicatorResult<Vec<MacdResult>> {
        self.trend.macd(prices, params)
    }

    // ==================== 모멘텀 지표 ====================

    /// RSI (Relative Strength Index) 계산.
    ///
    /// # 반환
    /// 0-100 사이의 RSI 값들 (처음 window개는 None)
    pub fn rsi(&self, prices: &[Decimal], params: RsiParams) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.momentum.rsi(prices, params)
    }

    // ==================== 변동성 지표 ====================

    /// 연율화 롤링 변동성 계산.
    pub fn volatility(
        &self,
        prices: &[Decimal],
        params: VolatilityParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        self.volatility.rolling_volatility(prices, params)
    }

    // ==================== 시계열 단위 ====================

    /// 가격 시계열의 RSI 지표 시계열.
    ///
    /// 윈도우보다 짧은 시계열은 모든 값이 None인 같은 길이의 시계열이 됩니다.
    pub fn rsi_series(&self, series: &PriceSeries, params: RsiParams) -> IndicatorResult<IndicatorSeries> {
        let values = undefined_when_short(self.rsi(&series.closes(), params), series)?;
        Ok(IndicatorSeries::from_values("RSI", &series.dates(), &values))
    }

    /// 가격 시계열의 MACD, 시그널, 히스토그램 지표 시계열.
    pub fn macd_series(
        &self,
        series: &PriceSeries,
        params: MacdParams,
    ) -> IndicatorResult<(IndicatorSeries, IndicatorSeries, IndicatorSeries)> {
        let dates = series.dates();
        if series.is_empty() {
            return Ok((
                IndicatorSeries::from_values("MACD", &dates, &[]),
                IndicatorSeries::from_values("Signal", &dates, &[]),
                IndicatorSeries::from_values("Histogram", &dates, &[]),
            ));
        }
        let results = self.macd(&series.closes(), params)?;

        let macd: Vec<Option<Decimal>> = results.iter().map(|r| Some(r.macd)).collect();
        let signal: Vec<Option<Decimal>> = results.iter().map(|r| Some(r.signal)).collect();
        let histogram: Vec<Option<Decimal>> = results.iter().map(|r| Some(r.histogram)).collect();

        Ok((
            IndicatorSeries::from_values("MACD", &dates, &macd),
            IndicatorSeries::from_values("Signal", &dates, &signal),
            IndicatorSeries::from_values("Histogram", &dates, &histogram),
        ))
    }

    /// 가격 시계열의 변동성 지표 시계열.
    pub fn volatility_series(
        &self,
        series: &PriceSeries,
        params: VolatilityParams,
    ) -> IndicatorResult<IndicatorSeries> {
        let values = undefined_when_short(self.volatility(&series.closes(), params), series)?;
        Ok(IndicatorSeries::from_values("Volatility", &series.dates(), &values))
    }
}

/// 데이터 부족은 전 구간 None으로, 그 외 오류는 그대로 전달합니다.
fn undefined_when_short(
    result: IndicatorResult<Vec<Option<Decimal>>>,
    series: &PriceSeries,
) -> IndicatorResult<Vec<Option<Decimal>>> {
    match result {
        Err(IndicatorError::InsufficientData { required, provided }) => {
            debug!(symbol = %series.symbol, required, provided, "윈도우보다 짧은 시계열");
            Ok(vec![None; series.len()])
        }
        other => other,
    }
}

// ==================== 설정 변환 ====================

impl From<&IndicatorConfig> for RsiParams {
    fn from(config: &IndicatorConfig) -> Self {
        Self {
            window: config.rsi_window,
        }
    }
}

impl From<&IndicatorConfig> for MacdParams {
    fn from(config: &IndicatorConfig) -> Self {
        Self {
            short_span: config.macd_short,
            long_span: config.macd_long,
            signal_span: config.macd_signal,
        }
    }
}

impl From<&IndicatorConfig> for VolatilityParams {
    fn from(config: &IndicatorConfig) -> Self {
        Self {
            window: config.volatility_window,
            periods_per_year: config.trading_days_per_year,
        }
    }
}
