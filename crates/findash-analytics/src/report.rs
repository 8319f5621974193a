//! 종목별 지표 보고서.
//!
//! 시세 Provider에서 종가를 가져와 종목마다 RSI, MACD, 변동성 시계열과
//! 기준 종목 대비 일간/월간 베타를 계산합니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use findash_core::{FinanceError, FinanceResult, IndicatorConfig, MarketDataConfig, PriceSeries};
use findash_data::MarketDataProvider;

use crate::beta::{beta_between, Granularity};
use crate::indicators::{
    IndicatorEngine, IndicatorError, IndicatorResult, IndicatorSeries, MacdParams, RsiParams,
    VolatilityParams,
};

/// 조회 대상과 기간.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorRequest {
    pub symbols: Vec<String>,
    /// 베타 기준 종목
    pub benchmark: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl IndicatorRequest {
    /// 조회할 심볼 목록 (기준 종목 포함, 중복 제거).
    pub fn fetch_symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = Vec::with_capacity(self.symbols.len() + 1);
        for symbol in self.symbols.iter().chain(std::iter::once(&self.benchmark)) {
            if !symbols.contains(symbol) {
                symbols.push(symbol.clone());
            }
        }
        symbols
    }
}

impl TryFrom<&MarketDataConfig> for IndicatorRequest {
    type Error = FinanceError;

    fn try_from(config: &MarketDataConfig) -> Result<Self, Self::Error> {
        let parse = |field: &str, value: &str| {
            NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .map_err(|e| FinanceError::Config(format!("market_data.{} 형식 오류 ({}): {}", field, value, e)))
        };

        Ok(Self {
            symbols: config.symbols.clone(),
            benchmark: config.benchmark.clone(),
            start: parse("start_date", &config.start_date)?,
            end: parse("end_date", &config.end_date)?,
        })
    }
}

/// 지표 파라미터 묶음.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IndicatorSettings {
    pub rsi: RsiParams,
    pub macd: MacdParams,
    pub volatility: VolatilityParams,
}

impl From<&IndicatorConfig> for IndicatorSettings {
    fn from(config: &IndicatorConfig) -> Self {
        Self {
            rsi: config.into(),
            macd: config.into(),
            volatility: config.into(),
        }
    }
}

/// 한 종목의 지표 보고서.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentReport {
    pub symbol: String,
    pub rsi: IndicatorSeries,
    pub macd: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
    pub volatility: IndicatorSeries,
    /// 기준 종목 대비 일간 베타 (정의되지 않으면 None)
    pub daily_beta: Option<Decimal>,
    /// 기준 종목 대비 월간 베타 (정의되지 않으면 None)
    pub monthly_beta: Option<Decimal>,
}

/// 한 종목의 지표를 계산합니다.
pub fn instrument_report(
    engine: &IndicatorEngine,
    series: &PriceSeries,
    benchmark: &PriceSeries,
    settings: &IndicatorSettings,
) -> IndicatorResult<InstrumentReport> {
    let span = findash_core::ledger_span!("instrument_report", series.symbol, series.len());
    let _enter = span.enter();

    let rsi = engine.rsi_series(series, settings.rsi)?;
    let (macd, signal, histogram) = engine.macd_series(series, settings.macd)?;
    let volatility = engine.volatility_series(series, settings.volatility)?;

    Ok(InstrumentReport {
        symbol: series.symbol.clone(),
        rsi,
        macd,
        signal,
        histogram,
        volatility,
        daily_beta: optional_beta(series, benchmark, Granularity::Daily)?,
        monthly_beta: optional_beta(series, benchmark, Granularity::Monthly)?,
    })
}

/// 정의되지 않는 베타는 None으로, 그 외 오류는 그대로 전달합니다.
fn optional_beta(
    series: &PriceSeries,
    benchmark: &PriceSeries,
    granularity: Granularity,
) -> IndicatorResult<Option<Decimal>> {
    match beta_between(series, benchmark, granularity) {
        Ok(beta) => Ok(Some(beta)),
        Err(IndicatorError::Undefined(reason)) => {
            warn!(symbol = %series.symbol, granularity = ?granularity, reason = %reason, "베타 정의되지 않음");
            Ok(None)
        }
        // 기간이 짧으면 공통 날짜/월 수가 부족할 수 있음
        Err(IndicatorError::InsufficientData { required, provided }) => {
            warn!(symbol = %series.symbol, granularity = ?granularity, required, provided, "베타 계산에 필요한 수익률 부족");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// 시세를 조회해 요청한 모든 종목의 보고서를 만듭니다.
///
/// 보고서 순서는 요청한 심볼 순서를 따릅니다.
pub async fn build_reports<P>(
    provider: &P,
    request: &IndicatorRequest,
    settings: &IndicatorSettings,
) -> FinanceResult<Vec<InstrumentReport>>
where
    P: MarketDataProvider + ?Sized,
{
    let prices = provider
        .fetch_prices(&request.fetch_symbols(), request.start, request.end)
        .await?;

    let benchmark = prices.get(&request.benchmark).ok_or_else(|| {
        FinanceError::NotFound(format!("기준 종목 시세 없음: {}", request.benchmark))
    })?;

    let engine = IndicatorEngine::new();
    let mut reports = Vec::with_capacity(request.symbols.len());
    for symbol in &request.symbols {
        let series = prices
            .get(symbol)
            .ok_or_else(|| FinanceError::NotFound(format!("시세 없음: {}", symbol)))?;
        reports.push(instrument_report(&engine, series, benchmark, settings)?);
    }

    info!(
        provider = provider.name(),
        instruments = reports.len(),
        benchmark = %request.benchmark,
        "지표 보고서 생성"
    );

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_config() {
        let request = IndicatorRequest::try_from(&MarketDataConfig::default()).unwrap();
        assert_eq!(request.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(request.end, NaiveDate::from_ymd_opt(2024, 11, 8).unwrap());
        assert_eq!(request.fetch_symbols(), vec!["SPY", "QQQ"]);
    }

    #[test]
    fn test_request_bad_date() {
        let config = MarketDataConfig {
            start_date: "2024/01/01".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            IndicatorRequest::try_from(&config),
            Err(FinanceError::Config(_))
        ));
    }

    #[test]
    fn test_single_bar_report_is_undefined() {
        let series = PriceSeries::from_closes(
            "SPY",
            [(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), Decimal::from(470))],
        );
        let report =
            instrument_report(&IndicatorEngine::new(), &series, &series, &IndicatorSettings::default())
                .unwrap();

        assert_eq!(report.rsi.len(), 1);
        assert_eq!(report.rsi.latest(), None);
        assert_eq!(report.volatility.latest(), None);
        assert_eq!(report.daily_beta, None);
        assert_eq!(report.monthly_beta, None);
    }

    #[test]
    fn test_benchmark_appended_once() {
        let request = IndicatorRequest {
            symbols: vec!["AAPL".to_string()],
            benchmark: "SPY".to_string(),
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        };
        assert_eq!(request.fetch_symbols(), vec!["AAPL", "SPY"]);
    }
}
