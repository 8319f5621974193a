//! Yahoo Finance 일봉 Provider.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use findash_core::{PriceBar, PriceSeries};

use super::{validate_range, MarketDataProvider};
use crate::error::{DataError, Result};

/// 일봉 간격
const DAILY_INTERVAL: &str = "1d";

/// Yahoo Finance 시세 Provider.
pub struct YahooPriceProvider {
    connector: yahoo::YahooConnector,
}

impl YahooPriceProvider {
    /// 새로운 Yahoo Finance Provider 생성.
    pub fn new() -> Result<Self> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| DataError::ConnectionError(format!("Yahoo Finance 연결 실패: {}", e)))?;
        Ok(Self { connector })
    }
}

#[async_trait]
impl MarketDataProvider for YahooPriceProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    async fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries> {
        validate_range(start, end)?;
        let start_dt = naive_date_to_offset_datetime(start)?;
        let end_dt = naive_date_to_offset_datetime(end)?;

        debug!(
            symbol = symbol,
            interval = DAILY_INTERVAL,
            start = %start,
            end = %end,
            "Yahoo Finance API 날짜 범위 호출"
        );

        let response = self
            .connector
            .get_quote_history_interval(symbol, start_dt, end_dt, DAILY_INTERVAL)
            .await
            .map_err(|e| DataError::FetchError(format!("Yahoo Finance API 오류 ({}): {}", symbol, e)))?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::ParseError(format!("Quote 파싱 오류: {}", e)))?;

        let mut bars = Vec::with_capacity(quotes.len());
        for q in &quotes {
            let Some(date) = Utc
                .timestamp_opt(q.timestamp as i64, 0)
                .single()
                .map(|dt| dt.date_naive())
            else {
                warn!(symbol = symbol, timestamp = q.timestamp, "잘못된 타임스탬프, 건너뜀");
                continue;
            };

            // 종가가 없는 봉(NaN)은 지표 계산에 쓸 수 없음
            let Some(close) = price_from_f64(q.close) else {
                warn!(symbol = symbol, date = %date, "종가 변환 실패, 건너뜀");
                continue;
            };

            bars.push(PriceBar {
                date,
                open: price_from_f64(q.open).unwrap_or(close),
                high: price_from_f64(q.high).unwrap_or(close),
                low: price_from_f64(q.low).unwrap_or(close),
                close,
                volume: Decimal::from(q.volume),
            });
        }

        Ok(PriceSeries::new(symbol, bars))
    }
}

/// 시세 가격 소수점 자릿수.
const PRICE_DECIMAL_PLACES: u32 = 4;

/// f64 가격을 Decimal로 변환 후 반올림. NaN/무한대는 None.
fn price_from_f64(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value).map(|d| d.round_dp(PRICE_DECIMAL_PLACES))
}

/// NaiveDate를 OffsetDateTime(UTC 자정)으로 변환.
fn naive_date_to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime> {
    let month = time::Month::try_from(date.month() as u8)
        .map_err(|e| DataError::InvalidData(format!("잘못된 월: {}", e)))?;
    let day = time::Date::from_calendar_date(date.year(), month, date.day() as u8)
        .map_err(|e| DataError::InvalidData(format!("잘못된 날짜 {}: {}", date, e)))?;
    Ok(day.midnight().assume_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_naive_date_conversion() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 8).unwrap();
        let dt = naive_date_to_offset_datetime(date).unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.month(), time::Month::November);
        assert_eq!(dt.day(), 8);
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_price_from_f64_rounded() {
        assert_eq!(price_from_f64(470.12), Some(dec!(470.12)));
        assert_eq!(price_from_f64(1.0 / 3.0), Some(dec!(0.3333)));
        assert!(price_from_f64(470.12).unwrap().scale() <= 4);
        assert_eq!(price_from_f64(f64::NAN), None);
    }
}
