//! 가격 시계열 구조체.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 일봉 (OHLCV).
///
/// 지표 계산에는 종가만 사용합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBar {
    /// 거래일
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl PriceBar {
    /// 종가만 있는 봉을 생성합니다 (나머지 가격은 종가, 거래량 0).
    pub fn from_close(date: NaiveDate, close: Decimal) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: Decimal::ZERO,
        }
    }
}

/// 종목별 가격 시계열 (날짜 오름차순).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// 심볼 (예: "SPY")
    pub symbol: String,
    /// 날짜 오름차순 봉 목록
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// 봉 목록으로 시계열을 생성합니다.
    ///
    /// 날짜순으로 정렬하고 같은 날짜가 여러 번 있으면 마지막 봉만 남깁니다.
    pub fn new(symbol: impl Into<String>, mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        let mut deduped: Vec<PriceBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(last) if last.date == bar.date => *last = bar,
                _ => deduped.push(bar),
            }
        }

        Self {
            symbol: symbol.into(),
            bars: deduped,
        }
    }

    /// (날짜, 종가) 쌍으로 시계열을 생성합니다.
    pub fn from_closes(
        symbol: impl Into<String>,
        closes: impl IntoIterator<Item = (NaiveDate, Decimal)>,
    ) -> Self {
        let bars = closes
            .into_iter()
            .map(|(date, close)| PriceBar::from_close(date, close))
            .collect();
        Self::new(symbol, bars)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 날짜 인덱스.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// 종가 목록.
    pub fn closes(&self) -> Vec<Decimal> {
        self.bars.iter().map(|b| b.close).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_series_sorted_and_deduped() {
        let series = PriceSeries::from_closes(
            "SPY",
            vec![(day(3), dec!(103)), (day(1), dec!(101)), (day(3), dec!(104))],
        );

        assert_eq!(series.dates(), vec![day(1), day(3)]);
        assert_eq!(series.closes(), vec![dec!(101), dec!(104)]);
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::new("QQQ", Vec::new());
        assert!(series.is_empty());
        assert!(series.dates().is_empty());
    }
}
