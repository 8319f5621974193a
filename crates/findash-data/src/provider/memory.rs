//! 인메모리 시세 Provider.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use findash_core::PriceSeries;

use super::{validate_range, MarketDataProvider};
use crate::error::{DataError, Result};

/// 미리 등록한 시계열을 날짜 범위로 잘라 반환하는 Provider.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceProvider {
    series: HashMap<String, PriceSeries>,
}

impl InMemoryPriceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 시계열 등록 (같은 심볼은 교체).
    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.insert(series);
        self
    }

    pub fn insert(&mut self, series: PriceSeries) {
        self.series.insert(series.symbol.clone(), series);
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryPriceProvider {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries> {
        validate_range(start, end)?;
        let series = self
            .series
            .get(symbol)
            .ok_or_else(|| DataError::FetchError(format!("등록되지 않은 심볼: {}", symbol)))?;

        let bars = series
            .bars
            .iter()
            .filter(|b| b.date >= start && b.date <= end)
            .cloned()
            .collect();

        Ok(PriceSeries::new(symbol, bars))
    }
}
