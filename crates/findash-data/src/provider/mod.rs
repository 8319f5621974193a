//! 시세 데이터 Provider 모듈.
//!
//! 종목별 일봉 시계열을 날짜 범위로 가져옵니다.
//! 지표 계산에는 종가만 사용하며, 캐싱이나 중복 제거는 하지 않습니다.
//!
//! ## Provider
//! - `YahooPriceProvider`: Yahoo Finance 일봉 조회
//! - `InMemoryPriceProvider`: 미리 등록된 시계열 반환 (테스트, 오프라인)

pub mod memory;
pub mod yahoo;

pub use memory::InMemoryPriceProvider;
pub use yahoo::YahooPriceProvider;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::try_join_all;
use tracing::info;

use findash_core::PriceSeries;

use crate::error::{DataError, Result};

/// 시세 데이터 Provider trait.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Provider 이름
    fn name(&self) -> &str;

    /// 한 종목의 일봉 시계열 조회.
    ///
    /// # 인자
    /// * `symbol` - 심볼 (예: "SPY", "QQQ")
    /// * `start` - 시작일
    /// * `end` - 종료일
    async fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries>;

    /// 여러 종목을 조회해 심볼별 시계열로 반환합니다.
    ///
    /// 종목당 한 번씩 [`fetch_series`](Self::fetch_series)를 호출하며,
    /// 하나라도 실패하면 전체가 실패합니다.
    async fn fetch_prices(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashMap<String, PriceSeries>> {
        validate_range(start, end)?;

        let fetches = symbols.iter().map(|symbol| self.fetch_series(symbol, start, end));
        let series = try_join_all(fetches).await?;

        info!(
            provider = self.name(),
            symbols = symbols.len(),
            start = %start,
            end = %end,
            "시세 조회 완료"
        );

        Ok(series
            .into_iter()
            .map(|s| (s.symbol.clone(), s))
            .collect())
    }
}

/// 시작일이 종료일보다 늦으면 오류.
pub(crate) fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start > end {
        return Err(DataError::InvalidData(format!(
            "시작일({})이 종료일({})보다 늦습니다",
            start, end
        )));
    }
    Ok(())
}
