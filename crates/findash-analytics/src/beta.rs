//! 베타 계산 모듈.
//!
//! 한 종목 수익률이 시장(기준 종목) 수익률에 얼마나 민감한지 측정합니다.
//!
//! β = Cov(종목, 시장) / Var(시장)
//!
//! # 단위
//!
//! - **일간**: 날짜가 겹치는 일간 수익률 전체로 계산
//! - **월간**: 일간 퍼센트 수익률을 월초(月初) 기준으로 합산한 뒤 계산
//!
//! # 예시
//!
//! ```rust,ignore
//! use findash_analytics::beta::{beta_between, Granularity};
//!
//! let beta = beta_between(&spy, &qqq, Granularity::Monthly)?;
//! println!("SPY 베타 (QQQ 기준): {:.2}", beta);
//! ```

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use findash_core::PriceSeries;

use crate::indicators::{IndicatorError, IndicatorResult};
use crate::stats::{pct_change, sample_covariance, sample_variance};

/// 베타 계산 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    Daily,
    Monthly,
}

/// 날짜가 붙은 수익률.
pub type DatedReturn = (NaiveDate, Decimal);

/// 가격 시계열의 일간 수익률 (각 수익률은 뒤쪽 거래일 날짜를 가짐).
pub fn dated_returns(series: &PriceSeries) -> IndicatorResult<Vec<DatedReturn>> {
    let returns = pct_change(&series.closes())?;
    Ok(series
        .bars
        .iter()
        .skip(1)
        .map(|b| b.date)
        .zip(returns)
        .collect())
}

/// 두 수익률 시계열을 날짜 기준으로 맞춥니다 (양쪽에 모두 있는 날짜만).
pub fn align(a: &[DatedReturn], b: &[DatedReturn]) -> (Vec<DatedReturn>, Vec<DatedReturn>) {
    let b_by_date: BTreeMap<NaiveDate, Decimal> = b.iter().copied().collect();

    a.iter()
        .filter_map(|&(date, ra)| b_by_date.get(&date).map(|&rb| ((date, ra), (date, rb))))
        .unzip()
}

/// 일간 수익률을 월별 퍼센트 수익률 합계로 변환합니다.
///
/// 각 월은 월초 날짜로 표시되며, 첫 월과 마지막 월 사이에 거래가 없는 월은 0입니다.
pub fn monthly_returns(daily: &[DatedReturn]) -> Vec<DatedReturn> {
    let mut sums: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for &(date, ret) in daily {
        *sums.entry(month_start(date)).or_insert(Decimal::ZERO) += ret * dec!(100);
    }

    let (Some(&first), Some(&last)) = (sums.keys().next(), sums.keys().next_back()) else {
        return Vec::new();
    };

    let mut result = Vec::new();
    let mut cursor = first;
    while cursor <= last {
        result.push((cursor, sums.get(&cursor).copied().unwrap_or(Decimal::ZERO)));
        match next_month_start(cursor) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    result
}

/// 베타 계산.
///
/// 두 수익률 슬라이스는 이미 같은 날짜로 정렬되어 있어야 합니다.
///
/// # 오류
/// - 길이가 다르면 `InvalidParameter`
/// - 2개 미만이면 `InsufficientData`
/// - 시장 분산이 0이면 `Undefined`
pub fn beta(instrument_returns: &[Decimal], market_returns: &[Decimal]) -> IndicatorResult<Decimal> {
    if instrument_returns.len() != market_returns.len() {
        return Err(IndicatorError::InvalidParameter(format!(
            "수익률 길이가 다릅니다: {} vs {}",
            instrument_returns.len(),
            market_returns.len()
        )));
    }
    if market_returns.len() < 2 {
        return Err(IndicatorError::InsufficientData {
            required: 2,
            provided: market_returns.len(),
        });
    }

    let variance = sample_variance(market_returns).unwrap_or(Decimal::ZERO);
    if variance.is_zero() {
        return Err(IndicatorError::Undefined(
            "시장 수익률 분산이 0이라 베타를 계산할 수 없습니다".to_string(),
        ));
    }

    let covariance = sample_covariance(instrument_returns, market_returns).unwrap_or(Decimal::ZERO);
    Ok(covariance / variance)
}

/// 두 가격 시계열 사이의 베타.
pub fn beta_between(
    instrument: &PriceSeries,
    market: &PriceSeries,
    granularity: Granularity,
) -> IndicatorResult<Decimal> {
    let (inst, mkt) = align(&dated_returns(instrument)?, &dated_returns(market)?);

    let (inst, mkt) = match granularity {
        Granularity::Daily => (inst, mkt),
        Granularity::Monthly => (monthly_returns(&inst), monthly_returns(&mkt)),
    };

    debug!(
        instrument = %instrument.symbol,
        market = %market.symbol,
        granularity = ?granularity,
        points = inst.len(),
        "베타 계산"
    );

    let values = |rows: &[DatedReturn]| rows.iter().map(|(_, r)| *r).collect::<Vec<_>>();
    beta(&values(&inst), &values(&mkt))
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn next_month_start(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}
