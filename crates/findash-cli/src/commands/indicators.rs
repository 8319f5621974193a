//! 시세 조회 후 지표 보고서.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use findash_analytics::{build_reports, IndicatorRequest, IndicatorSettings, InstrumentReport};
use findash_core::MarketDataConfig;
use findash_data::MarketDataProvider;

use super::{to_json, OutputFormat};

/// 명령줄에서 덮어쓸 수 있는 조회 조건 (없으면 설정 파일 값 사용).
#[derive(Debug, Clone, Default)]
pub struct IndicatorArgs {
    pub symbols: Vec<String>,
    pub benchmark: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// 날짜 파싱 (YYYY-MM-DD).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {}. Use YYYY-MM-DD", s))
}

/// 설정 파일 값 위에 명령줄 인자를 적용합니다.
pub fn resolve_request(config: &MarketDataConfig, args: &IndicatorArgs) -> Result<IndicatorRequest> {
    let mut request = IndicatorRequest::try_from(config)?;

    if !args.symbols.is_empty() {
        request.symbols = args.symbols.iter().map(|s| s.trim().to_uppercase()).collect();
    }
    if let Some(benchmark) = &args.benchmark {
        request.benchmark = benchmark.trim().to_uppercase();
    }
    if let Some(from) = &args.from {
        request.start = parse_date(from)?;
    }
    if let Some(to) = &args.to {
        request.end = parse_date(to)?;
    }

    if request.start > request.end {
        anyhow::bail!("Start date must be before end date");
    }
    Ok(request)
}

/// 지표 보고서를 생성합니다.
pub async fn run_indicators<P>(
    provider: &P,
    request: &IndicatorRequest,
    settings: &IndicatorSettings,
) -> Result<Vec<InstrumentReport>>
where
    P: MarketDataProvider + ?Sized,
{
    info!(
        symbols = ?request.symbols,
        benchmark = %request.benchmark,
        start = %request.start,
        end = %request.end,
        "지표 계산 시작"
    );
    Ok(build_reports(provider, request, settings).await?)
}

pub fn render_reports(
    reports: &[InstrumentReport],
    benchmark: &str,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(reports),
        OutputFormat::Table => Ok(reports_table(reports, benchmark)),
    }
}

fn reports_table(reports: &[InstrumentReport], benchmark: &str) -> String {
    let mut out = format!(
        "{:<8} {:>8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
        "Symbol", "RSI", "MACD", "Signal", "Hist", "Vol", "β(day)", "β(month)"
    );
    out.push_str(&"-".repeat(84));
    out.push('\n');

    for r in reports {
        out.push_str(&format!(
            "{:<8} {:>8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
            r.symbol,
            cell(r.rsi.latest(), 2),
            cell(r.macd.latest(), 4),
            cell(r.signal.latest(), 4),
            cell(r.histogram.latest(), 4),
            cell(r.volatility.latest(), 4),
            cell(r.daily_beta, 3),
            cell(r.monthly_beta, 3)
        ));
    }
    out.push_str(&format!("(베타 기준: {}, 최근 값 기준)", benchmark));
    out
}

fn cell(value: Option<Decimal>, dp: u32) -> String {
    value
        .map(|v| v.round_dp(dp).to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use findash_core::PriceSeries;
    use findash_data::InMemoryPriceProvider;
    use rust_decimal_macros::dec;

    #[test]
    fn test_resolve_request_overrides() {
        let args = IndicatorArgs {
            symbols: vec!["aapl".to_string()],
            benchmark: Some("spy".to_string()),
            from: Some("2024-02-01".to_string()),
            to: None,
        };
        let request = resolve_request(&MarketDataConfig::default(), &args).unwrap();

        assert_eq!(request.symbols, vec!["AAPL"]);
        assert_eq!(request.benchmark, "SPY");
        assert_eq!(request.start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(request.end, NaiveDate::from_ymd_opt(2024, 11, 8).unwrap());
    }

    #[test]
    fn test_resolve_request_rejects_reversed_range() {
        let args = IndicatorArgs {
            from: Some("2024-12-31".to_string()),
            to: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        assert!(resolve_request(&MarketDataConfig::default(), &args).is_err());
        assert!(parse_date("2024/01/01").is_err());
    }

    #[tokio::test]
    async fn test_run_indicators_table() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let closes: Vec<(NaiveDate, Decimal)> = (0..40)
            .map(|i| (start + chrono::Duration::days(i), dec!(100) + Decimal::from((i * 7) % 11)))
            .collect();
        let provider = InMemoryPriceProvider::new()
            .with_series(PriceSeries::from_closes("SPY", closes.clone()))
            .with_series(PriceSeries::from_closes("QQQ", closes));

        let request = IndicatorRequest {
            symbols: vec!["SPY".to_string()],
            benchmark: "QQQ".to_string(),
            start,
            end: start + chrono::Duration::days(39),
        };
        let reports = run_indicators(&provider, &request, &IndicatorSettings::default())
            .await
            .unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].daily_beta, Some(Decimal::ONE));

        let table = render_reports(&reports, "QQQ", OutputFormat::Table).unwrap();
        assert!(table.contains("SPY"));
        assert!(table.contains("베타 기준: QQQ"));
    }
}
