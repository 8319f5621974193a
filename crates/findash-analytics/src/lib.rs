//! 재무 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 예산 대비 실적 대사 및 합계
//! - 수입/지출 월별 집계와 누적 현금 흐름
//! - 기술적 지표 (RSI, MACD, 변동성) 및 베타
//! - 재무 지표 요약과 저축/투자 계산기
//! - 차트용 시리즈 변환
//! - UI 진입점이 되는 대시보드 서비스
//!
//! 계산 함수는 모두 입력을 명시적으로 받는 순수 함수이며,
//! 저장소와 시세 Provider는 대시보드/보고서 계층에서만 호출합니다.

pub mod aggregation;
pub mod beta;
pub mod charts;
pub mod dashboard;
pub mod indicators;
pub mod metrics;
pub mod reconciliation;
pub mod report;
pub mod savings;
pub mod stats;

// 대사/집계 re-exports
pub use aggregation::{cumulative_cash_flow, filter_by, filter_options, summarize_by_month, MonthlySummary};
pub use reconciliation::{reconcile, totals, ReconciledCategory, ReconciliationTotals};

// 지표 re-exports
pub use beta::{beta, beta_between, Granularity};
pub use indicators::{
    IndicatorEngine, IndicatorError, IndicatorPoint, IndicatorResult, IndicatorSeries, MacdParams,
    MacdResult, RsiParams, VolatilityParams,
};

// 서비스 re-exports
pub use charts::{CategoryPoint, Chart, ChartPoint, ChartSeries, SeriesKind};
pub use dashboard::{
    BudgetDashboard, BudgetReport, FilterOptions, LedgerDashboard, MonthlyReport, SubmitOutcome,
};
pub use metrics::FinancialMetrics;
pub use report::{build_reports, IndicatorRequest, IndicatorSettings, InstrumentReport};
pub use savings::{investment_projection, required_contribution, ContributionFrequency, ProjectionInput};
