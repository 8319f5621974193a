//! 차트 데이터 구조
//!
//! 계산 결과를 UI가 바로 그릴 수 있는 시리즈 형태로 변환합니다.
//! 렌더링은 하지 않습니다.
//!
//! # 제공 차트
//!
//! - 카테고리별 예산 대비 실적 (그룹 막대)
//! - 월별 수입/지출 비교 (그룹 막대, 지출은 음수)
//! - 누적 순이익 (선)
//! - 기술적 지표 (날짜 축 선)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregation::MonthlySummary;
use crate::indicators::IndicatorSeries;
use crate::reconciliation::ReconciledCategory;

/// 날짜 축 차트 데이터 포인트
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// X축 값 (타임스탬프, 밀리초)
    pub x: i64,

    /// Y축 값
    pub y: Decimal,

    /// 레이블 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ChartPoint {
    /// 날짜(UTC 자정)로 포인트를 생성합니다. 레이블은 YYYY-MM-DD.
    pub fn on_date(date: NaiveDate, value: Decimal) -> Self {
        let x = date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or_default();

        Self {
            x,
            y: value,
            label: Some(date.format("%Y-%m-%d").to_string()),
        }
    }
}

/// 범주 축 차트 데이터 포인트 (카테고리, 월)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPoint {
    pub label: String,
    pub value: Decimal,
}

impl CategoryPoint {
    pub fn new(label: impl Into<String>, value: Decimal) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// 시리즈 표시 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Bar,
    Line,
}

/// 차트 시리즈
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries<P> {
    pub name: String,
    pub kind: SeriesKind,
    pub points: Vec<P>,
}

impl<P> ChartSeries<P> {
    fn new(name: impl Into<String>, kind: SeriesKind, points: Vec<P>) -> Self {
        Self {
            name: name.into(),
            kind,
            points,
        }
    }
}

/// 제목과 시리즈 묶음
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart<P> {
    pub title: String,
    pub series: Vec<ChartSeries<P>>,
}

impl<P> Chart<P> {
    /// 오류가 났을 때 보여줄 빈 차트를 생성합니다.
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            series: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }
}

/// 카테고리별 예산 대비 실적 막대 차트.
pub fn budget_vs_actual_chart(rows: &[ReconciledCategory]) -> Chart<CategoryPoint> {
    let budgeted = rows
        .iter()
        .map(|r| CategoryPoint::new(&r.category, r.budgeted_amount))
        .collect();
    let actual = rows
        .iter()
        .map(|r| CategoryPoint::new(&r.category, r.actual_amount))
        .collect();

    Chart {
        title: "Budget vs Actuals".to_string(),
        series: vec![
            ChartSeries::new("Budgeted", SeriesKind::Bar, budgeted),
            ChartSeries::new("Actual", SeriesKind::Bar, actual),
        ],
    }
}

/// 월별 예산/실제 수입과 지출 비교 막대 차트 (지출은 음수로 표시).
pub fn monthly_comparison_chart(summaries: &[MonthlySummary]) -> Chart<CategoryPoint> {
    let series = |name: &str, value: fn(&MonthlySummary) -> Decimal| {
        let points = summaries
            .iter()
            .map(|s| CategoryPoint::new(s.month.name(), value(s)))
            .collect();
        ChartSeries::new(name, SeriesKind::Bar, points)
    };

    Chart {
        title: "Budgeted vs Actual Income and Expenses".to_string(),
        series: vec![
            series("Budgeted Income", |s| s.budgeted_income),
            series("Actual Income", |s| s.actual_income),
            series("Budgeted Expenses", |s| -s.budgeted_expenses),
            series("Actual Expenses", |s| -s.actual_expenses),
        ],
    }
}

/// 누적 순이익 선 차트.
pub fn cumulative_cash_flow_chart(summaries: &[MonthlySummary]) -> Chart<CategoryPoint> {
    let points = summaries
        .iter()
        .map(|s| CategoryPoint::new(s.month.name(), s.cumulative_net_income))
        .collect();

    Chart {
        title: "Cumulative Net Income Over Time".to_string(),
        series: vec![ChartSeries::new("Cumulative Net Income", SeriesKind::Line, points)],
    }
}

/// 지표 시계열들을 날짜 축 선 차트로 묶습니다 (정의되지 않은 값은 제외).
pub fn indicator_chart(title: impl Into<String>, indicators: &[&IndicatorSeries]) -> Chart<ChartPoint> {
    let series = indicators
        .iter()
        .map(|ind| {
            let points = ind
                .defined()
                .map(|(date, value)| ChartPoint::on_date(date, value))
                .collect();
            ChartSeries::new(ind.name.clone(), SeriesKind::Line, points)
        })
        .collect();

    Chart {
        title: title.into(),
        series,
    }
}
