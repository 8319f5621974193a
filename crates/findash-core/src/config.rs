//! 설정 관리.
//!
//! 기본값 → TOML 파일 → `FINDASH__*` 환경 변수 순서로 설정을 덮어씁니다.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 레코드 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
    /// 시세 데이터 설정
    #[serde(default)]
    pub market_data: MarketDataConfig,
    /// 기술적 지표 설정
    #[serde(default)]
    pub indicators: IndicatorConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 레코드 저장소 설정.
///
/// 컬렉션마다 JSON 배열 파일 하나를 사용합니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// 데이터 디렉토리
    pub data_dir: PathBuf,
    /// 예산 항목 파일명
    #[serde(default = "default_budget_file")]
    pub budget_file: String,
    /// 실적 항목 파일명
    #[serde(default = "default_actuals_file")]
    pub actuals_file: String,
    /// 수입 원장 파일명
    #[serde(default = "default_income_file")]
    pub income_file: String,
    /// 지출 원장 파일명
    #[serde(default = "default_expenses_file")]
    pub expenses_file: String,
}

fn default_budget_file() -> String {
    "budget_data.json".to_string()
}
fn default_actuals_file() -> String {
    "actuals_data.json".to_string()
}
fn default_income_file() -> String {
    "income_data.json".to_string()
}
fn default_expenses_file() -> String {
    "expenses_data.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            budget_file: default_budget_file(),
            actuals_file: default_actuals_file(),
            income_file: default_income_file(),
            expenses_file: default_expenses_file(),
        }
    }
}

impl StorageConfig {
    /// 주어진 디렉토리를 사용하는 설정을 생성합니다.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn budget_path(&self) -> PathBuf {
        self.data_dir.join(&self.budget_file)
    }

    pub fn actuals_path(&self) -> PathBuf {
        self.data_dir.join(&self.actuals_file)
    }

    pub fn income_path(&self) -> PathBuf {
        self.data_dir.join(&self.income_file)
    }

    pub fn expenses_path(&self) -> PathBuf {
        self.data_dir.join(&self.expenses_file)
    }
}

/// 시세 데이터 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketDataConfig {
    /// 기본 조회 심볼
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,
    /// 베타 계산 기준(시장) 심볼
    #[serde(default = "default_benchmark")]
    pub benchmark: String,
    /// 조회 시작일 (YYYY-MM-DD)
    #[serde(default = "default_start_date")]
    pub start_date: String,
    /// 조회 종료일 (YYYY-MM-DD)
    #[serde(default = "default_end_date")]
    pub end_date: String,
}

fn default_symbols() -> Vec<String> {
    vec!["SPY".to_string(), "QQQ".to_string()]
}
fn default_benchmark() -> String {
    "QQQ".to_string()
}
fn default_start_date() -> String {
    "2024-01-01".to_string()
}
fn default_end_date() -> String {
    "2024-11-08".to_string()
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            benchmark: default_benchmark(),
            start_date: default_start_date(),
            end_date: default_end_date(),
        }
    }
}

/// 기술적 지표 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndicatorConfig {
    /// RSI 윈도우
    #[serde(default = "default_window")]
    pub rsi_window: usize,
    /// MACD 단기 EMA 기간
    #[serde(default = "default_macd_short")]
    pub macd_short: usize,
    /// MACD 장기 EMA 기간
    #[serde(default = "default_macd_long")]
    pub macd_long: usize,
    /// MACD 시그널 기간
    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,
    /// 변동성 롤링 윈도우
    #[serde(default = "default_window")]
    pub volatility_window: usize,
    /// 연율화에 사용할 연간 거래일 수
    #[serde(default = "default_trading_days")]
    pub trading_days_per_year: u32,
}

fn default_window() -> usize {
    14
}
fn default_macd_short() -> usize {
    12
}
fn default_macd_long() -> usize {
    26
}
fn default_macd_signal() -> usize {
    9
}
fn default_trading_days() -> u32 {
    252
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_window: default_window(),
            macd_short: default_macd_short(),
            macd_long: default_macd_long(),
            macd_signal: default_macd_signal(),
            volatility_window: default_window(),
            trading_days_per_year: default_trading_days(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .set_default("storage.data_dir", "data")?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("FINDASH")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.indicators.rsi_window, 14);
        assert_eq!(config.indicators.macd_long, 26);
        assert_eq!(config.indicators.trading_days_per_year, 252);
        assert_eq!(config.market_data.benchmark, "QQQ");
    }

    #[test]
    fn test_storage_paths() {
        let storage = StorageConfig::in_dir("/tmp/findash");
        assert_eq!(
            storage.budget_path(),
            PathBuf::from("/tmp/findash/budget_data.json")
        );
        assert_eq!(
            storage.expenses_path(),
            PathBuf::from("/tmp/findash/expenses_data.json")
        );
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));
        assert_eq!(config.indicators.volatility_window, 14);
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(
            &path,
            "[indicators]\nrsi_window = 7\n\n[market_data]\nbenchmark = \"SPY\"\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.indicators.rsi_window, 7);
        assert_eq!(config.indicators.macd_long, 26);
        assert_eq!(config.indicators.volatility_window, 14);
        assert_eq!(config.market_data.benchmark, "SPY");
        assert_eq!(config.market_data.symbols, vec!["SPY", "QQQ"]);
        assert_eq!(config.market_data.end_date, "2024-11-08");
    }
}
