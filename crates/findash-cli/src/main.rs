//! 재무 대시보드 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 예산/실적 입력 후 대사 보고서
//! findash add-budget -c Rent -a 1000
//! findash add-actual -c Rent -a 950 -d 2024-01-31
//! findash report
//!
//! # 원장 표 입력 후 월별 보고서 (필터 선택)
//! findash add-income -m Jan -s Salary -b 3000 -a 3100
//! findash add-expense -m Jan -c Rent -b 1000 -a 1000
//! findash monthly --category Rent --format json
//!
//! # SPY 지표와 QQQ 대비 베타
//! findash indicators -s SPY --benchmark QQQ -f 2024-01-01 -t 2024-11-08
//!
//! # 저축 계산기
//! findash savings required --current 1000 --goal 7000 --months 12
//! findash savings projection --current 1000 --contribution 100 --months 60 --rate 5
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use findash_analytics::{IndicatorSettings, SubmitOutcome};
use findash_cli::commands::{budget, indicators, ledger, savings, show_config, OutputFormat};
use findash_core::{init_logging, AppConfig, LogConfig};
use findash_data::YahooPriceProvider;

#[derive(Parser)]
#[command(name = "findash")]
#[command(about = "Finance dashboard CLI - 예산 대사, 월별 현금 흐름, 시장 지표", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일
    #[arg(long, global = true, default_value = "config/default.toml")]
    config: PathBuf,

    /// 데이터 디렉토리 (설정 파일 값 대신 사용)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// 출력 형식 (table, json)
    #[arg(long, global = true, default_value = "table")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 카테고리 예산 추가
    AddBudget {
        /// 카테고리
        #[arg(short, long)]
        category: Option<String>,

        /// 예산 금액
        #[arg(short, long)]
        amount: Option<String>,
    },

    /// 실제 지출 추가
    AddActual {
        /// 카테고리
        #[arg(short, long)]
        category: Option<String>,

        /// 실제 금액
        #[arg(short, long)]
        amount: Option<String>,

        /// 발생일 (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// 예산 대비 실적 보고서
    Report,

    /// 수입 원장 행 추가
    AddIncome {
        /// 월 (January, Jan, 1)
        #[arg(short, long)]
        month: String,

        /// 수입원
        #[arg(short, long)]
        source: String,

        /// 예산 금액
        #[arg(short, long, default_value = "0")]
        budgeted: String,

        /// 실제 금액
        #[arg(short, long, default_value = "0")]
        actual: String,
    },

    /// 지출 원장 행 추가
    AddExpense {
        /// 월 (January, Jan, 1)
        #[arg(short, long)]
        month: String,

        /// 지출 카테고리
        #[arg(short, long)]
        category: String,

        /// 예산 금액
        #[arg(short, long, default_value = "0")]
        budgeted: String,

        /// 실제 금액
        #[arg(short, long, default_value = "0")]
        actual: String,
    },

    /// 월별 수입/지출 보고서
    Monthly {
        /// 포함할 수입원 (여러 번 지정 가능, 없으면 전체)
        #[arg(long = "source")]
        sources: Vec<String>,

        /// 포함할 지출 카테고리 (여러 번 지정 가능, 없으면 전체)
        #[arg(long = "category")]
        categories: Vec<String>,
    },

    /// 필터에 사용할 수입원/카테고리 목록
    Filters,

    /// 수입/지출 원장 표 초기화
    ClearLedger,

    /// 시세 조회 후 RSI, MACD, 변동성, 베타 계산 (Yahoo Finance)
    Indicators {
        /// 심볼 (쉼표로 구분, 예: SPY,QQQ)
        #[arg(short, long, value_delimiter = ',')]
        symbols: Vec<String>,

        /// 베타 기준 심볼
        #[arg(long)]
        benchmark: Option<String>,

        /// 시작 날짜 (YYYY-MM-DD)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 종료 날짜 (YYYY-MM-DD)
        #[arg(short, long)]
        to: Option<String>,
    },

    /// 저축/투자 계산기
    Savings {
        #[command(subcommand)]
        command: SavingsCommands,
    },

    /// 적용된 설정 출력 (TOML)
    Config,
}

#[derive(Subcommand)]
enum SavingsCommands {
    /// 목표까지 필요한 월 저축액
    Required {
        #[arg(long)]
        current: String,

        #[arg(long)]
        goal: String,

        /// 기간 (개월)
        #[arg(long)]
        months: u32,
    },

    /// 정기 납입 투자 예상 가치
    Projection {
        #[arg(long)]
        current: String,

        /// 회당 납입액
        #[arg(long)]
        contribution: String,

        /// 납입 주기 (monthly, weekly)
        #[arg(long, default_value = "monthly")]
        frequency: String,

        /// 기간 (개월)
        #[arg(long)]
        months: u32,

        /// 연 수익률 (%)
        #[arg(long, default_value = "0")]
        rate: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)?;
    if let Some(data_dir) = cli.data_dir.clone() {
        config.storage.data_dir = data_dir;
    }

    init_logging(LogConfig::from(&config.logging))
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    let format = OutputFormat::parse(&cli.format)?;

    if let Err(e) = run(cli.command, &config, format).await {
        error!("Command failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(command: Commands, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let storage = &config.storage;

    match command {
        Commands::AddBudget { category, amount } => {
            let outcome = budget::add_budget(storage, category.as_deref(), amount.as_deref());
            print_outcome(outcome)?;
        }

        Commands::AddActual {
            category,
            amount,
            date,
        } => {
            let outcome = budget::add_actual(
                storage,
                category.as_deref(),
                amount.as_deref(),
                date.as_deref(),
            );
            print_outcome(outcome)?;
        }

        Commands::Report => {
            let report = budget::budget_report(storage)?;
            println!("{}", budget::render_budget_report(&report, format)?);
        }

        Commands::AddIncome {
            month,
            source,
            budgeted,
            actual,
        } => {
            let args = ledger::LedgerRowArgs {
                month,
                label: source,
                budgeted,
                actual,
            };
            let count = ledger::add_income(storage, &args)?;
            println!("수입 행이 추가되었습니다 (총 {}행)", count);
        }

        Commands::AddExpense {
            month,
            category,
            budgeted,
            actual,
        } => {
            let args = ledger::LedgerRowArgs {
                month,
                label: category,
                budgeted,
                actual,
            };
            let count = ledger::add_expense(storage, &args)?;
            println!("지출 행이 추가되었습니다 (총 {}행)", count);
        }

        Commands::Monthly {
            sources,
            categories,
        } => {
            let report = ledger::monthly_report(storage, &sources, &categories)?;
            println!("{}", ledger::render_monthly_report(&report, format)?);
        }

        Commands::Filters => {
            let options = ledger::filter_options(storage)?;
            println!("{}", ledger::render_filter_options(&options, format)?);
        }

        Commands::ClearLedger => {
            ledger::clear_ledger(storage)?;
            println!("원장 표가 초기화되었습니다");
        }

        Commands::Indicators {
            symbols,
            benchmark,
            from,
            to,
        } => {
            let args = indicators::IndicatorArgs {
                symbols,
                benchmark,
                from,
                to,
            };
            let request = indicators::resolve_request(&config.market_data, &args)?;
            let settings = IndicatorSettings::from(&config.indicators);

            let provider = YahooPriceProvider::new()?;
            let reports = indicators::run_indicators(&provider, &request, &settings).await?;
            info!("✅ {} 종목 지표 계산 완료", reports.len());

            println!(
                "{}",
                indicators::render_reports(&reports, &request.benchmark, format)?
            );
        }

        Commands::Savings { command } => {
            let message = match command {
                SavingsCommands::Required {
                    current,
                    goal,
                    months,
                } => savings::required_message(&current, &goal, months)?,
                SavingsCommands::Projection {
                    current,
                    contribution,
                    frequency,
                    months,
                    rate,
                } => savings::projection_message(savings::ProjectionArgs {
                    current,
                    contribution,
                    frequency,
                    months,
                    rate_percent: rate,
                })?,
            };
            println!("{}", message);
        }

        Commands::Config => {
            println!("{}", show_config::render_config(config)?);
        }
    }

    Ok(())
}

/// 저장 결과를 출력합니다. 저장되지 않았으면 에러로 종료합니다.
fn print_outcome(outcome: SubmitOutcome) -> Result<()> {
    if outcome.saved {
        println!("{}", outcome.message);
        Ok(())
    } else {
        Err(anyhow!(outcome.message))
    }
}
