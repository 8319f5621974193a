//! 저장소와 시세 Provider를 trait 객체로 사용하는 통합 테스트.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use findash_core::{ActualItem, BudgetItem, ExpenseRow, Month, PriceSeries};
use findash_data::{
    InMemoryPriceProvider, InMemoryRecordStore, JsonRecordStore, LedgerTableStore,
    MarketDataProvider, RecordStore,
};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn exercise_store(store: &dyn RecordStore) {
    store.save_budget_item(&BudgetItem::new("Rent", dec!(1000)).unwrap()).unwrap();
    store
        .save_actual_item(&ActualItem::new("Rent", dec!(950), date(1, 31)).unwrap())
        .unwrap();
    store.save_budget_item(&BudgetItem::new("Food", dec!(300)).unwrap()).unwrap();

    let budget = store.load_budget_items().unwrap();
    let actuals = store.load_actual_items().unwrap();
    assert_eq!(budget.len(), 2);
    assert_eq!(actuals.len(), 1);
    assert_eq!(actuals[0].actual_amount, dec!(950));
}

#[test]
fn test_json_and_memory_stores_behave_alike() {
    let dir = TempDir::new().unwrap();
    exercise_store(&JsonRecordStore::in_dir(dir.path()));
    exercise_store(&InMemoryRecordStore::new());
}

#[test]
fn test_json_store_visible_to_new_instance() {
    let dir = TempDir::new().unwrap();
    {
        let store = JsonRecordStore::in_dir(dir.path());
        store
            .save_expense_rows(&[ExpenseRow::new(Month::March, "Rent", dec!(1000), dec!(950))])
            .unwrap();
    }

    let reopened = JsonRecordStore::in_dir(dir.path());
    let rows = reopened.load_expense_rows().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].month, Some(Month::March));
}

#[tokio::test]
async fn test_fetch_prices_by_symbol() {
    let closes = |base: i64| {
        (1..=5).map(move |d| (date(2, d), Decimal::from(base + d as i64)))
    };
    let provider: Arc<dyn MarketDataProvider> = Arc::new(
        InMemoryPriceProvider::new()
            .with_series(PriceSeries::from_closes("SPY", closes(400)))
            .with_series(PriceSeries::from_closes("QQQ", closes(300))),
    );

    let symbols = vec!["SPY".to_string(), "QQQ".to_string()];
    let prices = provider.fetch_prices(&symbols, date(2, 2), date(2, 4)).await.unwrap();

    assert_eq!(prices.len(), 2);
    assert_eq!(prices["SPY"].closes(), vec![dec!(402), dec!(403), dec!(404)]);
    assert_eq!(prices["QQQ"].len(), 3);
}

#[tokio::test]
async fn test_fetch_prices_fails_when_any_symbol_missing() {
    let provider = InMemoryPriceProvider::new()
        .with_series(PriceSeries::from_closes("SPY", vec![(date(1, 2), dec!(470))]));

    let symbols = vec!["SPY".to_string(), "QQQ".to_string()];
    let result = provider.fetch_prices(&symbols, date(1, 1), date(1, 31)).await;
    assert!(result.is_err());
}
