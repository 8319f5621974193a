//! 재무 대시보드 도메인 모델.

mod budget;
mod ledger;
mod market_data;

pub use budget::*;
pub use ledger::*;
pub use market_data::*;
