//! 대시보드 전반에서 사용되는 공통 타입.

mod amount;
mod month;

pub use amount::*;
pub use month::*;
