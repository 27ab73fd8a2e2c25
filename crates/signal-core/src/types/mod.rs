//! 공유 기본 타입.

pub mod date_range;
pub mod timeframe;

pub use date_range::DateRange;
pub use timeframe::Timeframe;
