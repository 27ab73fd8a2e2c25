//! # Signal Analytics
//!
//! 순수 계산 계층: 지표 수학, 신호 종합, MACD 크로스오버 백테스트.
//!
//! 이 크레이트의 모든 구성 요소는 단일 스레드에서 동작하는 결정적
//! 계산이며, 오케스트레이션이 팬인을 마친 뒤에만 실행됩니다.

pub mod aggregator;
pub mod backtest;
pub mod indicators;

pub use aggregator::SignalAggregator;
pub use backtest::{BacktestConfig, BacktestEngine, BacktestError, TradeAnnotator};
pub use indicators::{EmaParams, IndicatorError, MacdParams, MacdSeries, TrendIndicators};
