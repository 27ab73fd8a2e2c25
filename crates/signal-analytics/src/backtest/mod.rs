//! MACD 크로스오버 백테스트.
//!
//! 일봉 시리즈에 대해 롱/현금 크로스오버 전략을 재생하고, 각 거래를
//! 다른 타임프레임의 판단 스냅샷으로 주석 처리합니다.
//!
//! - [`position`] - 포지션 상태 기계 (크로스오버 재생, 거래 이벤트)
//! - [`engine`] - 백테스트 엔진 (수익률/자본 계산, 요약 래핑)
//! - [`annotator`] - 거래별 타임프레임 판단 주석

pub mod annotator;
pub mod engine;
pub mod position;

pub use annotator::TradeAnnotator;
pub use engine::{BacktestConfig, BacktestEngine, BacktestError};
pub use position::{PositionState, PositionStateMachine, ReconciledSeries, ReplayOutcome};
