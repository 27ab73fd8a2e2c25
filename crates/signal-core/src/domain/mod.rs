//! 도메인 모델.

pub mod analyzer;
pub mod bar;
pub mod signal;
pub mod trade;

pub use analyzer::{Analyzer, AnalyzerError};
pub use bar::{Bar, IndicatorSeries};
pub use signal::{
    CompositeAdvice, OverallCall, PeriodAssessment, RiskLevel, SignalKind, SignalStrength,
    TimeframeSignal, VoteCounts,
};
pub use trade::{round2, BacktestSummary, TimeframeDecision, Trade, TradeKind};
