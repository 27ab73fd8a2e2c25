//! 백테스트 엔진.
//!
//! 정합화/재생을 묶어 실행하고 초기 자본을 전략 수익률에 적용해
//! 요약 결과를 만듭니다.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use signal_core::{round2, BacktestSettings, BacktestSummary, Bar, IndicatorSeries};
use thiserror::Error;
use tracing::debug;

use super::position::{PositionStateMachine, ReconciledSeries};

/// 백테스트 오류.
#[derive(Debug, Error)]
pub enum BacktestError {
    /// 설정 오류
    #[error("백테스트 설정 오류: {0}")]
    ConfigError(String),
}

/// 백테스트 설정.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// 초기 자본금
    #[serde(default = "default_initial_capital")]
    pub initial_capital: Decimal,
}

fn default_initial_capital() -> Decimal {
    Decimal::from(1_000_000u64)
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: default_initial_capital(),
        }
    }
}

impl BacktestConfig {
    /// 애플리케이션 설정에서 백테스트 설정을 만듭니다.
    pub fn from_settings(settings: &BacktestSettings) -> Self {
        Self {
            initial_capital: Decimal::from(settings.initial_capital),
        }
    }

    /// 설정 유효성 검증.
    pub fn validate(&self) -> Result<(), BacktestError> {
        if self.initial_capital <= Decimal::ZERO {
            return Err(BacktestError::ConfigError(
                "초기 자본금은 0보다 커야 합니다".to_string(),
            ));
        }
        Ok(())
    }
}

/// MACD 크로스오버 백테스트 엔진.
#[derive(Debug)]
pub struct BacktestEngine {
    config: BacktestConfig,
}

impl BacktestEngine {
    /// 새 엔진을 생성합니다. 설정이 유효하지 않으면 실패합니다.
    pub fn new(config: BacktestConfig) -> Result<Self, BacktestError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 설정된 초기 자본금.
    pub fn initial_capital(&self) -> Decimal {
        self.config.initial_capital
    }

    /// 바 시리즈에 대해 크로스오버 전략을 재생하고 요약을 만듭니다.
    ///
    /// 바 또는 지표 시리즈가 비어 있으면 거래 없이 초기 자본이 그대로
    /// 유지되는 중립 요약을 반환합니다.
    pub fn run(&self, bars: &[Bar], indicators: &IndicatorSeries) -> BacktestSummary {
        if bars.is_empty() || indicators.is_empty() {
            return BacktestSummary::neutral(self.config.initial_capital);
        }

        let series = ReconciledSeries::reconcile(bars, indicators);
        let outcome = PositionStateMachine::replay(&series);

        debug!(
            bars = series.len(),
            trades = outcome.trades.len(),
            strategy_return = outcome.strategy_return,
            "backtest replay complete"
        );

        let growth =
            Decimal::from_f64(1.0 + outcome.strategy_return).unwrap_or(Decimal::ONE);
        let capital_start = self.config.initial_capital;
        let capital_end = (capital_start * growth).round_dp(2);

        BacktestSummary {
            capital_start,
            capital_end,
            total_return_pct: round2(outcome.strategy_return * 100.0),
            profit_amount: capital_end - capital_start,
            trades: outcome.trades,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(start + Duration::days(i as i64), c, c, c, c, 0.0))
            .collect()
    }

    #[test]
    fn test_empty_input_is_neutral() {
        let engine = BacktestEngine::new(BacktestConfig::default()).unwrap();
        let summary = engine.run(&[], &IndicatorSeries::new(vec![], vec![]));
        assert_eq!(summary.capital_start, summary.capital_end);
        assert_eq!(summary.total_return_pct, 0.0);
        assert!(summary.trades.is_empty());
    }

    #[test]
    fn test_invalid_capital_rejected() {
        let config = BacktestConfig {
            initial_capital: Decimal::ZERO,
        };
        assert!(BacktestEngine::new(config).is_err());
    }

    #[test]
    fn test_capital_applies_strategy_return() {
        // 골든 크로스 후 20% 상승, 이후 크로스 없음
        let bars = bars_from_closes(&[100.0, 100.0, 110.0, 120.0]);
        let indicators =
            IndicatorSeries::new(vec![-1.0, 1.0, 1.0, 1.0], vec![0.0, 0.0, 0.0, 0.0]);
        let engine = BacktestEngine::new(BacktestConfig::default()).unwrap();
        let summary = engine.run(&bars, &indicators);

        // 바 1에서 매수, 1→2 (+10%), 2→3 (+110→120) 보유
        let expected = 0.10 + (120.0 - 110.0) / 110.0;
        assert_eq!(summary.total_return_pct, round2(expected * 100.0));
        assert_eq!(summary.capital_start, dec!(1000000));
        assert_eq!(
            summary.profit_amount,
            summary.capital_end - summary.capital_start
        );
        assert_eq!(summary.trades.len(), 1);
    }

    #[test]
    fn test_flat_market_keeps_capital() {
        let bars = bars_from_closes(&[100.0; 10]);
        let indicators = IndicatorSeries::new(vec![0.5; 10], vec![0.5; 10]);
        let engine = BacktestEngine::new(BacktestConfig::default()).unwrap();
        let summary = engine.run(&bars, &indicators);
        assert_eq!(summary.capital_end, dec!(1000000.00));
        assert!(summary.trades.is_empty());
    }
}
