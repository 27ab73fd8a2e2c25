//! 분석 리포트.
//!
//! 한 번의 분석 실행이 호출자에게 반환하는 최종 결과 구조입니다.
//! 타임프레임별 신호와 최근 바, 종합 판단, 백테스트 요약을 담습니다.

use chrono::{DateTime, Utc};
use serde::Serialize;
use signal_core::{
    BacktestSummary, Bar, CompositeAdvice, DateRange, RiskLevel, SignalKind, SignalStrength,
    Timeframe,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::context::RunContext;
use crate::orchestrator::TimeframeResult;

/// 타임프레임별 리포트 항목.
#[derive(Debug, Clone, Serialize)]
pub struct TimeframeReport {
    /// 표시용 이름
    pub label: String,
    /// 신호 분류
    pub kind: SignalKind,
    /// 신호 강도
    pub strength: SignalStrength,
    /// 리스크 수준
    pub risk_level: RiskLevel,
    /// 최근 바 (꼬리 구간)
    pub recent_bars: Vec<Bar>,
}

/// 백테스트 상세 항목 (와이어 키 단위).
#[derive(Debug, Clone, Serialize)]
pub struct BacktestDetail {
    /// 표시용 이름
    pub label: String,
    /// 수익률(%) - 2자리 반올림
    #[serde(with = "signal_core::serde_util::finite_f64")]
    pub total_return_pct: f64,
}

/// 백테스트 리포트: 요약 + 타임프레임별 상세.
#[derive(Debug, Clone, Serialize)]
pub struct BacktestReport {
    /// 전체 요약
    #[serde(flatten)]
    pub summary: BacktestSummary,
    /// 와이어 키("daily" 등)별 상세
    pub details: HashMap<String, BacktestDetail>,
}

/// 분석 실행 최종 리포트.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// 실행 식별자
    pub run_id: Uuid,
    /// 분석 대상 심볼
    pub symbol: String,
    /// 조회 범위
    pub range: DateRange,
    /// 리포트 생성 시각
    pub generated_at: DateTime<Utc>,
    /// 타임프레임별 신호
    pub signals: HashMap<Timeframe, TimeframeReport>,
    /// 종합 판단
    pub advice: CompositeAdvice,
    /// 백테스트 결과
    pub backtest: BacktestReport,
}

impl AnalysisReport {
    /// 오케스트레이션/종합/백테스트 결과로 리포트를 조립합니다.
    ///
    /// 백테스트 상세는 일봉 분석이 성공한 경우에만 포함됩니다.
    pub fn assemble(
        ctx: &RunContext,
        results: &HashMap<Timeframe, TimeframeResult>,
        advice: CompositeAdvice,
        summary: BacktestSummary,
    ) -> Self {
        let signals = results
            .iter()
            .map(|(&timeframe, result)| {
                (
                    timeframe,
                    TimeframeReport {
                        label: timeframe.label().to_string(),
                        kind: result.signal.kind,
                        strength: result.signal.strength,
                        risk_level: result.signal.risk_level,
                        recent_bars: result.recent_bars.clone(),
                    },
                )
            })
            .collect();

        let mut details = HashMap::new();
        if results.contains_key(&Timeframe::D1) {
            details.insert(
                Timeframe::D1.key().to_string(),
                BacktestDetail {
                    label: Timeframe::D1.label().to_string(),
                    total_return_pct: summary.total_return_pct,
                },
            );
        }

        Self {
            run_id: ctx.id,
            symbol: ctx.symbol.clone(),
            range: ctx.range,
            generated_at: Utc::now(),
            signals,
            advice,
            backtest: BacktestReport { summary, details },
        }
    }

    /// 리포트에 비유한 실수 값이 포함되어 있는지 검사합니다.
    ///
    /// 직렬화 자체는 문자열 대체로 항상 성공하지만, 상위 계층이 응답을
    /// degraded로 표시할 수 있도록 사전에 검사합니다.
    pub fn has_non_finite(&self) -> bool {
        let bar_bad = |b: &Bar| {
            ![b.open, b.high, b.low, b.close, b.volume]
                .iter()
                .all(|v| v.is_finite())
        };

        if self
            .signals
            .values()
            .any(|s| s.recent_bars.iter().any(bar_bad))
        {
            return true;
        }
        if !self.backtest.summary.total_return_pct.is_finite() {
            return true;
        }
        if self.backtest.summary.trades.iter().any(|t| {
            !t.price.is_finite()
                || t.profit_pct.is_some_and(|v| !v.is_finite())
                || t.profit_amount.is_some_and(|v| !v.is_finite())
        }) {
            return true;
        }
        self.backtest
            .details
            .values()
            .any(|d| !d.total_return_pct.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use signal_core::{IndicatorSeries, TimeframeSignal, VoteCounts};
    use std::sync::Arc;

    fn sample_ctx() -> RunContext {
        RunContext::new("005930", DateRange::parse("20230101", "20231231").unwrap())
    }

    fn sample_result(close: f64) -> TimeframeResult {
        let date = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        let bars = vec![Bar::new(date, close, close, close, close, 0.0)];
        TimeframeResult {
            timeframe: Timeframe::D1,
            signal: TimeframeSignal::new(
                SignalKind::Buy,
                SignalStrength::Moderate,
                RiskLevel::Medium,
            ),
            bars: Arc::new(bars.clone()),
            recent_bars: bars,
            indicators: IndicatorSeries::default(),
        }
    }

    fn sample_advice() -> CompositeAdvice {
        CompositeAdvice {
            overall: signal_core::OverallCall::Watch,
            strength: SignalStrength::Moderate,
            advice: "관망".to_string(),
            votes: VoteCounts {
                buy: 0,
                sell: 0,
                hold: 1,
                total: 1,
            },
            breakdown: HashMap::new(),
        }
    }

    #[test]
    fn test_assemble_includes_daily_detail() {
        let ctx = sample_ctx();
        let mut results = HashMap::new();
        results.insert(Timeframe::D1, sample_result(10.0));
        let summary = BacktestSummary::neutral(Decimal::from(1_000_000u64));

        let report = AnalysisReport::assemble(&ctx, &results, sample_advice(), summary);
        assert_eq!(report.symbol, "005930");
        assert_eq!(report.signals.len(), 1);
        assert!(report.backtest.details.contains_key("daily"));
        assert!(!report.has_non_finite());
    }

    #[test]
    fn test_no_daily_detail_without_daily_result() {
        let ctx = sample_ctx();
        let mut results = HashMap::new();
        let mut result = sample_result(10.0);
        result.timeframe = Timeframe::W1;
        results.insert(Timeframe::W1, result);
        let summary = BacktestSummary::neutral(Decimal::from(1_000_000u64));

        let report = AnalysisReport::assemble(&ctx, &results, sample_advice(), summary);
        assert!(report.backtest.details.is_empty());
    }

    #[test]
    fn test_non_finite_bar_detected() {
        let ctx = sample_ctx();
        let mut results = HashMap::new();
        results.insert(Timeframe::D1, sample_result(f64::NAN));
        let summary = BacktestSummary::neutral(Decimal::from(1_000_000u64));

        let report = AnalysisReport::assemble(&ctx, &results, sample_advice(), summary);
        assert!(report.has_non_finite());
    }
}
