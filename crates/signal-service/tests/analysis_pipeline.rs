//! 분석 서비스 종단 통합 테스트.
//!
//! 실제 지표 계산을 수행하는 모의 Analyzer로 조회 → 분류 → 종합 →
//! 백테스트 → 주석 → 리포트 조립까지의 전체 경로를 검증합니다.

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use signal_analytics::indicators::{MacdParams, TrendIndicators};
use signal_core::{
    AnalysisConfig, Analyzer, AnalyzerError, Bar, DateRange, IndicatorSeries, RiskLevel,
    SignalError, SignalKind, SignalStrength, Timeframe, TimeframeSignal,
};
use signal_service::{to_safe_json, AnalysisService};
use std::sync::Arc;

/// 하락 후 상승하는 V자 일봉 시리즈 (골든 크로스 발생).
fn v_shaped_bars(n_down: usize, n_up: usize) -> Vec<Bar> {
    let start = Utc.with_ymd_and_hms(2022, 1, 3, 0, 0, 0).unwrap();
    let mut closes: Vec<f64> = (0..n_down).map(|i| 100.0 - 0.5 * i as f64).collect();
    let bottom = closes.last().copied().unwrap_or(100.0);
    closes.extend((0..n_up).map(|i| bottom + 0.8 * i as f64));
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            Bar::new(start + Duration::days(i as i64), c, c + 1.0, c - 1.0, c, 1000.0)
        })
        .collect()
}

/// 실제 MACD 계산을 수행하는 모의 Analyzer.
///
/// 15분봉은 워밍업에 못 미치는 짧은 시리즈를 반환해 분류 불가
/// 경로를 함께 검증합니다.
struct PipelineAnalyzer;

#[async_trait]
impl Analyzer for PipelineAnalyzer {
    async fn fetch(
        &self,
        _symbol: &str,
        timeframe: Timeframe,
        _range: DateRange,
    ) -> Result<Vec<Bar>, AnalyzerError> {
        if timeframe == Timeframe::M15 {
            return Ok(v_shaped_bars(5, 5));
        }
        Ok(v_shaped_bars(60, 60))
    }

    fn indicators(&self, bars: &[Bar]) -> IndicatorSeries {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        match TrendIndicators::new().macd(&closes, MacdParams::default()) {
            Ok(series) => IndicatorSeries::new(series.macd, series.signal),
            Err(_) => IndicatorSeries::default(),
        }
    }

    fn classify(&self, _bars: &[Bar], indicators: &IndicatorSeries) -> Option<TimeframeSignal> {
        if indicators.is_empty() {
            return None;
        }
        let macd = *indicators.macd.last()?;
        let signal = *indicators.signal.last()?;
        let kind = if macd > signal {
            SignalKind::Buy
        } else if macd < signal {
            SignalKind::Sell
        } else {
            SignalKind::Hold
        };
        Some(TimeframeSignal::new(
            kind,
            SignalStrength::Moderate,
            RiskLevel::Medium,
        ))
    }
}

fn service() -> AnalysisService {
    AnalysisService::new(AnalysisConfig::default(), Arc::new(PipelineAnalyzer))
        .expect("valid default config")
}

#[tokio::test]
async fn test_end_to_end_analysis() {
    let range = DateRange::parse("20220101", "20221231").unwrap();
    let report = service().analyze("005930", Some(range)).await.unwrap();

    assert_eq!(report.symbol, "005930");
    assert_eq!(report.range, range);

    // 15분봉은 분류 불가로 제외, 나머지 4개만 포함
    assert_eq!(report.signals.len(), 4);
    assert!(!report.signals.contains_key(&Timeframe::M15));

    // 투표 수는 분류에 성공한 타임프레임 수와 일치
    let votes = &report.advice.votes;
    assert_eq!(votes.buy + votes.sell + votes.hold, 4);
    assert_eq!(votes.total, 4);

    // V자 반등 시리즈에서 일봉 백테스트는 매수 거래를 만든다
    let summary = &report.backtest.summary;
    assert!(!summary.trades.is_empty());
    assert_eq!(
        summary.profit_amount,
        summary.capital_end - summary.capital_start
    );
    assert!(report.backtest.details.contains_key("daily"));

    // 각 거래는 바가 있는 타임프레임의 판단 주석을 가진다
    for trade in &summary.trades {
        assert!(!trade.decisions.is_empty());
        for decision in &trade.decisions {
            assert!(Timeframe::all().contains(&decision.timeframe));
        }
    }
}

#[tokio::test]
async fn test_safe_json_response_shape() {
    let range = DateRange::parse("20220101", "20221231").unwrap();
    let report = service().analyze("005930", Some(range)).await.unwrap();
    let value = to_safe_json(&report).unwrap();

    assert_eq!(value["degraded"], serde_json::Value::Bool(false));
    assert!(value["signals"]["daily"]["recent_bars"].is_array());
    assert!(value["advice"]["votes"]["total"].is_number());
    assert!(value["backtest"]["trades"].is_array());
}

#[tokio::test]
async fn test_default_range_covers_three_years() {
    let report = service().analyze("005930", None).await.unwrap();
    assert_eq!(report.range.num_days(), 1096);
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let mut config = AnalysisConfig::default();
    config.orchestrator.max_concurrency = 0;
    let err = AnalysisService::new(config, Arc::new(PipelineAnalyzer)).unwrap_err();
    assert!(matches!(err, SignalError::Config(_)));
}

/// 조회가 전부 실패하면 분석 전체가 실패합니다.
struct FailingAnalyzer;

#[async_trait]
impl Analyzer for FailingAnalyzer {
    async fn fetch(
        &self,
        _symbol: &str,
        _timeframe: Timeframe,
        _range: DateRange,
    ) -> Result<Vec<Bar>, AnalyzerError> {
        Err(AnalyzerError::Fetch("조회 불가".to_string()))
    }

    fn indicators(&self, _bars: &[Bar]) -> IndicatorSeries {
        IndicatorSeries::default()
    }

    fn classify(&self, _bars: &[Bar], _indicators: &IndicatorSeries) -> Option<TimeframeSignal> {
        None
    }
}

#[tokio::test]
async fn test_all_fetch_failures_surface_error() {
    let service = AnalysisService::new(AnalysisConfig::default(), Arc::new(FailingAnalyzer))
        .unwrap();
    let err = service.analyze("005930", None).await.unwrap_err();
    assert!(matches!(err, SignalError::AllTimeframesFailed(_)));
}
