//! 분석 서비스.
//!
//! 날짜 범위 검증 → 실행 컨텍스트 생성 → 타임프레임 팬아웃 →
//! 신호 종합 → 일봉 백테스트 → 거래 주석 → 리포트 조립까지의
//! 전체 파이프라인을 연결합니다.

use signal_analytics::backtest::{BacktestConfig, BacktestEngine, TradeAnnotator};
use signal_analytics::SignalAggregator;
use signal_core::{
    analysis_span, AnalysisConfig, Analyzer, BacktestSummary, Bar, DateRange, SignalError,
    SignalResult, Timeframe, TimeframeSignal,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, Instrument};

use crate::context::RunContext;
use crate::orchestrator::PeriodAnalysisOrchestrator;
use crate::report::AnalysisReport;

/// 다중 타임프레임 분석 서비스.
pub struct AnalysisService {
    config: AnalysisConfig,
    analyzer: Arc<dyn Analyzer>,
    orchestrator: PeriodAnalysisOrchestrator,
    engine: BacktestEngine,
    annotator: TradeAnnotator,
}

impl fmt::Debug for AnalysisService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisService")
            .field("config", &self.config)
            .field("orchestrator", &self.orchestrator)
            .finish_non_exhaustive()
    }
}

impl AnalysisService {
    /// 새 분석 서비스를 생성합니다.
    ///
    /// 설정 검증에 실패하면 `SignalError::Config`를 반환합니다.
    pub fn new(config: AnalysisConfig, analyzer: Arc<dyn Analyzer>) -> SignalResult<Self> {
        config.validate().map_err(SignalError::Config)?;
        let engine = BacktestEngine::new(BacktestConfig::from_settings(&config.backtest))
            .map_err(|e| SignalError::Config(e.to_string()))?;
        let orchestrator =
            PeriodAnalysisOrchestrator::new(config.orchestrator.clone(), config.data.recent_bars);

        Ok(Self {
            config,
            analyzer,
            orchestrator,
            engine,
            annotator: TradeAnnotator::new(),
        })
    }

    /// 심볼에 대한 전체 분석을 실행합니다.
    ///
    /// 범위를 지정하지 않으면 설정된 기본 조회 기간(최근 3년)을
    /// 사용합니다. 범위 검증은 오케스트레이션 시작 전에 끝나므로,
    /// 잘못된 범위로는 어떤 조회도 발생하지 않습니다.
    pub async fn analyze(
        &self,
        symbol: &str,
        range: Option<DateRange>,
    ) -> SignalResult<AnalysisReport> {
        let range = range.unwrap_or_else(|| DateRange::last_days(self.config.data.lookback_days));
        let ctx = Arc::new(RunContext::new(symbol, range));
        info!(run_id = %ctx.id, symbol, range = %range, "analysis run started");

        let results = self
            .orchestrator
            .run(Arc::clone(&self.analyzer), Arc::clone(&ctx), &Timeframe::all())
            .instrument(analysis_span!("period_analysis", symbol, ctx.id))
            .await?;

        let signals: HashMap<Timeframe, TimeframeSignal> =
            results.iter().map(|(&tf, r)| (tf, r.signal)).collect();
        let advice = SignalAggregator::aggregate(&signals);

        let mut summary = match results.get(&Timeframe::D1) {
            Some(d1) => self.engine.run(&d1.bars, &d1.indicators),
            None => {
                debug!(run_id = %ctx.id, "no daily series, neutral backtest");
                BacktestSummary::neutral(self.engine.initial_capital())
            }
        };

        let bars_by_tf: HashMap<Timeframe, Vec<Bar>> = results
            .iter()
            .map(|(&tf, r)| (tf, r.bars.as_ref().clone()))
            .collect();
        self.annotator.annotate(&mut summary.trades, &bars_by_tf);

        info!(
            run_id = %ctx.id,
            timeframes = results.len(),
            overall = ?advice.overall,
            trades = summary.trades.len(),
            "analysis run complete"
        );
        Ok(AnalysisReport::assemble(&ctx, &results, advice, summary))
    }
}
