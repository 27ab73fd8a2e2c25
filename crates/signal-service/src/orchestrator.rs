//! 기간 분석 오케스트레이터.
//!
//! 타임프레임별 분석을 제한된 동시성으로 팬아웃하고, 부분 실패를
//! 허용하며 결과를 팬인합니다. 개별 타임프레임의 조회 실패, 데이터
//! 부족, 타임아웃은 해당 타임프레임만 제외하고 계속 진행합니다.
//! 모든 타임프레임이 실패한 경우에만 에러를 반환합니다.

use futures::future::join_all;
use signal_core::{
    Analyzer, Bar, IndicatorSeries, OrchestratorConfig, SignalError, SignalResult, Timeframe,
    TimeframeSignal,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, info, warn};

use crate::context::RunContext;

/// 단일 타임프레임의 분석 결과.
#[derive(Debug, Clone)]
pub struct TimeframeResult {
    /// 타임프레임
    pub timeframe: Timeframe,
    /// 분류된 신호
    pub signal: TimeframeSignal,
    /// 전체 바 시리즈 (캐시와 공유)
    pub bars: Arc<Vec<Bar>>,
    /// 응답용 최근 바 (꼬리 구간)
    pub recent_bars: Vec<Bar>,
    /// 바 시리즈에 정렬된 지표
    pub indicators: IndicatorSeries,
}

/// 제한 동시성 타임프레임 팬아웃 오케스트레이터.
#[derive(Debug)]
pub struct PeriodAnalysisOrchestrator {
    config: OrchestratorConfig,
    recent_bars: usize,
}

impl PeriodAnalysisOrchestrator {
    /// 새 오케스트레이터를 생성합니다.
    pub fn new(config: OrchestratorConfig, recent_bars: usize) -> Self {
        Self {
            config,
            recent_bars,
        }
    }

    /// 타임프레임들을 병렬 분석하고 성공한 결과만 모아 반환합니다.
    ///
    /// 태스크는 세마포어로 동시 실행 수가 제한되며, 태스크별 타임아웃과
    /// 전체 마감 시한이 각각 적용됩니다. 전체 마감 시한이 지나면 남은
    /// 태스크를 중단하고 그때까지 발행된 결과만 사용합니다. 마감 이후
    /// 도착하는 결과는 실행과 함께 버려집니다.
    pub async fn run(
        &self,
        analyzer: Arc<dyn Analyzer>,
        ctx: Arc<RunContext>,
        timeframes: &[Timeframe],
    ) -> SignalResult<HashMap<Timeframe, TimeframeResult>> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));
        let slots: Arc<Mutex<HashMap<Timeframe, TimeframeResult>>> =
            Arc::new(Mutex::new(HashMap::new()));
        let task_timeout = Duration::from_secs(self.config.task_timeout_secs);

        let mut handles = Vec::with_capacity(timeframes.len());
        for &timeframe in timeframes {
            let analyzer = Arc::clone(&analyzer);
            let ctx = Arc::clone(&ctx);
            let semaphore = Arc::clone(&semaphore);
            let slots = Arc::clone(&slots);
            let recent = self.recent_bars;

            handles.push(tokio::spawn(async move {
                // 세마포어는 run 종료까지 닫히지 않음
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return;
                };
                let analysis = analyze_timeframe(analyzer, &ctx, timeframe, recent);
                let outcome = match tokio::time::timeout(task_timeout, analysis).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(SignalError::Timeout(format!(
                        "{} ({}초)",
                        timeframe,
                        task_timeout.as_secs()
                    ))),
                };
                match outcome {
                    Ok(result) => {
                        slots.lock().await.insert(timeframe, result);
                    }
                    Err(e) if e.is_partial() => {
                        warn!(timeframe = %timeframe, error = %e, "timeframe skipped");
                    }
                    Err(e) => {
                        warn!(timeframe = %timeframe, error = %e, "timeframe failed");
                    }
                }
            }));
        }

        let abort_handles: Vec<_> = handles.iter().map(|h| h.abort_handle()).collect();
        let overall = Duration::from_secs(self.config.overall_timeout_secs);
        match tokio::time::timeout(overall, join_all(handles)).await {
            Ok(joins) => {
                for join in joins {
                    if let Err(e) = join {
                        if !e.is_cancelled() {
                            let err = SignalError::Internal(e.to_string());
                            warn!(run_id = %ctx.id, error = %err, "analysis task aborted abnormally");
                        }
                    }
                }
            }
            Err(_) => {
                warn!(
                    run_id = %ctx.id,
                    deadline_secs = overall.as_secs(),
                    "overall deadline reached, abandoning pending timeframes"
                );
                for handle in abort_handles {
                    handle.abort();
                }
            }
        }

        // 이 시점의 스냅샷만 사용 - 이후 도착하는 결과는 버려짐
        let results = std::mem::take(&mut *slots.lock().await);
        if results.is_empty() {
            return Err(SignalError::AllTimeframesFailed(format!(
                "{} ({}개 타임프레임)",
                ctx.symbol,
                timeframes.len()
            )));
        }

        info!(
            run_id = %ctx.id,
            requested = timeframes.len(),
            succeeded = results.len(),
            "period analysis complete"
        );
        Ok(results)
    }
}

/// 단일 타임프레임 분석: 캐시 조회 → 조회 → 지표 → 분류.
///
/// 실패는 부분 진행 가능한 `SignalError`로 수렴하며 호출자 쪽에서
/// 해당 타임프레임만 제외됩니다.
async fn analyze_timeframe(
    analyzer: Arc<dyn Analyzer>,
    ctx: &RunContext,
    timeframe: Timeframe,
    recent: usize,
) -> SignalResult<TimeframeResult> {
    let range = ctx.range;

    let bars = match ctx.cached_bars(timeframe, range).await {
        Some(bars) => {
            debug!(timeframe = %timeframe, bars = bars.len(), "cache hit");
            bars
        }
        None => match analyzer.fetch(&ctx.symbol, timeframe, range).await {
            Ok(bars) if bars.is_empty() => {
                return Err(SignalError::DataUnavailable(format!(
                    "{}: 조회 결과 없음",
                    timeframe
                )));
            }
            Ok(bars) => ctx.store_bars(timeframe, range, bars).await,
            Err(e) => {
                return Err(SignalError::DataUnavailable(format!("{}: {}", timeframe, e)));
            }
        },
    };

    let indicators = analyzer.indicators(&bars);
    let Some(signal) = analyzer.classify(&bars, &indicators) else {
        return Err(SignalError::DataUnavailable(format!(
            "{}: 분류에 필요한 데이터 부족 ({}개 바)",
            timeframe,
            bars.len()
        )));
    };

    let recent_bars = bars[bars.len().saturating_sub(recent)..].to_vec();
    Ok(TimeframeResult {
        timeframe,
        signal,
        bars,
        recent_bars,
        indicators,
    })
}
