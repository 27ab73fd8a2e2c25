//! 포지션 상태 기계.
//!
//! 정합화된 단일 바 시리즈 위에서 MACD 크로스오버 전략을 재생합니다.
//! 상태는 `Flat`(초기)과 `Long` 두 가지이며, 마지막 바에서 남아 있는
//! 상태가 그대로 종료 상태입니다 (강제 청산 없음).

use chrono::NaiveDate;
use signal_core::{Bar, IndicatorSeries, Trade};

/// 포지션 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionState {
    /// 현금 (초기 상태)
    Flat,
    /// 보유
    Long,
}

/// 재생 전 정합화된 시리즈.
///
/// macd, signal, 종가, 날짜 배열을 공통 꼬리 길이
/// `min(len(macd), len(signal), len(bars))`로 잘라 맞춥니다.
/// 선행 바는 지표 워밍업에 소비되어 앞에서 버려집니다.
#[derive(Debug, Clone)]
pub struct ReconciledSeries {
    /// 바 타임스탬프
    pub dates: Vec<chrono::DateTime<chrono::Utc>>,
    /// 종가
    pub closes: Vec<f64>,
    /// MACD 라인
    pub macd: Vec<f64>,
    /// 시그널 라인
    pub signal: Vec<f64>,
}

impl ReconciledSeries {
    /// 바 시리즈와 지표를 공통 꼬리 길이로 정합화합니다.
    pub fn reconcile(bars: &[Bar], indicators: &IndicatorSeries) -> Self {
        let len = bars
            .len()
            .min(indicators.macd.len())
            .min(indicators.signal.len());

        let bar_tail = &bars[bars.len() - len..];
        Self {
            dates: bar_tail.iter().map(|b| b.date).collect(),
            closes: bar_tail.iter().map(|b| b.close).collect(),
            macd: indicators.macd[indicators.macd.len() - len..].to_vec(),
            signal: indicators.signal[indicators.signal.len() - len..].to_vec(),
        }
    }

    /// 정합화된 길이를 반환합니다.
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

/// 재생 결과.
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    /// 종료 상태
    pub final_state: PositionState,
    /// 바별 포지션 (0.0 = 현금, 1.0 = 보유)
    pub positions: Vec<f64>,
    /// 발생한 거래
    pub trades: Vec<Trade>,
    /// 전략 수익률 (소수, 예: 0.12 = 12%)
    pub strategy_return: f64,
}

impl ReplayOutcome {
    fn empty() -> Self {
        Self {
            final_state: PositionState::Flat,
            positions: Vec::new(),
            trades: Vec::new(),
            strategy_return: 0.0,
        }
    }
}

/// MACD 크로스오버 포지션 상태 기계.
#[derive(Debug, Default)]
pub struct PositionStateMachine;

impl PositionStateMachine {
    /// 시리즈를 재생하며 거래 이벤트와 전략 수익률을 산출합니다.
    ///
    /// 각 i ≥ 1에 대해 직전 바의 관계를 트리거 조건으로 평가합니다:
    /// - 골든 크로스: `macd[i-1] <= signal[i-1]` 이고 `macd[i] > signal[i]`
    ///   → `Long` 전환, `close[i]`에 매수 기록 (진입가 저장)
    /// - 데드 크로스: `macd[i-1] >= signal[i-1]` 이고 `macd[i] < signal[i]`
    ///   → `Flat` 전환, `close[i]`에 매도 기록 (직전 진입가 기준 수익률)
    /// - 그 외: 직전 상태 유지
    ///
    /// 같은 달력 날짜에 이미 거래가 발생했다면 해당 바는 직전 상태를
    /// 복사하고 새 거래를 내지 않습니다. 시리즈에 하루 여러 바가 섞여
    /// 들어와도 하루에 두 건의 거래가 나오지 않도록 하는 보호 규칙입니다.
    ///
    /// 전략 수익률은 바 i에 진입할 때 들고 있던 포지션이 그 바의
    /// 수익률을 얻는 방식입니다: Σ position[i-1] × pct_change[i].
    /// 레버리지/공매도/부분 매매 없는 롱 전용 전략입니다.
    pub fn replay(series: &ReconciledSeries) -> ReplayOutcome {
        let n = series.len();
        if n == 0 {
            return ReplayOutcome::empty();
        }

        let mut positions = vec![0.0_f64; n];
        let mut trades: Vec<Trade> = Vec::new();
        let mut entry_price: Option<f64> = None;
        let mut last_trade_day: Option<NaiveDate> = None;

        for i in 1..n {
            let current_day = series.dates[i].date_naive();

            if last_trade_day == Some(current_day) {
                positions[i] = positions[i - 1];
                continue;
            }

            let golden = series.macd[i - 1] <= series.signal[i - 1]
                && series.macd[i] > series.signal[i];
            let death = series.macd[i - 1] >= series.signal[i - 1]
                && series.macd[i] < series.signal[i];

            if golden {
                positions[i] = 1.0;
                entry_price = Some(series.closes[i]);
                trades.push(Trade::buy(series.dates[i], series.closes[i]));
                last_trade_day = Some(current_day);
            } else if death {
                positions[i] = 0.0;
                trades.push(Trade::sell(
                    series.dates[i],
                    series.closes[i],
                    entry_price.take(),
                ));
                last_trade_day = Some(current_day);
            } else {
                positions[i] = positions[i - 1];
            }
        }

        let mut strategy_return = 0.0_f64;
        for i in 1..n {
            let prev_close = series.closes[i - 1];
            if prev_close != 0.0 {
                strategy_return += positions[i - 1] * (series.closes[i] - prev_close) / prev_close;
            }
        }

        let final_state = if positions[n - 1] > 0.0 {
            PositionState::Long
        } else {
            PositionState::Flat
        };

        ReplayOutcome {
            final_state,
            positions,
            trades,
            strategy_return,
        }
    }
}
