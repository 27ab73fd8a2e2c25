//! 거래별 타임프레임 판단 주석.
//!
//! 백테스트에서 발생한 각 거래에 대해, 거래일 당일 종가까지의 데이터만
//! 사용해 다른 타임프레임들이 그 시점에 내렸을 판단을 재구성합니다.
//! 거래일 이후의 바는 절대 포함되지 않습니다 (룩어헤드 금지).

use chrono::{Days, NaiveTime};
use signal_core::{Bar, SignalKind, Timeframe, TimeframeDecision, Trade};
use std::collections::HashMap;
use tracing::trace;

use crate::indicators::{MacdParams, TrendIndicators};

/// MACD 대비 시그널 격차가 이 비율을 넘으면 강한 신호로 분류합니다.
const STRONG_DIVERGENCE_RATIO: f64 = 0.3;

/// 거래 주석기.
#[derive(Debug, Default)]
pub struct TradeAnnotator {
    params: MacdParams,
    indicators: TrendIndicators,
}

impl TradeAnnotator {
    /// 기본 MACD 파라미터(12/26/9)로 주석기를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 각 거래에 타임프레임별 판단을 덧붙입니다.
    ///
    /// `bars_by_timeframe`에 없는 타임프레임은 건너뜁니다. 판단 순서는
    /// 짧은 주기에서 긴 주기 방향으로 고정되어 있습니다.
    pub fn annotate(
        &self,
        trades: &mut [Trade],
        bars_by_timeframe: &HashMap<Timeframe, Vec<Bar>>,
    ) {
        for trade in trades.iter_mut() {
            // 거래일 다음 날 자정 이전 = 거래일 당일까지
            let Some(next_day) = trade.calendar_date().checked_add_days(Days::new(1)) else {
                continue;
            };
            let day_end = next_day.and_time(NaiveTime::MIN).and_utc();

            let mut decisions = Vec::new();
            for timeframe in Timeframe::decision_order() {
                let Some(bars) = bars_by_timeframe.get(&timeframe) else {
                    continue;
                };
                let closes: Vec<f64> = bars
                    .iter()
                    .filter(|b| b.date < day_end)
                    .map(|b| b.close)
                    .collect();

                let signal = self.classify_at(&closes);
                trace!(
                    timeframe = %timeframe,
                    closes = closes.len(),
                    signal = ?signal,
                    "trade-time decision"
                );
                decisions.push(TimeframeDecision { timeframe, signal });
            }
            trade.decisions = decisions;
        }
    }

    /// 종가 시리즈 끝 시점의 MACD 상태를 신호로 분류합니다.
    ///
    /// 시그널 라인까지 계산할 수 없는 짧은 시리즈는 관망입니다.
    /// MACD-시그널 격차가 시그널 절대값의 30%를 넘으면 강한 신호로
    /// 승격됩니다.
    fn classify_at(&self, closes: &[f64]) -> SignalKind {
        if closes.len() < self.params.min_required() {
            return SignalKind::Hold;
        }
        let Ok(series) = self.indicators.macd(closes, self.params) else {
            return SignalKind::Hold;
        };
        let Some((macd, signal)) = series.last() else {
            return SignalKind::Hold;
        };

        let diff = macd - signal;
        let strong = diff.abs() > STRONG_DIVERGENCE_RATIO * signal.abs();
        if diff > 0.0 {
            if strong {
                SignalKind::StrongBuy
            } else {
                SignalKind::Buy
            }
        } else if diff < 0.0 {
            if strong {
                SignalKind::StrongSell
            } else {
                SignalKind::Sell
            }
        } else {
            SignalKind::Hold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn daily_bars(closes: &[f64]) -> Vec<Bar> {
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(start + Duration::days(i as i64), c, c, c, c, 0.0))
            .collect()
    }

    #[test]
    fn test_short_series_is_hold() {
        let annotator = TradeAnnotator::new();
        let closes = vec![10.0; 34];
        assert_eq!(annotator.classify_at(&closes), SignalKind::Hold);
    }

    /// 횡보 후 상승 전환 시리즈.
    ///
    /// 등차수열은 두 EMA가 같은 지연 상태로 수렴해 MACD와 시그널의
    /// 차이가 부동소수점 잡음 수준이 되므로, 분류 테스트에는 전환점이
    /// 있는 시리즈를 사용합니다.
    fn flat_then_rising(flat: usize, rising: usize) -> Vec<f64> {
        let mut closes = vec![10.0; flat];
        closes.extend((1..=rising).map(|i| 10.0 + 0.5 * i as f64));
        closes
    }

    fn flat_then_falling(flat: usize, falling: usize) -> Vec<f64> {
        let mut closes = vec![100.0; flat];
        closes.extend((1..=falling).map(|i| 100.0 - 0.5 * i as f64));
        closes
    }

    #[test]
    fn test_upturn_classified_as_buy_side() {
        let annotator = TradeAnnotator::new();
        let closes = flat_then_rising(40, 40);
        let signal = annotator.classify_at(&closes);
        assert!(signal.is_buy(), "got {signal:?}");
    }

    #[test]
    fn test_downturn_classified_as_sell_side() {
        let annotator = TradeAnnotator::new();
        let closes = flat_then_falling(40, 40);
        let signal = annotator.classify_at(&closes);
        assert!(signal.is_sell(), "got {signal:?}");
    }

    #[test]
    fn test_annotate_uses_only_bars_up_to_trade_day() {
        let annotator = TradeAnnotator::new();

        // 거래일 이전은 횡보 후 하락, 이후는 급등하는 일봉 시리즈
        let mut closes = flat_then_falling(20, 40);
        let bottom = *closes.last().unwrap();
        closes.extend((1..=40).map(|i| bottom + 5.0 * i as f64));
        let bars = daily_bars(&closes);

        // 거래는 하락 구간의 끝(60번째 바)에 위치
        let trade_date = bars[59].date;
        let mut trades = vec![Trade::buy(trade_date, bars[59].close)];

        let mut by_tf = HashMap::new();
        by_tf.insert(Timeframe::D1, bars);
        annotator.annotate(&mut trades, &by_tf);

        assert_eq!(trades[0].decisions.len(), 1);
        assert_eq!(trades[0].decisions[0].timeframe, Timeframe::D1);
        // 이후의 급등이 보였다면 매수 쪽이었을 것
        assert!(trades[0].decisions[0].signal.is_sell());
    }

    #[test]
    fn test_missing_timeframe_skipped() {
        let annotator = TradeAnnotator::new();
        let mut trades = vec![Trade::buy(
            Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
            10.0,
        )];
        let by_tf: HashMap<Timeframe, Vec<Bar>> = HashMap::new();
        annotator.annotate(&mut trades, &by_tf);
        assert!(trades[0].decisions.is_empty());
    }

    #[test]
    fn test_decision_order_is_short_to_long() {
        let annotator = TradeAnnotator::new();
        let closes: Vec<f64> = (0..50).map(|i| 10.0 + i as f64).collect();
        let bars = daily_bars(&closes);
        let mut trades = vec![Trade::buy(bars[49].date, bars[49].close)];

        let mut by_tf = HashMap::new();
        for tf in Timeframe::all() {
            by_tf.insert(tf, bars.clone());
        }
        annotator.annotate(&mut trades, &by_tf);

        let order: Vec<Timeframe> = trades[0].decisions.iter().map(|d| d.timeframe).collect();
        assert_eq!(order, Timeframe::decision_order().to_vec());
    }
}
