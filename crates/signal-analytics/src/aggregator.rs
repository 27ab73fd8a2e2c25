//! 타임프레임 신호 종합.
//!
//! 타임프레임별 분류를 하나의 종합 매매 판단으로 결합합니다.
//! 순수 함수이며 I/O가 없고 입력이 같으면 결과가 항상 같습니다.

use signal_core::{
    CompositeAdvice, OverallCall, PeriodAssessment, SignalStrength, Timeframe, TimeframeSignal,
    VoteCounts,
};
use std::collections::HashMap;

/// 강한 신호로 판정하는 최소 동의 타임프레임 수.
const STRONG_VOTE_THRESHOLD: usize = 3;

/// 신호 종합기.
#[derive(Debug, Default)]
pub struct SignalAggregator;

impl SignalAggregator {
    /// 타임프레임별 분류를 종합 판단으로 결합합니다.
    ///
    /// 각 분류를 매수/매도/관망 버킷에 넣고, 다른 두 버킷 모두보다
    /// 엄격히 많은 버킷이 있을 때만 해당 방향을 채택합니다. 동률을
    /// 포함해 과반 버킷이 없으면 관망입니다. 투표 수의 합은 항상
    /// 분류에 성공한 타임프레임 수와 같습니다.
    pub fn aggregate(results: &HashMap<Timeframe, TimeframeSignal>) -> CompositeAdvice {
        let mut buy = 0usize;
        let mut sell = 0usize;
        let mut hold = 0usize;
        let mut breakdown = HashMap::with_capacity(results.len());

        for (&timeframe, signal) in results {
            if signal.kind.is_buy() {
                buy += 1;
            } else if signal.kind.is_sell() {
                sell += 1;
            } else {
                hold += 1;
            }

            breakdown.insert(
                timeframe,
                PeriodAssessment {
                    label: timeframe.label().to_string(),
                    kind: signal.kind,
                    strength: signal.strength,
                    risk_level: signal.risk_level,
                },
            );
        }

        let total = results.len();
        let votes = VoteCounts {
            buy,
            sell,
            hold,
            total,
        };

        let (overall, strength, advice) = if buy > sell && buy > hold {
            (
                OverallCall::Buy,
                strength_for(buy),
                format!(
                    "{}개 타임프레임 중 {}개가 매수 신호입니다. 매수를 고려하세요.",
                    total, buy
                ),
            )
        } else if sell > buy && sell > hold {
            (
                OverallCall::Sell,
                strength_for(sell),
                format!(
                    "{}개 타임프레임 중 {}개가 매도 신호입니다. 매도를 고려하세요.",
                    total, sell
                ),
            )
        } else {
            (
                OverallCall::Watch,
                SignalStrength::Moderate,
                "타임프레임 간 신호가 일치하지 않습니다. 더 명확한 신호를 기다리세요."
                    .to_string(),
            )
        };

        CompositeAdvice {
            overall,
            strength,
            advice,
            votes,
            breakdown,
        }
    }
}

fn strength_for(winning_count: usize) -> SignalStrength {
    if winning_count >= STRONG_VOTE_THRESHOLD {
        SignalStrength::Strong
    } else {
        SignalStrength::Moderate
    }
}
