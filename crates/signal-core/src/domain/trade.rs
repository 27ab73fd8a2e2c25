//! 거래 기록 및 백테스트 요약.
//!
//! 백테스트 상태 기계가 내보내는 거래 이벤트와, 거래별로 사후에
//! 덧붙여지는 타임프레임 판단 스냅샷, 그리고 전체 요약을 정의합니다.

use crate::domain::signal::SignalKind;
use crate::types::Timeframe;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 거래 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeKind {
    /// 매수 (골든 크로스)
    Buy,
    /// 매도 (데드 크로스)
    Sell,
}

/// 거래 시점에 다른 타임프레임이 내린 판단.
///
/// 거래일 당일 종가까지의 데이터만 사용해 계산되며, 거래일 이후의
/// 정보는 절대 포함되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeframeDecision {
    /// 타임프레임
    pub timeframe: Timeframe,
    /// 해당 시점의 신호
    pub signal: SignalKind,
}

/// 백테스트 중 발생한 단일 거래.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    /// 거래 종류
    pub kind: TradeKind,
    /// 거래 발생 시각 (해당 바의 타임스탬프)
    pub date: DateTime<Utc>,
    /// 체결가 (해당 바의 종가)
    #[serde(with = "crate::serde_util::finite_f64")]
    pub price: f64,
    /// 실현 수익률(%) - 매도이면서 진입가가 있는 경우에만
    #[serde(
        default,
        with = "crate::serde_util::finite_f64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub profit_pct: Option<f64>,
    /// 실현 손익 금액 - 매도이면서 진입가가 있는 경우에만
    #[serde(
        default,
        with = "crate::serde_util::finite_f64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub profit_amount: Option<f64>,
    /// 거래 시점의 타임프레임별 판단 (사후 주석)
    #[serde(default)]
    pub decisions: Vec<TimeframeDecision>,
}

impl Trade {
    /// 매수 거래를 생성합니다.
    pub fn buy(date: DateTime<Utc>, price: f64) -> Self {
        Self {
            kind: TradeKind::Buy,
            date,
            price,
            profit_pct: None,
            profit_amount: None,
            decisions: Vec::new(),
        }
    }

    /// 매도 거래를 생성합니다.
    ///
    /// `entry_price`가 있으면 실현 수익률과 손익 금액을 2자리로
    /// 반올림해 기록합니다. 진입가 없이 발생한 매도(시리즈 첫 크로스가
    /// 데드 크로스인 경우)는 수익 수치를 갖지 않습니다.
    pub fn sell(date: DateTime<Utc>, price: f64, entry_price: Option<f64>) -> Self {
        let (profit_pct, profit_amount) = match entry_price {
            Some(entry) if entry != 0.0 => {
                let pct = (price - entry) / entry * 100.0;
                (Some(round2(pct)), Some(round2(price - entry)))
            }
            _ => (None, None),
        };
        Self {
            kind: TradeKind::Sell,
            date,
            price,
            profit_pct,
            profit_amount,
            decisions: Vec::new(),
        }
    }

    /// 거래가 속한 달력 날짜를 반환합니다.
    pub fn calendar_date(&self) -> chrono::NaiveDate {
        self.date.date_naive()
    }
}

/// 백테스트 전체 요약.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestSummary {
    /// 시작 자본금
    pub capital_start: Decimal,
    /// 종료 자본금
    pub capital_end: Decimal,
    /// 전체 수익률(%) - 2자리 반올림
    #[serde(with = "crate::serde_util::finite_f64")]
    pub total_return_pct: f64,
    /// 손익 금액
    pub profit_amount: Decimal,
    /// 거래 내역
    pub trades: Vec<Trade>,
}

impl BacktestSummary {
    /// 일봉 데이터가 없을 때의 중립 요약.
    ///
    /// 시작 자본 == 종료 자본, 수익률 0, 거래 없음. 에러가 아니라
    /// 유효한 결과입니다.
    pub fn neutral(initial_capital: Decimal) -> Self {
        Self {
            capital_start: initial_capital,
            capital_end: initial_capital,
            total_return_pct: 0.0,
            profit_amount: Decimal::ZERO,
            trades: Vec::new(),
        }
    }
}

/// 2자리 반올림 (호출자 노출용 수치 전용).
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
