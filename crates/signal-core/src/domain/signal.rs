//! 신호 분류 및 종합 판단 타입.
//!
//! 이 모듈은 타임프레임별 분류와 이를 하나의 종합 판단으로 결합한
//! 결과 타입을 정의합니다:
//! - `SignalKind` - 신호 종류 (강한 매수 ~ 강한 매도)
//! - `TimeframeSignal` - 단일 타임프레임의 분류 결과
//! - `CompositeAdvice` - 전체 타임프레임을 종합한 판단
//!
//! 분류는 문자열 토큰 매칭이 아니라 명시적 열거형으로 표현됩니다.

use crate::types::Timeframe;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 신호 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// 강한 매수
    StrongBuy,
    /// 매수
    Buy,
    /// 관망
    Hold,
    /// 매도
    Sell,
    /// 강한 매도
    StrongSell,
}

impl SignalKind {
    /// 매수 계열 신호인지 확인합니다.
    pub fn is_buy(&self) -> bool {
        matches!(self, SignalKind::StrongBuy | SignalKind::Buy)
    }

    /// 매도 계열 신호인지 확인합니다.
    pub fn is_sell(&self) -> bool {
        matches!(self, SignalKind::StrongSell | SignalKind::Sell)
    }

    /// 표시용 이름을 반환합니다.
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::StrongBuy => "강한 매수",
            SignalKind::Buy => "매수",
            SignalKind::Hold => "관망",
            SignalKind::Sell => "매도",
            SignalKind::StrongSell => "강한 매도",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::StrongBuy => write!(f, "strong_buy"),
            SignalKind::Buy => write!(f, "buy"),
            SignalKind::Hold => write!(f, "hold"),
            SignalKind::Sell => write!(f, "sell"),
            SignalKind::StrongSell => write!(f, "strong_sell"),
        }
    }
}

/// 신호 강도.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalStrength {
    /// 강함
    Strong,
    /// 중간
    Moderate,
}

impl SignalStrength {
    /// 표시용 이름을 반환합니다.
    pub fn label(&self) -> &'static str {
        match self {
            SignalStrength::Strong => "강",
            SignalStrength::Moderate => "중간",
        }
    }
}

/// 리스크 수준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// 낮음
    Low,
    /// 중간
    Medium,
    /// 높음
    High,
}

impl Default for RiskLevel {
    fn default() -> Self {
        Self::Medium
    }
}

/// 단일 타임프레임의 분류 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeframeSignal {
    /// 신호 종류
    pub kind: SignalKind,
    /// 신호 강도
    pub strength: SignalStrength,
    /// 리스크 수준
    pub risk_level: RiskLevel,
}

impl TimeframeSignal {
    /// 새 분류 결과를 생성합니다.
    pub fn new(kind: SignalKind, strength: SignalStrength, risk_level: RiskLevel) -> Self {
        Self {
            kind,
            strength,
            risk_level,
        }
    }
}

/// 종합 판단의 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallCall {
    /// 매수
    Buy,
    /// 매도
    Sell,
    /// 관망
    Watch,
}

impl OverallCall {
    /// 표시용 이름을 반환합니다.
    pub fn label(&self) -> &'static str {
        match self {
            OverallCall::Buy => "매수",
            OverallCall::Sell => "매도",
            OverallCall::Watch => "관망",
        }
    }
}

/// 버킷별 투표 수.
///
/// `total`은 분류에 성공한 타임프레임 수와 항상 일치합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCounts {
    /// 매수 투표 수
    pub buy: usize,
    /// 매도 투표 수
    pub sell: usize,
    /// 관망 투표 수
    pub hold: usize,
    /// 전체 타임프레임 수
    pub total: usize,
}

/// 타임프레임별 판단 내역.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodAssessment {
    /// 타임프레임 표시 이름
    pub label: String,
    /// 신호 종류
    pub kind: SignalKind,
    /// 신호 강도
    pub strength: SignalStrength,
    /// 리스크 수준
    pub risk_level: RiskLevel,
}

/// 전체 타임프레임을 종합한 매매 판단.
///
/// 순수하게 타임프레임별 분류에서 유도되는 값이며 독립적인
/// 수명 주기를 갖지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeAdvice {
    /// 종합 방향
    pub overall: OverallCall,
    /// 신호 강도
    pub strength: SignalStrength,
    /// 사람이 읽을 수 있는 요약 문장
    pub advice: String,
    /// 버킷별 투표 수
    pub votes: VoteCounts,
    /// 타임프레임별 판단 내역
    pub breakdown: HashMap<Timeframe, PeriodAssessment>,
}
