//! 분석 대상 타임프레임 정의.
//!
//! 이 시스템은 고정된 5개의 타임프레임만 추적합니다.
//! 각 타임프레임은 독립적으로 분석되며, 집합은 런타임에 변하지 않습니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 캔들스틱 타임프레임.
///
/// 와이어 식별자(`key`)는 기존 API 계약("weekly", "daily", "60", "30", "15")을
/// 그대로 따릅니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Timeframe {
    /// 주봉
    W1,
    /// 일봉
    D1,
    /// 60분봉
    M60,
    /// 30분봉
    M30,
    /// 15분봉
    M15,
}

impl Timeframe {
    /// 추적 대상 전체 타임프레임을 고정된 순서로 반환합니다.
    pub const fn all() -> [Timeframe; 5] {
        [
            Timeframe::W1,
            Timeframe::D1,
            Timeframe::M60,
            Timeframe::M30,
            Timeframe::M15,
        ]
    }

    /// 거래 주석(decision) 생성 시 사용하는 고정 순서.
    ///
    /// 짧은 주기부터 긴 주기 순서로 평가합니다.
    pub const fn decision_order() -> [Timeframe; 5] {
        [
            Timeframe::M15,
            Timeframe::M30,
            Timeframe::M60,
            Timeframe::D1,
            Timeframe::W1,
        ]
    }

    /// 와이어 식별자를 반환합니다.
    pub fn key(&self) -> &'static str {
        match self {
            Timeframe::W1 => "weekly",
            Timeframe::D1 => "daily",
            Timeframe::M60 => "60",
            Timeframe::M30 => "30",
            Timeframe::M15 => "15",
        }
    }

    /// 표시용 이름을 반환합니다.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::W1 => "주봉",
            Timeframe::D1 => "일봉",
            Timeframe::M60 => "60분봉",
            Timeframe::M30 => "30분봉",
            Timeframe::M15 => "15분봉",
        }
    }

    /// 일중(분 단위) 타임프레임인지 확인합니다.
    pub fn is_intraday(&self) -> bool {
        matches!(self, Timeframe::M60 | Timeframe::M30 | Timeframe::M15)
    }

    /// 와이어 식별자에서 파싱합니다.
    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "weekly" => Some(Timeframe::W1),
            "daily" => Some(Timeframe::D1),
            "60" => Some(Timeframe::M60),
            "30" => Some(Timeframe::M30),
            "15" => Some(Timeframe::M15),
            _ => None,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| format!("Invalid timeframe: {}", s))
    }
}

impl From<Timeframe> for String {
    fn from(tf: Timeframe) -> Self {
        tf.key().to_string()
    }
}

impl TryFrom<String> for Timeframe {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_keys() {
        assert_eq!(Timeframe::W1.key(), "weekly");
        assert_eq!(Timeframe::M60.key(), "60");
        assert_eq!(Timeframe::from_key("daily"), Some(Timeframe::D1));
        assert_eq!(Timeframe::from_key("1h"), None);
    }

    #[test]
    fn test_fixed_sets() {
        assert_eq!(Timeframe::all().len(), 5);
        assert_eq!(
            Timeframe::decision_order().first(),
            Some(&Timeframe::M15)
        );
        assert_eq!(Timeframe::decision_order().last(), Some(&Timeframe::W1));
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&Timeframe::M30).unwrap();
        assert_eq!(json, "\"30\"");
        let tf: Timeframe = serde_json::from_str("\"weekly\"").unwrap();
        assert_eq!(tf, Timeframe::W1);
    }
}
