//! 시장 데이터 구조체.
//!
//! 이 모듈은 시장 데이터 관련 타입을 정의합니다:
//! - `Bar` - OHLCV 캔들 데이터
//! - `IndicatorSeries` - 바 시리즈에 정렬된 MACD/시그널 평행 배열
//!
//! 가격은 와이어 계약에 따라 64비트 부동소수점입니다.
//! `Bar`는 Analyzer 협력자가 생성하며 반환 이후 불변입니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV 캔들 데이터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// 바 타임스탬프 (일봉/주봉은 해당일 0시)
    pub date: DateTime<Utc>,
    /// 시가
    #[serde(with = "crate::serde_util::finite_f64")]
    pub open: f64,
    /// 고가
    #[serde(with = "crate::serde_util::finite_f64")]
    pub high: f64,
    /// 저가
    #[serde(with = "crate::serde_util::finite_f64")]
    pub low: f64,
    /// 종가
    #[serde(with = "crate::serde_util::finite_f64")]
    pub close: f64,
    /// 거래량
    #[serde(with = "crate::serde_util::finite_f64")]
    pub volume: f64,
}

impl Bar {
    /// 새 바를 생성합니다.
    pub fn new(date: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 양봉(종가 > 시가)인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// 이 바가 속한 달력 날짜를 반환합니다.
    pub fn calendar_date(&self) -> chrono::NaiveDate {
        self.date.date_naive()
    }
}

/// 바 시리즈에 정렬된 지표 평행 배열.
///
/// 두 배열은 항상 같은 길이이며, 지표 워밍업으로 인해 바 시리즈보다
/// 짧을 수 있습니다. 이 경우 시리즈의 꼬리(최신 구간)에 정렬됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorSeries {
    /// MACD 라인
    pub macd: Vec<f64>,
    /// 시그널 라인
    pub signal: Vec<f64>,
}

impl IndicatorSeries {
    /// 새 지표 시리즈를 생성합니다.
    ///
    /// 두 배열의 길이가 다르면 짧은 쪽의 꼬리 길이로 잘라 맞춥니다.
    pub fn new(mut macd: Vec<f64>, mut signal: Vec<f64>) -> Self {
        let len = macd.len().min(signal.len());
        macd.drain(..macd.len() - len);
        signal.drain(..signal.len() - len);
        Self { macd, signal }
    }

    /// 지표 값 개수를 반환합니다.
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    /// 지표 값이 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}
