//! 추세 지표 (Trend Indicators).
//!
//! 이동평균 기반의 추세 지표를 제공합니다.
//! - EMA (Exponential Moving Average)
//! - MACD (Moving Average Convergence Divergence)
//!
//! 가격 입력은 와이어 계약에 따라 `f64`입니다. 반환 배열은 워밍업으로
//! 소비된 선행 구간이 제거된 상태로, 입력 시리즈의 꼬리에 정렬됩니다.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 지표 계산 오류.
#[derive(Debug, Clone, Error)]
pub enum IndicatorError {
    /// 데이터 부족
    #[error("데이터 부족: 필요={required}, 제공={provided}")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),
}

/// 지표 계산 Result 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// EMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self { period: 12 }
    }
}

/// MACD 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdParams {
    /// 단기 EMA 기간 (기본: 12).
    pub fast_period: usize,
    /// 장기 EMA 기간 (기본: 26).
    pub slow_period: usize,
    /// 시그널 라인 기간 (기본: 9).
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl MacdParams {
    /// 시그널 라인까지 계산하는 데 필요한 최소 가격 개수.
    ///
    /// 기본 파라미터(12/26/9)에서는 35입니다.
    pub fn min_required(&self) -> usize {
        self.slow_period + self.signal_period
    }
}

/// MACD 계산 결과.
///
/// `macd`와 `signal`은 같은 길이의 평행 배열이며 입력 가격 시리즈의
/// 꼬리에 정렬됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdSeries {
    /// MACD 라인 (단기 EMA - 장기 EMA)
    pub macd: Vec<f64>,
    /// 시그널 라인 (MACD 라인의 EMA)
    pub signal: Vec<f64>,
    /// 히스토그램 (MACD - 시그널)
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    /// 마지막 (MACD, 시그널) 값을 반환합니다.
    pub fn last(&self) -> Option<(f64, f64)> {
        match (self.macd.last(), self.signal.last()) {
            (Some(&m), Some(&s)) => Some((m, s)),
            _ => None,
        }
    }
}

/// 추세 지표 계산기.
#[derive(Debug, Default)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// EMA = (현재가 × k) + (이전 EMA × (1 - k)), k = 2 / (period + 1).
    /// 첫 EMA는 처음 period개 값의 SMA로 시작합니다.
    ///
    /// # 반환
    /// `prices.len() - period + 1`개의 값 (입력 꼬리에 정렬)
    pub fn ema(&self, prices: &[f64], params: EmaParams) -> IndicatorResult<Vec<f64>> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if prices.len() < period {
            return Err(IndicatorError::InsufficientData {
                required: period,
                provided: prices.len(),
            });
        }

        let multiplier = 2.0 / (period as f64 + 1.0);
        let mut result = Vec::with_capacity(prices.len() - period + 1);

        // 첫 EMA는 SMA로 시작
        let initial_sma = prices[..period].iter().sum::<f64>() / period as f64;
        result.push(initial_sma);

        let mut prev_ema = initial_sma;
        for price in prices.iter().skip(period) {
            let ema = (price * multiplier) + (prev_ema * (1.0 - multiplier));
            result.push(ema);
            prev_ema = ema;
        }

        Ok(result)
    }

    /// MACD 계산.
    ///
    /// MACD 라인 = 단기 EMA - 장기 EMA
    /// 시그널 라인 = MACD 라인의 EMA
    /// 히스토그램 = MACD 라인 - 시그널 라인
    ///
    /// # 반환
    /// 꼬리 정렬된 평행 배열 (`prices.len() - slow - signal + 2`개)
    pub fn macd(&self, prices: &[f64], params: MacdParams) -> IndicatorResult<MacdSeries> {
        let min_required = params.min_required();

        if prices.len() < min_required {
            return Err(IndicatorError::InsufficientData {
                required: min_required,
                provided: prices.len(),
            });
        }

        let fast_ema = self.ema(
            prices,
            EmaParams {
                period: params.fast_period,
            },
        )?;
        let slow_ema = self.ema(
            prices,
            EmaParams {
                period: params.slow_period,
            },
        )?;

        // MACD 라인은 양쪽 EMA가 모두 정의된 구간에서만 존재 - 꼬리 정렬로 계산
        let line_len = fast_ema.len().min(slow_ema.len());
        let fast_tail = &fast_ema[fast_ema.len() - line_len..];
        let slow_tail = &slow_ema[slow_ema.len() - line_len..];
        let macd_line: Vec<f64> = fast_tail
            .iter()
            .zip(slow_tail)
            .map(|(f, s)| f - s)
            .collect();

        // 시그널 라인 (MACD 라인의 EMA)
        let signal_line = self.ema(
            &macd_line,
            EmaParams {
                period: params.signal_period,
            },
        )?;

        // 시그널 길이에 맞춰 MACD 라인도 꼬리로 정렬
        let macd_tail = macd_line[macd_line.len() - signal_line.len()..].to_vec();
        let histogram: Vec<f64> = macd_tail
            .iter()
            .zip(&signal_line)
            .map(|(m, s)| m - s)
            .collect();

        Ok(MacdSeries {
            macd: macd_tail,
            signal: signal_line,
            histogram,
        })
    }
}
