//! Analyzer 협력자 trait.
//!
//! 원시 시장 데이터 조회, 지표 계산, 타임프레임 분류는 외부 협력자의
//! 책임입니다. 이 모듈은 그 경계를 trait으로 정의합니다. 오케스트레이터는
//! 이 trait만 알고, 실제 데이터 소스(실시간 API, DB, 테스트 목)는
//! 구현체가 결정합니다.

use crate::domain::bar::{Bar, IndicatorSeries};
use crate::domain::signal::TimeframeSignal;
use crate::types::{DateRange, Timeframe};
use async_trait::async_trait;
use thiserror::Error;

/// Analyzer 협력자 에러.
#[derive(Debug, Clone, Error)]
pub enum AnalyzerError {
    /// 데이터 조회 실패
    #[error("데이터 조회 실패: {0}")]
    Fetch(String),

    /// 지표 계산 오류
    #[error("지표 계산 오류: {0}")]
    Calculation(String),
}

/// 단일 심볼/타임프레임의 분석 협력자.
///
/// 조회는 네트워크 I/O로 블로킹될 수 있어 비동기이며, 지표 계산과
/// 분류는 이미 확보한 데이터에 대한 순수 계산입니다.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// 지정 범위의 바 시리즈를 조회합니다.
    ///
    /// 실패하거나 빈 결과를 반환하면 해당 타임프레임은 이번 실행에서
    /// 제외됩니다 (전체 실패 시에만 치명적).
    async fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        range: DateRange,
    ) -> Result<Vec<Bar>, AnalyzerError>;

    /// 바 시리즈의 MACD/시그널 지표를 계산합니다.
    ///
    /// 반환 배열은 워밍업으로 인해 바 시리즈보다 짧을 수 있으며
    /// 시리즈의 꼬리에 정렬됩니다.
    fn indicators(&self, bars: &[Bar]) -> IndicatorSeries;

    /// 바 시리즈와 지표로부터 타임프레임 분류를 생성합니다.
    ///
    /// 데이터가 부족해 분류할 수 없으면 `None`을 반환하며, 해당
    /// 타임프레임은 이번 실행에서 제외됩니다.
    fn classify(&self, bars: &[Bar], indicators: &IndicatorSeries) -> Option<TimeframeSignal>;
}
