//! 신호 분석 시스템의 에러 타입.
//!
//! 이 모듈은 시스템 전반에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 핵심 신호 분석 에러.
#[derive(Debug, Error)]
pub enum SignalError {
    /// 잘못된 날짜 범위 - 오케스트레이션 시작 전에 반환되는 치명적 입력 오류
    #[error("잘못된 날짜 범위: {0}")]
    InvalidDateRange(String),

    /// 데이터 조회 실패 - 해당 타임프레임만 제외되며 전체 실패 시에만 치명적
    #[error("데이터 없음: {0}")]
    DataUnavailable(String),

    /// 타임아웃 - 부분 결과로 계속 진행되는 비치명적 오류
    #[error("타임아웃: {0}")]
    Timeout(String),

    /// 모든 타임프레임 분석 실패
    #[error("모든 타임프레임 분석 실패: {0}")]
    AllTimeframesFailed(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 신호 분석 작업을 위한 Result 타입.
pub type SignalResult<T> = Result<T, SignalError>;

impl SignalError {
    /// 부분 결과로 계속 진행 가능한 에러인지 확인합니다.
    ///
    /// 타임프레임 단위의 조회 실패와 타임아웃은 해당 타임프레임만
    /// 제외하고 나머지 결과로 진행합니다.
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            SignalError::DataUnavailable(_) | SignalError::Timeout(_)
        )
    }
}

impl From<serde_json::Error> for SignalError {
    fn from(e: serde_json::Error) -> Self {
        SignalError::Serialization(e.to_string())
    }
}
