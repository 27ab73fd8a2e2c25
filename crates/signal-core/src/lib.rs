//! # Signal Core
//!
//! 다중 타임프레임 신호 분석 시스템의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 타임프레임 및 날짜 범위 정의
//! - OHLCV 바 및 지표 시리즈 구조체
//! - 신호 분류 및 종합 판단 타입
//! - 거래 기록 및 백테스트 요약
//! - Analyzer 협력자 trait
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod serde_util;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
