//! # Signal Service
//!
//! 다중 타임프레임 분석의 오케스트레이션 및 서비스 계층.
//!
//! - [`context`] - 실행 단위 컨텍스트 (실행 범위 캐시)
//! - [`orchestrator`] - 제한 동시성 타임프레임 팬아웃
//! - [`service`] - 분석 파이프라인 전체를 연결하는 서비스
//! - [`report`] - 호출자에게 반환되는 분석 리포트
//! - [`response`] - JSON 안전 응답 조립

pub mod context;
pub mod orchestrator;
pub mod report;
pub mod response;
pub mod service;

pub use context::RunContext;
pub use orchestrator::{PeriodAnalysisOrchestrator, TimeframeResult};
pub use report::{AnalysisReport, BacktestDetail, BacktestReport, TimeframeReport};
pub use response::to_safe_json;
pub use service::AnalysisService;
