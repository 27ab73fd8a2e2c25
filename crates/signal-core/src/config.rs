//! 설정 관리.
//!
//! 이 모듈은 분석 시스템의 설정을 정의하고 관리합니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 분석 시스템 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// 오케스트레이터 설정
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
    /// 데이터 조회 설정
    #[serde(default)]
    pub data: DataConfig,
    /// 백테스트 설정
    #[serde(default)]
    pub backtest: BacktestSettings,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 오케스트레이터 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrchestratorConfig {
    /// 동시 실행 태스크 수 - 외부 API 호출 한도를 고려한 값
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// 타임프레임별 태스크 타임아웃 (초)
    #[serde(default = "default_task_timeout_secs")]
    pub task_timeout_secs: u64,
    /// 전체 팬아웃 마감 시한 (초)
    #[serde(default = "default_overall_timeout_secs")]
    pub overall_timeout_secs: u64,
}

fn default_max_concurrency() -> usize {
    3
}
fn default_task_timeout_secs() -> u64 {
    120
}
fn default_overall_timeout_secs() -> u64 {
    480
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            task_timeout_secs: default_task_timeout_secs(),
            overall_timeout_secs: default_overall_timeout_secs(),
        }
    }
}

/// 데이터 조회 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// 기본 조회 기간 (일) - 호출자가 범위를 지정하지 않은 경우
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,
    /// 응답에 포함할 최근 바 개수
    #[serde(default = "default_recent_bars")]
    pub recent_bars: usize,
}

fn default_lookback_days() -> i64 {
    1095
}
fn default_recent_bars() -> usize {
    100
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            recent_bars: default_recent_bars(),
        }
    }
}

/// 백테스트 설정 (상위 설정 파일용).
///
/// 실제 엔진 설정 구조체는 analytics 크레이트에 있으며, 여기서는
/// 파일/환경 변수에서 읽는 값만 정의합니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BacktestSettings {
    /// 초기 자본금 (통화 단위)
    #[serde(default = "default_initial_capital")]
    pub initial_capital: u64,
}

fn default_initial_capital() -> u64 {
    1_000_000
}

impl Default for BacktestSettings {
    fn default() -> Self {
        Self {
            initial_capital: default_initial_capital(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AnalysisConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("SIGNAL")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }

    /// 설정을 검증합니다.
    pub fn validate(&self) -> Result<(), String> {
        if self.orchestrator.max_concurrency == 0 {
            return Err("동시 실행 태스크 수는 0보다 커야 합니다".to_string());
        }
        if self.orchestrator.task_timeout_secs == 0 {
            return Err("태스크 타임아웃은 0보다 커야 합니다".to_string());
        }
        if self.orchestrator.overall_timeout_secs < self.orchestrator.task_timeout_secs {
            return Err("전체 마감 시한은 태스크 타임아웃 이상이어야 합니다".to_string());
        }
        if self.data.lookback_days <= 0 {
            return Err("조회 기간은 0보다 커야 합니다".to_string());
        }
        Ok(())
    }
}
