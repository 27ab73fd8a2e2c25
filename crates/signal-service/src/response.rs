//! JSON 안전 응답 조립.
//!
//! 지표 계산 과정에서 NaN/무한대가 리포트에 섞여 들어와도 응답은
//! 실패하지 않습니다. 비유한 실수는 직렬화 시 문자열 표현으로
//! 대체되고, 응답 전체가 `degraded` 플래그로 표시됩니다.

use serde_json::Value;
use signal_core::SignalResult;
use tracing::warn;

use crate::report::AnalysisReport;

/// 리포트를 JSON 값으로 변환하고 `degraded` 플래그를 덧붙입니다.
pub fn to_safe_json(report: &AnalysisReport) -> SignalResult<Value> {
    let degraded = report.has_non_finite();
    if degraded {
        warn!(
            run_id = %report.run_id,
            symbol = %report.symbol,
            "non-finite values substituted in response"
        );
    }

    let mut value = serde_json::to_value(report)?;
    if let Value::Object(map) = &mut value {
        map.insert("degraded".to_string(), Value::Bool(degraded));
    }
    Ok(value)
}
