//! 조회 날짜 범위.
//!
//! 호출자가 전달한 날짜 문자열은 오케스트레이션이 시작되기 전에 검증됩니다.
//! 파싱 불가능한 입력은 즉시 `SignalError::InvalidDateRange`로 반환됩니다.

use crate::error::{SignalError, SignalResult};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 조회 시작일/종료일 (양 끝 포함).
///
/// 캐시 키의 일부로 사용되므로 `Eq`/`Hash`를 구현합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// 시작일
    pub start: NaiveDate,
    /// 종료일
    pub end: NaiveDate,
}

impl DateRange {
    /// 새 날짜 범위를 생성합니다.
    ///
    /// 시작일이 종료일보다 늦으면 에러를 반환합니다.
    pub fn new(start: NaiveDate, end: NaiveDate) -> SignalResult<Self> {
        if start > end {
            return Err(SignalError::InvalidDateRange(format!(
                "시작일 {}이 종료일 {}보다 늦습니다",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// 날짜 문자열 쌍에서 파싱합니다.
    ///
    /// `YYYYMMDD`와 `YYYY-MM-DD` 두 형식을 지원합니다.
    pub fn parse(start: &str, end: &str) -> SignalResult<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// 오늘을 종료일로 하는 최근 `days`일 범위를 생성합니다.
    pub fn last_days(days: i64) -> Self {
        let end = Utc::now().date_naive();
        let start = end - chrono::Duration::days(days);
        Self { start, end }
    }

    /// `YYYYMMDD` 형식의 시작일 문자열을 반환합니다.
    pub fn start_compact(&self) -> String {
        self.start.format("%Y%m%d").to_string()
    }

    /// `YYYYMMDD` 형식의 종료일 문자열을 반환합니다.
    pub fn end_compact(&self) -> String {
        self.end.format("%Y%m%d").to_string()
    }

    /// 범위에 포함된 일수를 반환합니다.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_compact(), self.end_compact())
    }
}

fn parse_date(s: &str) -> SignalResult<NaiveDate> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(trimmed, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .map_err(|e| SignalError::InvalidDateRange(format!("날짜 형식 오류 '{}': {}", s, e)))
}
