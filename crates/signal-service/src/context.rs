//! 실행 단위 컨텍스트.
//!
//! 한 번의 분석 실행에 속하는 식별자와 실행 범위 캐시를 담습니다.
//! 캐시는 실행과 함께 생성되고 실행이 끝나면 함께 폐기되므로, 실행
//! 사이에 상태가 새어 나가지 않습니다. 프로세스 전역 캐시가 아닙니다.

use chrono::{DateTime, Utc};
use signal_core::{Bar, DateRange, Timeframe};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// 분석 실행 한 번에 대응하는 컨텍스트.
#[derive(Debug)]
pub struct RunContext {
    /// 실행 식별자
    pub id: Uuid,
    /// 분석 대상 심볼
    pub symbol: String,
    /// 조회 범위
    pub range: DateRange,
    /// 생성 시각
    pub created_at: DateTime<Utc>,
    /// (타임프레임, 범위) → 바 시리즈 캐시
    cache: Mutex<HashMap<(Timeframe, DateRange), Arc<Vec<Bar>>>>,
}

impl RunContext {
    /// 새 실행 컨텍스트를 생성합니다.
    pub fn new(symbol: impl Into<String>, range: DateRange) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into(),
            range,
            created_at: Utc::now(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// 캐시된 바 시리즈를 조회합니다.
    pub async fn cached_bars(
        &self,
        timeframe: Timeframe,
        range: DateRange,
    ) -> Option<Arc<Vec<Bar>>> {
        self.cache.lock().await.get(&(timeframe, range)).cloned()
    }

    /// 바 시리즈를 캐시에 저장하고 공유 핸들을 반환합니다.
    ///
    /// 같은 키로 동시에 저장되면 마지막 저장이 남습니다. 동일 데이터의
    /// 중복 저장이므로 어느 쪽이 남아도 결과는 같습니다.
    pub async fn store_bars(
        &self,
        timeframe: Timeframe,
        range: DateRange,
        bars: Vec<Bar>,
    ) -> Arc<Vec<Bar>> {
        let shared = Arc::new(bars);
        self.cache
            .lock()
            .await
            .insert((timeframe, range), Arc::clone(&shared));
        shared
    }

    /// 캐시된 항목 수를 반환합니다.
    pub async fn cache_len(&self) -> usize {
        self.cache.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn range() -> DateRange {
        DateRange::parse("20230101", "20231231").unwrap()
    }

    fn bar(close: f64) -> Bar {
        let date = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
        Bar::new(date, close, close, close, close, 0.0)
    }

    #[tokio::test]
    async fn test_cache_roundtrip() {
        let ctx = RunContext::new("005930", range());
        assert!(ctx.cached_bars(Timeframe::D1, range()).await.is_none());

        ctx.store_bars(Timeframe::D1, range(), vec![bar(10.0)]).await;
        let cached = ctx.cached_bars(Timeframe::D1, range()).await.unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(ctx.cache_len().await, 1);

        // 다른 타임프레임은 별도 키
        assert!(ctx.cached_bars(Timeframe::W1, range()).await.is_none());
    }

    #[tokio::test]
    async fn test_last_writer_wins() {
        let ctx = RunContext::new("005930", range());
        ctx.store_bars(Timeframe::D1, range(), vec![bar(10.0)]).await;
        ctx.store_bars(Timeframe::D1, range(), vec![bar(20.0), bar(21.0)])
            .await;
        let cached = ctx.cached_bars(Timeframe::D1, range()).await.unwrap();
        assert_eq!(cached.len(), 2);
        assert_eq!(ctx.cache_len().await, 1);
    }

    #[test]
    fn test_each_run_gets_distinct_id() {
        let a = RunContext::new("005930", range());
        let b = RunContext::new("005930", range());
        assert_ne!(a.id, b.id);
    }
}
