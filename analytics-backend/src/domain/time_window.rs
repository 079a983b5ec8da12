// analytics-backend/src/domain/time_window.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 半開区間 `[start, end)` の集計期間
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// 含まれる時刻が一つもないか
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
