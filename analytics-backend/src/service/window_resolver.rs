// analytics-backend/src/service/window_resolver.rs
//
// クエリパラメータから集計期間を決定する。

use crate::domain::time_window::TimeWindow;
use crate::error::AnalyticsError;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// `days` 未指定時の生産性トレンド日数
pub const DEFAULT_TREND_DAYS: u32 = 7;

const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// `YYYY-MM-DD` をその日の 00:00 (UTC) として解釈
pub fn parse_calendar_date(value: &str) -> Result<DateTime<Utc>, AnalyticsError> {
    let invalid = || AnalyticsError::InvalidDateFormat(value.to_string());

    // 数値項目の前の空白は chrono が読み飛ばすため先に弾く
    if value.trim() != value {
        return Err(invalid());
    }
    let date = NaiveDate::parse_from_str(value, CALENDAR_DATE_FORMAT).map_err(|_| invalid())?;

    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// 個人統計の期限判定ウィンドウ
///
/// - `start`: 未指定なら `now`、指定ありならその日の 00:00
/// - `end`: 未指定なら `now + 1日`、指定ありなら翌日の 00:00
///
/// 空文字列のみ未指定として扱い、それ以外はそのまま解釈する。
pub fn resolve_stats_window(
    start: Option<&str>,
    end: Option<&str>,
    now: DateTime<Utc>,
) -> Result<TimeWindow, AnalyticsError> {
    let start = match supplied(start) {
        Some(raw) => parse_calendar_date(raw)?,
        None => now,
    };

    let end = match supplied(end) {
        Some(raw) => {
            let date = parse_calendar_date(raw)?;
            date.checked_add_signed(Duration::days(1))
                .ok_or_else(|| AnalyticsError::InvalidDateFormat(raw.to_string()))?
        }
        None => now + Duration::days(1),
    };

    Ok(TimeWindow::new(start, end))
}

/// `days` パラメータを非負整数として解釈（未指定なら既定値）
pub fn resolve_trend_days(raw: Option<&str>) -> Result<u32, AnalyticsError> {
    match raw {
        None => Ok(DEFAULT_TREND_DAYS),
        Some(value) => value
            .trim()
            .parse::<u32>()
            .map_err(|_| AnalyticsError::InvalidDays(value.to_string())),
    }
}

/// 生産性トレンドのウィンドウ `[now - days, now)`
pub fn resolve_trend_window(days: u32, now: DateTime<Utc>) -> TimeWindow {
    let start = now
        .checked_sub_signed(Duration::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    TimeWindow::new(start, now)
}

fn supplied(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
