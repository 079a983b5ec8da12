// analytics-backend/src/api/dto/analytics_query_dto.rs

use serde::{Deserialize, Serialize};

/// 個人統計の期間パラメータ（`YYYY-MM-DD`）
///
/// 書式の検証は集計時に行うため、ここでは文字列のまま受け取る。
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// 生産性トレンドの日数パラメータ
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProductivityQuery {
    pub days: Option<String>,
}
