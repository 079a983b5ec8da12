// analytics-backend/src/domain/task_status.rs

use super::distribution::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// タスクの状態を表すenum
///
/// ストアには表示ラベル（"Todo" / "In Progress" / "Completed"）がそのまま保存されている。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "Todo")]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    /// 集計時の並び順を兼ねた全ステータス
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Completed];

    /// ストアのラベルからTaskStatusに変換（完全一致）
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Todo" => Some(Self::Todo),
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// ストアに保存されているラベル
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// 未完了（保留中）として数えるステータスかチェック
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Todo | Self::InProgress)
    }

    /// 保留中として数えるステータスの一覧
    pub fn pending() -> Vec<Self> {
        Self::ALL.into_iter().filter(Self::is_pending).collect()
    }
}

impl Category for TaskStatus {
    fn domain() -> &'static [Self] {
        &Self::ALL
    }

    fn label(&self) -> &'static str {
        self.as_str()
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::from_str(label)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
