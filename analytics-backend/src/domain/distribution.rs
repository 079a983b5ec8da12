// analytics-backend/src/domain/distribution.rs

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

/// 固定ドメインを持つ集計カテゴリ
pub trait Category: Copy + Eq + 'static {
    /// ドメイン全体（並び順は出力順）
    fn domain() -> &'static [Self];
    fn label(&self) -> &'static str;
    fn from_label(label: &str) -> Option<Self>;
}

/// カテゴリ別件数
///
/// ドメインの全ラベルを常に保持する。ストアに一度も現れないラベルは 0 件として残り、
/// ドメイン外のラベル（NULL を含む）は集計に含めない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDistribution<C: Category> {
    counts: Vec<(C, u64)>,
}

impl<C: Category> CategoryDistribution<C> {
    /// ストアのグループ化結果をドメインに合わせてゼロ埋めする
    pub fn zero_filled<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = (Option<String>, u64)>,
    {
        let mut counts: Vec<(C, u64)> = C::domain().iter().map(|c| (*c, 0)).collect();

        for (label, count) in raw {
            match label.as_deref().and_then(C::from_label) {
                Some(category) => {
                    if let Some(slot) = counts.iter_mut().find(|(c, _)| *c == category) {
                        slot.1 += count;
                    }
                }
                None => debug!(label = ?label, count, "Ignoring label outside category domain"),
            }
        }

        Self { counts }
    }

    pub fn get(&self, category: C) -> u64 {
        self.counts
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |(_, count)| *count)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.counts.iter().map(|(c, _)| c.label()).collect()
    }
}

impl<C: Category> Default for CategoryDistribution<C> {
    fn default() -> Self {
        Self::zero_filled(std::iter::empty())
    }
}

impl<C: Category> Serialize for CategoryDistribution<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (category, count) in &self.counts {
            map.serialize_entry(category.label(), count)?;
        }
        map.end()
    }
}
