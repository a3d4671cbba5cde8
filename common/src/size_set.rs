//! サイズ選択（SizeSet）
//!
//! オペレーターが選んだ順序を保持する、重複なしのサイズラベル列。

use serde::{Deserialize, Serialize};

/// よく使うサイズラベルの一覧（選択UIの並び順）
pub const STANDARD_SIZES: &[&str] = &["XS", "S", "M", "L", "XL", "2XL", "3XL", "4XL", "5XL"];

/// 選択中のサイズ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SizeSet {
    labels: Vec<String>,
}

impl SizeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// ラベル列から作成（前後の空白除去・空ラベル除外・重複は先勝ち）
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for label in labels {
            set.add(label.as_ref());
        }
        set
    }

    /// カンマ区切り文字列から作成（`"M, L,XL"`）
    pub fn parse_list(text: &str) -> Self {
        Self::from_labels(text.split(','))
    }

    /// 末尾に追加。既にある・空の場合は何もしない
    pub fn add(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() || self.contains(label) {
            return false;
        }
        self.labels.push(label.to_string());
        true
    }

    /// 削除。無ければ何もしない
    pub fn remove(&mut self, label: &str) -> bool {
        match self.position(label) {
            Some(idx) => {
                self.labels.remove(idx);
                true
            }
            None => false,
        }
    }

    /// あれば削除、無ければ末尾に追加
    pub fn toggle(&mut self, label: &str) {
        if !self.remove(label.trim()) {
            self.add(label);
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}

impl From<Vec<String>> for SizeSet {
    fn from(labels: Vec<String>) -> Self {
        Self::from_labels(labels)
    }
}

impl From<SizeSet> for Vec<String> {
    fn from(set: SizeSet) -> Self {
        set.labels
    }
}

impl std::fmt::Display for SizeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.labels.join(", "))
    }
}
