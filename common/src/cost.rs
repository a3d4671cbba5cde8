//! 追加コスト明細（CostLineItem）
//!
//! 原価に上乗せされる梱包費・送料などの明細リスト。
//! キーはリスト内で一意。値は入力中のテキストのまま保持する。

use crate::numeric::parse_lenient;
use serde::{Deserialize, Serialize};

/// 組み込みのコスト項目（キー, 表示名）
pub const COST_PRESETS: &[(&str, &str)] = &[
    ("packaging", "Packaging"),
    ("shipping", "Shipping"),
    ("printing", "Printing"),
    ("labor", "Labor"),
    ("platformFee", "Platform fee"),
    ("marketing", "Marketing"),
];

/// コスト明細1件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CostLineItem {
    pub id: u32,
    pub key: String,
    pub label: String,
    pub value: String,
}

impl CostLineItem {
    /// 数値として読んだ値（空欄・不正は 0）
    pub fn amount(&self) -> f64 {
        parse_lenient(&self.value)
    }
}

/// コスト明細リスト
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CostLineItem>", into = "Vec<CostLineItem>")]
pub struct CostLines {
    items: Vec<CostLineItem>,
    next_id: u32,
}

impl CostLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// 組み込み項目を追加。同じキーが既にある・不明なキーなら追加しない
    pub fn add_preset(&mut self, key: &str) -> bool {
        let Some((key, label)) = COST_PRESETS.iter().find(|(k, _)| *k == key) else {
            return false;
        };
        self.push(key, label).is_some()
    }

    /// 任意の項目を追加し、採番したIDを返す
    ///
    /// キーは表示名から camelCase で生成する。
    /// 空の表示名やキー重複の場合は追加しない。
    pub fn add_custom(&mut self, label: &str) -> Option<u32> {
        let key = camel_case_key(label)?;
        self.push(&key, label.trim())
    }

    fn push(&mut self, key: &str, label: &str) -> Option<u32> {
        if self.contains_key(key) {
            return None;
        }
        let id = self.allocate_id();
        self.items.push(CostLineItem {
            id,
            key: key.to_string(),
            label: label.to_string(),
            value: String::new(),
        });
        Some(id)
    }

    /// 新しいIDを採番（上限に達したら空いている最小のIDを使う）
    fn allocate_id(&mut self) -> u32 {
        let id = if self.id_in_use(self.next_id) {
            self.first_free_id()
        } else {
            self.next_id
        };
        self.next_id = id.saturating_add(1);
        id
    }

    fn id_in_use(&self, id: u32) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    fn first_free_id(&self) -> u32 {
        (0..=u32::MAX).find(|id| !self.id_in_use(*id)).unwrap_or(u32::MAX)
    }

    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn set_value(&mut self, id: u32, value: &str) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.value = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.iter().any(|item| item.key == key)
    }

    pub fn get_by_key(&self, key: &str) -> Option<&CostLineItem> {
        self.items.iter().find(|item| item.key == key)
    }

    /// 追加コストの合計
    pub fn extras_total(&self) -> f64 {
        self.items.iter().map(CostLineItem::amount).sum()
    }

    pub fn items(&self) -> &[CostLineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<CostLineItem>> for CostLines {
    fn from(items: Vec<CostLineItem>) -> Self {
        let mut lines = Self::new();
        for mut item in items {
            if lines.contains_key(&item.key) {
                continue;
            }
            // 重複IDは振り直す
            if lines.id_in_use(item.id) {
                item.id = lines.first_free_id();
            }
            lines.next_id = lines.next_id.max(item.id.saturating_add(1));
            lines.items.push(item);
        }
        lines
    }
}

impl From<CostLines> for Vec<CostLineItem> {
    fn from(lines: CostLines) -> Self {
        lines.items
    }
}

/// 表示名から camelCase のキーを作る（`"Gift wrap"` → `"giftWrap"`）
pub fn camel_case_key(label: &str) -> Option<String> {
    let mut key = String::new();
    for (i, word) in label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        let lower = word.to_lowercase();
        if i == 0 {
            key.push_str(&lower);
        } else {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                key.extend(first.to_uppercase());
                key.push_str(chars.as_str());
            }
        }
    }

    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}
