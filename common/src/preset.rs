//! 組み込みサイズ表プリセット
//!
//! 新しいサイズ表の初期値に使う読み取り専用の参照データ。
//! 実行時に変更されることはない。

use crate::size_chart::Unit;

/// プリセットが見つからない場合に使うキー
pub const DEFAULT_PRESET_KEY: &str = "default";

/// プリセットの1行（計測項目）
#[derive(Debug)]
pub struct PresetRow {
    pub label: &'static str,
    /// `Preset::columns` と同じ並びの値
    pub values: &'static [f64],
}

/// サイズ表プリセット
#[derive(Debug)]
pub struct Preset {
    pub key: &'static str,
    pub name: &'static str,
    pub unit: Unit,
    pub columns: &'static [&'static str],
    pub rows: &'static [PresetRow],
}

/// 全プリセット（先頭がデフォルト）
pub static PRESETS: &[Preset] = &[
    Preset {
        key: DEFAULT_PRESET_KEY,
        name: "Standard apparel",
        unit: Unit::Inches,
        columns: &["XS", "S", "M", "L", "XL", "2XL", "3XL", "4XL", "5XL"],
        rows: &[
            PresetRow { label: "Chest", values: &[16.5, 18.0, 20.0, 22.0, 24.0, 26.0, 28.0, 30.0, 32.0] },
            PresetRow { label: "Length", values: &[27.0, 28.0, 29.0, 30.0, 31.0, 32.0, 33.0, 34.0, 35.0] },
            PresetRow { label: "Sleeve", values: &[8.0, 8.25, 8.5, 8.75, 9.0, 9.25, 9.5, 9.75, 10.0] },
        ],
    },
    Preset {
        key: "tshirt",
        name: "T-shirt (metric)",
        unit: Unit::Cm,
        columns: &["XS", "S", "M", "L", "XL", "2XL", "3XL"],
        rows: &[
            PresetRow { label: "Chest", values: &[44.0, 46.0, 51.0, 56.0, 61.0, 66.0, 71.0] },
            PresetRow { label: "Length", values: &[66.0, 69.0, 72.0, 75.0, 78.0, 81.0, 84.0] },
            PresetRow { label: "Shoulder", values: &[40.0, 42.0, 45.0, 48.0, 51.0, 54.0, 57.0] },
        ],
    },
    Preset {
        key: "hoodie",
        name: "Hoodie",
        unit: Unit::Inches,
        columns: &["S", "M", "L", "XL", "2XL", "3XL"],
        rows: &[
            PresetRow { label: "Chest", values: &[20.0, 22.0, 24.0, 26.0, 28.0, 30.0] },
            PresetRow { label: "Length", values: &[27.0, 28.0, 29.0, 30.0, 31.0, 32.0] },
            PresetRow { label: "Sleeve", values: &[33.0, 34.0, 35.0, 36.0, 37.0, 38.0] },
        ],
    },
    Preset {
        key: "kids",
        name: "Kids (metric)",
        unit: Unit::Cm,
        columns: &["2T", "3T", "4T", "XS", "S", "M", "L"],
        rows: &[
            PresetRow { label: "Chest", values: &[28.0, 30.0, 32.0, 34.0, 36.0, 39.0, 42.0] },
            PresetRow { label: "Length", values: &[38.0, 40.0, 43.0, 46.0, 50.0, 54.0, 58.0] },
        ],
    },
];

impl Preset {
    /// キーで検索（大文字小文字を区別しない）
    pub fn find(key: &str) -> Option<&'static Preset> {
        let key = key.trim();
        PRESETS.iter().find(|p| p.key.eq_ignore_ascii_case(key))
    }

    /// キーで検索し、見つからなければデフォルトプリセットを返す
    pub fn lookup(key: &str) -> &'static Preset {
        Self::find(key).unwrap_or_else(Self::default_preset)
    }

    pub fn default_preset() -> &'static Preset {
        &PRESETS[0]
    }

    /// サイズの列位置
    pub fn column_index(&self, size: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == size)
    }

    /// 計測項目名で行を検索
    pub fn row(&self, label: &str) -> Option<&PresetRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// 計測項目 × サイズの値。どちらかが無ければ None
    pub fn value(&self, row_label: &str, size: &str) -> Option<f64> {
        let col = self.column_index(size)?;
        self.row(row_label)?.values.get(col).copied()
    }
}
