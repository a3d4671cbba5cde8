//! サイズ表（MeasurementTable）と同期ロジック
//!
//! サイズ選択が変わるたびに、入力済みの値を失わずに
//! 列をサイズ選択と一致させる。
//!
//! すべての操作は新しいテーブルを返す純粋関数。
//! 呼び出し側は戻り値で自分の状態を置き換える。
//!
//! 不変条件: 全行で `values.len() == columns.len()`

use crate::error::Result;
use crate::numeric::{format_cell_number, parse_lenient};
use crate::preset::Preset;
use crate::size_set::SizeSet;
use serde::{Deserialize, Serialize, Serializer};

/// 行追加時の仮ラベル
pub const NEW_ROW_LABEL: &str = "New measurement";

/// 計測単位
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Inches,
    Cm,
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inches" | "inch" | "in" => Ok(Unit::Inches),
            "cm" | "centimeters" => Ok(Unit::Cm),
            _ => Err(format!("Unknown unit: {}. Use inches or cm", s)),
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Inches => write!(f, "inches"),
            Unit::Cm => write!(f, "cm"),
        }
    }
}

/// サイズ表の1行（編集中のテキスト値）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementRow {
    pub label: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// サイズ表（編集中の状態。送信用は `SizeChartPayload`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTable")]
pub struct MeasurementTable {
    unit: Unit,
    columns: Vec<String>,
    rows: Vec<MeasurementRow>,
}

/// 読み込み直後の未検証テーブル
#[derive(Deserialize)]
struct RawTable {
    #[serde(default)]
    unit: Unit,
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<MeasurementRow>,
}

impl From<RawTable> for MeasurementTable {
    fn from(raw: RawTable) -> Self {
        let width = raw.columns.len();
        let rows = raw
            .rows
            .into_iter()
            .map(|mut row| {
                row.values.resize(width, String::new());
                row
            })
            .collect();
        Self {
            unit: raw.unit,
            columns: raw.columns,
            rows,
        }
    }
}

impl MeasurementTable {
    /// プリセットから作成
    ///
    /// プリセットに無いサイズ（カスタムサイズ）はプリセットの先頭列の値で埋める。
    /// 不明なプリセットキーはデフォルトプリセットになる。
    pub fn from_preset(sizes: &SizeSet, preset_key: &str) -> Self {
        let preset = Preset::lookup(preset_key);

        let rows = preset
            .rows
            .iter()
            .map(|preset_row| {
                let values = sizes
                    .iter()
                    .map(|size| {
                        let idx = preset.column_index(size).unwrap_or(0);
                        preset_row
                            .values
                            .get(idx)
                            .map(|v| format_cell_number(*v))
                            .unwrap_or_default()
                    })
                    .collect();
                MeasurementRow {
                    label: preset_row.label.to_string(),
                    values,
                }
            })
            .collect();

        Self {
            unit: preset.unit,
            columns: sizes.as_slice().to_vec(),
            rows,
        }
    }

    /// 新しいサイズ選択に合わせて列を同期
    ///
    /// `self` はサイズ変更 *前* のテーブルであること。
    /// 以前の列にあったサイズは値をそのまま引き継ぎ（空欄も含む）、
    /// 新しいサイズはプリセットの同名行の値、無ければ空欄になる。
    /// 行の追加・削除は行わない。
    pub fn sync_to_sizes(&self, sizes: &SizeSet, preset_key: &str) -> Self {
        let preset = Preset::lookup(preset_key);

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let values = sizes
                    .iter()
                    .map(|size| match self.column_index(size) {
                        Some(prev) => row.values.get(prev).cloned().unwrap_or_default(),
                        None => preset
                            .value(&row.label, size)
                            .map(format_cell_number)
                            .unwrap_or_default(),
                    })
                    .collect();
                MeasurementRow {
                    label: row.label.clone(),
                    values,
                }
            })
            .collect();

        Self {
            unit: self.unit,
            columns: sizes.as_slice().to_vec(),
            rows,
        }
    }

    /// 空欄の行を末尾に追加
    pub fn add_row(&self) -> Self {
        let mut table = self.clone();
        table.rows.push(MeasurementRow {
            label: NEW_ROW_LABEL.to_string(),
            values: vec![String::new(); self.columns.len()],
        });
        table
    }

    /// 行を削除（範囲外なら何もしない）
    pub fn remove_row(&self, row_index: usize) -> Self {
        let mut table = self.clone();
        if row_index < table.rows.len() {
            table.rows.remove(row_index);
        }
        table
    }

    /// セルの値を置き換え（範囲外なら何もしない）
    pub fn set_cell(&self, row_index: usize, col_index: usize, value: &str) -> Self {
        let mut table = self.clone();
        if let Some(cell) = table
            .rows
            .get_mut(row_index)
            .and_then(|row| row.values.get_mut(col_index))
        {
            *cell = value.to_string();
        }
        table
    }

    /// 行ラベルを変更（範囲外なら何もしない）
    pub fn set_row_label(&self, row_index: usize, label: &str) -> Self {
        let mut table = self.clone();
        if let Some(row) = table.rows.get_mut(row_index) {
            row.label = label.to_string();
        }
        table
    }

    pub fn set_unit(&self, unit: Unit) -> Self {
        Self {
            unit,
            ..self.clone()
        }
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[MeasurementRow] {
        &self.rows
    }

    pub fn value(&self, row_index: usize, col_index: usize) -> Option<&str> {
        self.rows
            .get(row_index)
            .and_then(|row| row.values.get(col_index))
            .map(String::as_str)
    }

    pub fn column_index(&self, size: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == size)
    }

    /// 全行の値の数が列数と一致しているか
    pub fn is_consistent(&self) -> bool {
        self.rows.iter().all(|r| r.values.len() == self.columns.len())
    }

    /// 送信用ペイロードに変換（空欄・数値でない値は 0）
    pub fn to_payload(&self) -> SizeChartPayload {
        SizeChartPayload {
            unit: self.unit,
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .map(|row| PayloadRow {
                    label: row.label.clone(),
                    values: row.values.iter().map(|v| parse_lenient(v)).collect(),
                })
                .collect(),
        }
    }

    /// 送信用JSON文字列
    pub fn serialize_payload(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_payload())?)
    }

    /// 保存済みペイロードから復元
    ///
    /// 列数と値の数が合わない行は空欄で埋めるか切り詰める。
    pub fn from_payload(payload: &SizeChartPayload) -> Self {
        let width = payload.columns.len();
        let rows = payload
            .rows
            .iter()
            .map(|row| {
                let mut values: Vec<String> =
                    row.values.iter().take(width).map(|v| format_cell_number(*v)).collect();
                values.resize(width, String::new());
                MeasurementRow {
                    label: row.label.clone(),
                    values,
                }
            })
            .collect();

        Self {
            unit: payload.unit,
            columns: payload.columns.clone(),
            rows,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let payload: SizeChartPayload = serde_json::from_str(json)?;
        Ok(Self::from_payload(&payload))
    }
}

/// バックエンドに送るサイズ表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeChartPayload {
    pub unit: Unit,
    pub columns: Vec<String>,
    pub rows: Vec<PayloadRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadRow {
    pub label: String,
    #[serde(serialize_with = "serialize_numbers")]
    pub values: Vec<f64>,
}

/// 整数値は `20.0` ではなく `20` として書き出す
fn serialize_numbers<S: Serializer>(values: &[f64], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    use serde::ser::SerializeSeq;

    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    let mut seq = serializer.serialize_seq(Some(values.len()))?;
    for v in values {
        if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER {
            seq.serialize_element(&(*v as i64))?;
        } else {
            seq.serialize_element(v)?;
        }
    }
    seq.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(labels: &[&str]) -> SizeSet {
        SizeSet::from_labels(labels.iter().copied())
    }

    #[test]
    fn test_from_preset_copies_values_by_size() {
        let table = MeasurementTable::from_preset(&sizes(&["M", "L", "XL"]), "default");
        assert_eq!(table.unit(), Unit::Inches);
        assert_eq!(table.columns(), &["M", "L", "XL"]);
        assert_eq!(table.rows()[0].label, "Chest");
        assert_eq!(table.rows()[0].values, vec!["20", "22", "24"]);
        assert!(table.is_consistent());
    }

    #[test]
    fn test_from_preset_custom_size_uses_first_column() {
        let table = MeasurementTable::from_preset(&sizes(&["M", "Tall"]), "default");
        // Tall はプリセットに無いので先頭列（XS）の値
        assert_eq!(table.rows()[0].values, vec!["20", "16.5"]);
        assert_eq!(table.rows()[2].values, vec!["8.5", "8"]);
    }

    #[test]
    fn test_from_preset_unknown_key_and_no_sizes() {
        let table = MeasurementTable::from_preset(&SizeSet::new(), "nonexistent-key");
        assert!(table.columns().is_empty());
        let labels: Vec<&str> = table.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Chest", "Length", "Sleeve"]);
        assert!(table.rows().iter().all(|r| r.values.is_empty()));
    }

    #[test]
    fn test_from_preset_uses_preset_unit() {
        let table = MeasurementTable::from_preset(&sizes(&["S"]), "tshirt");
        assert_eq!(table.unit(), Unit::Cm);
        assert_eq!(table.rows()[0].values, vec!["46"]);
    }

    #[test]
    fn test_sync_preserves_values_by_label() {
        let table = MeasurementTable::from_preset(&sizes(&["S", "M", "L"]), "default")
            .set_cell(0, 1, "99")
            .set_cell(0, 2, "");

        let synced = table.sync_to_sizes(&sizes(&["L", "M", "XL"]), "default");
        assert_eq!(synced.columns(), &["L", "M", "XL"]);
        // L は空欄のまま、M は編集値、XL はプリセット値
        assert_eq!(synced.rows()[0].values, vec!["", "99", "24"]);
        assert!(synced.is_consistent());
    }

    #[test]
    fn test_sync_new_size_missing_from_preset_is_blank() {
        let table = MeasurementTable::from_preset(&sizes(&["M"]), "default").add_row();
        let synced = table.sync_to_sizes(&sizes(&["M", "Tall"]), "default");
        assert_eq!(synced.rows()[0].values, vec!["20", ""]);
        // プリセットに無い行ラベルも空欄
        assert_eq!(synced.rows()[3].values, vec!["", ""]);
    }

    #[test]
    fn test_sync_keeps_unit_and_rows() {
        let table = MeasurementTable::from_preset(&sizes(&["M"]), "default")
            .set_unit(Unit::Cm)
            .set_row_label(1, "Body length")
            .remove_row(2);
        let synced = table.sync_to_sizes(&sizes(&["M", "L"]), "tshirt");
        assert_eq!(synced.unit(), Unit::Cm);
        assert_eq!(synced.rows().len(), 2);
        assert_eq!(synced.rows()[0].values, vec!["20", "56"]);
        assert_eq!(synced.rows()[1].values, vec!["29", ""]);
    }

    #[test]
    fn test_sync_is_idempotent() {
        let table = MeasurementTable::from_preset(&sizes(&["S", "M"]), "default")
            .set_cell(1, 0, "abc");
        let target = sizes(&["M", "XL", "Tall"]);
        let once = table.sync_to_sizes(&target, "default");
        let twice = once.sync_to_sizes(&target, "default");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_removed_size_is_not_restored() {
        let table = MeasurementTable::from_preset(&sizes(&["M", "L"]), "default")
            .set_cell(0, 0, "99");
        let without_m = table.sync_to_sizes(&sizes(&["L"]), "default");
        let readded = without_m.sync_to_sizes(&sizes(&["L", "M"]), "default");

        assert_eq!(readded.columns(), &["L", "M"]);
        // 編集値 "99" は戻らずプリセット値になる
        assert_eq!(readded.rows()[0].values, vec!["22", "20"]);
    }

    #[test]
    fn test_add_and_remove_rows() {
        let table = MeasurementTable::from_preset(&sizes(&["M", "L"]), "default");
        let added = table.add_row();
        assert_eq!(added.rows().len(), 4);
        assert_eq!(added.rows()[3].label, NEW_ROW_LABEL);
        assert_eq!(added.rows()[3].values, vec!["", ""]);

        let removed = added.remove_row(0);
        let labels: Vec<&str> = removed.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Length", "Sleeve", NEW_ROW_LABEL]);

        assert_eq!(removed.remove_row(10), removed);
    }

    #[test]
    fn test_set_cell_out_of_range_is_noop() {
        let table = MeasurementTable::from_preset(&sizes(&["M"]), "default");
        assert_eq!(table.set_cell(0, 5, "1"), table);
        assert_eq!(table.set_cell(9, 0, "1"), table);
        assert_eq!(table.set_cell(0, 0, "21.5").value(0, 0), Some("21.5"));
    }

    #[test]
    fn test_serialize_coerces_to_numbers() {
        let table = MeasurementTable::from_preset(&sizes(&["M", "L"]), "default")
            .set_cell(0, 0, "20.5")
            .set_cell(0, 1, "");
        let json = table.serialize_payload().unwrap();
        assert!(json.starts_with(r#"{"unit":"inches","columns":["M","L"],"rows":[{"label":"Chest","values":[20.5,0]}"#));

        let reloaded = MeasurementTable::from_json(&json).unwrap();
        assert_eq!(reloaded.serialize_payload().unwrap(), json);
    }

    #[test]
    fn test_from_payload_repairs_row_width() {
        let json = r#"{"unit":"cm","columns":["S","M"],"rows":[
            {"label":"Chest","values":[40]},
            {"label":"Length","values":[60,62,64]}
        ]}"#;
        let table = MeasurementTable::from_json(json).unwrap();
        assert_eq!(table.unit(), Unit::Cm);
        assert_eq!(table.rows()[0].values, vec!["40", ""]);
        assert_eq!(table.rows()[1].values, vec!["60", "62"]);
        assert!(table.is_consistent());
    }

    #[test]
    fn test_draft_table_deserialize_repairs_width() {
        let json = r#"{"unit":"inches","columns":["M","L"],"rows":[{"label":"Chest","values":["20"]}]}"#;
        let table: MeasurementTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.rows()[0].values, vec!["20", ""]);
        assert!(table.is_consistent());
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!("CM".parse::<Unit>(), Ok(Unit::Cm));
        assert_eq!("in".parse::<Unit>(), Ok(Unit::Inches));
        assert!("mm".parse::<Unit>().is_err());
    }
}
