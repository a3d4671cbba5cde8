//! サイズ表・コスト明細のファイル入出力
//!
//! CLIから共通ライブラリの純粋関数を呼び出すための薄い層。

use crate::error::{AdminError, Result};
use merch_admin_common::cost::camel_case_key;
use merch_admin_common::{
    CostLines, MeasurementTable, ProductDraft, SizeSet, Unit, COST_PRESETS, PRESETS,
};
use std::path::Path;

/// サイズ表ペイロードJSONを読み込み
pub fn load_table(path: &Path) -> Result<MeasurementTable> {
    if !path.exists() {
        return Err(AdminError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    Ok(MeasurementTable::from_json(&content)?)
}

/// 下書きJSONを読み込み
pub fn load_draft(path: &Path) -> Result<ProductDraft> {
    if !path.exists() {
        return Err(AdminError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let draft: ProductDraft = serde_json::from_str(&content)?;
    Ok(draft)
}

pub fn save_draft(draft: &ProductDraft, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(draft)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// サイズ指定文字列を解析（空ならエラー）
pub fn parse_sizes(text: &str) -> Result<SizeSet> {
    let sizes = SizeSet::parse_list(text);
    if sizes.is_empty() {
        return Err(AdminError::InvalidInput(format!("サイズが指定されていません: {:?}", text)));
    }
    Ok(sizes)
}

/// プリセットからサイズ表を作成（単位指定があれば上書き）
pub fn build_chart(sizes: &SizeSet, preset_key: &str, unit: Option<Unit>) -> MeasurementTable {
    let table = MeasurementTable::from_preset(sizes, preset_key);
    match unit {
        Some(unit) => table.set_unit(unit),
        None => table,
    }
}

/// ペイロードをファイルまたは標準出力へ
pub fn write_payload(table: &MeasurementTable, output: Option<&Path>) -> Result<()> {
    let json = table.serialize_payload()?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)?;
            println!("✔ サイズ表を保存: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// `key=値` 形式の追加コストを明細に変換
///
/// 組み込みキーはそのまま、それ以外は表示名として扱う。
pub fn parse_extras(extras: &[String]) -> Result<CostLines> {
    let mut lines = CostLines::new();

    for extra in extras {
        let (name, value) = extra.split_once('=').ok_or_else(|| {
            AdminError::InvalidInput(format!("追加コストは key=値 で指定してください: {}", extra))
        })?;
        let name = name.trim();

        let is_preset = COST_PRESETS.iter().any(|(key, _)| *key == name);
        if !is_preset && camel_case_key(name).is_none() {
            return Err(AdminError::InvalidInput(format!("追加コストの項目名がありません: {}", extra)));
        }

        let added = if is_preset {
            lines.add_preset(name)
        } else {
            lines.add_custom(name).is_some()
        };
        if !added {
            return Err(AdminError::InvalidInput(format!("追加コストが重複しています: {}", name)));
        }

        if let Some(item) = lines.items().last() {
            let id = item.id;
            lines.set_value(id, value.trim());
        }
    }

    Ok(lines)
}

/// プリセット一覧の表示行
pub fn preset_lines() -> Vec<String> {
    PRESETS
        .iter()
        .map(|p| {
            let rows: Vec<&str> = p.rows.iter().map(|r| r.label).collect();
            format!(
                "{:<8} {:<20} [{}] {} / {}",
                p.key,
                p.name,
                p.unit,
                p.columns.join(" "),
                rows.join(", ")
            )
        })
        .collect()
}
