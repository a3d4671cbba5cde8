//! 対話式の商品下書き編集
//!
//! サイズ選択・サイズ表・価格・コスト明細をメニューから編集する。
//! 変更のたびにサイズ表と利益プレビューを表示し直す。

use crate::chart::{load_draft, save_draft};
use crate::error::{AdminError, Result};
use crate::preview::{render_chart, render_profit};
use merch_admin_common::{ProductDraft, Unit, COST_PRESETS, PRESETS, STANDARD_SIZES};
use dialoguer::{Confirm, Input, Select};
use std::path::Path;

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    ToggleSize,
    AddCustomSize,
    EditCell,
    RenameRow,
    AddRow,
    RemoveRow,
    ChangeUnit,
    ChangePreset,
    ToggleChart,
    SetPrices,
    AddCost,
    EditCost,
    RemoveCost,
    SaveAndQuit,
    Discard,
}

impl EditorAction {
    pub const ALL: &'static [EditorAction] = &[
        EditorAction::ToggleSize,
        EditorAction::AddCustomSize,
        EditorAction::EditCell,
        EditorAction::RenameRow,
        EditorAction::AddRow,
        EditorAction::RemoveRow,
        EditorAction::ChangeUnit,
        EditorAction::ChangePreset,
        EditorAction::ToggleChart,
        EditorAction::SetPrices,
        EditorAction::AddCost,
        EditorAction::EditCost,
        EditorAction::RemoveCost,
        EditorAction::SaveAndQuit,
        EditorAction::Discard,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EditorAction::ToggleSize => "サイズを切り替え",
            EditorAction::AddCustomSize => "カスタムサイズを追加",
            EditorAction::EditCell => "セルを編集",
            EditorAction::RenameRow => "計測項目名を変更",
            EditorAction::AddRow => "計測項目を追加",
            EditorAction::RemoveRow => "計測項目を削除",
            EditorAction::ChangeUnit => "単位を変更",
            EditorAction::ChangePreset => "プリセットを変更（サイズ表を作り直す）",
            EditorAction::ToggleChart => "サイズ表の送信 有効/無効",
            EditorAction::SetPrices => "販売価格・原価を入力",
            EditorAction::AddCost => "追加コストを追加",
            EditorAction::EditCost => "追加コストの金額を編集",
            EditorAction::RemoveCost => "追加コストを削除",
            EditorAction::SaveAndQuit => "保存して終了",
            EditorAction::Discard => "保存せずに終了",
        }
    }
}

/// サイズ切り替えの選択肢（標準サイズ + 選択中のカスタムサイズ）
pub fn size_choices(draft: &ProductDraft) -> Vec<String> {
    let mut choices: Vec<String> = STANDARD_SIZES.iter().map(|s| s.to_string()).collect();
    for size in draft.sizes().iter() {
        if !choices.iter().any(|c| c == size) {
            choices.push(size.to_string());
        }
    }
    choices
}

/// 対話式で下書きを編集
pub fn run_interactive_editor(
    input_path: &Path,
    output_path: Option<&Path>,
    currency: &str,
) -> Result<()> {
    let mut draft = load_draft(input_path)?;
    let labels: Vec<&str> = EditorAction::ALL.iter().map(|a| a.label()).collect();

    loop {
        print_state(&draft, currency);

        let choice = Select::new()
            .with_prompt("操作")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(interactive_error)?;

        match EditorAction::ALL[choice] {
            EditorAction::ToggleSize => {
                let choices = size_choices(&draft);
                let marked: Vec<String> = choices
                    .iter()
                    .map(|c| {
                        let mark = if draft.sizes().contains(c) { "✔" } else { " " };
                        format!("[{}] {}", mark, c)
                    })
                    .collect();
                let idx = Select::new()
                    .with_prompt("サイズ")
                    .items(&marked)
                    .interact()
                    .map_err(interactive_error)?;
                draft.toggle_size(&choices[idx]);
            }
            EditorAction::AddCustomSize => {
                let label = prompt_text("サイズ名", "")?;
                if !draft.add_custom_size(&label) {
                    println!("  → 追加できません（空または既に選択済み）");
                }
            }
            EditorAction::EditCell => {
                let Some(row) = pick_row(&draft)? else { continue };
                let Some(col) = pick_column(&draft)? else { continue };
                let current = draft.size_chart().value(row, col).unwrap_or_default().to_string();
                let value = prompt_text("値（空欄可）", &current)?;
                draft.edit_size_chart(|t| t.set_cell(row, col, value.trim()));
            }
            EditorAction::RenameRow => {
                let Some(row) = pick_row(&draft)? else { continue };
                let current = draft.size_chart().rows()[row].label.clone();
                let label = prompt_text("計測項目名", &current)?;
                draft.edit_size_chart(|t| t.set_row_label(row, label.trim()));
            }
            EditorAction::AddRow => {
                draft.edit_size_chart(|t| t.add_row());
            }
            EditorAction::RemoveRow => {
                let Some(row) = pick_row(&draft)? else { continue };
                draft.edit_size_chart(|t| t.remove_row(row));
            }
            EditorAction::ChangeUnit => {
                let units = [Unit::Inches, Unit::Cm];
                let idx = Select::new()
                    .with_prompt("単位")
                    .items(&units)
                    .default(if draft.size_chart().unit() == Unit::Cm { 1 } else { 0 })
                    .interact()
                    .map_err(interactive_error)?;
                draft.edit_size_chart(|t| t.set_unit(units[idx]));
            }
            EditorAction::ChangePreset => {
                let names: Vec<String> = PRESETS
                    .iter()
                    .map(|p| format!("{} ({})", p.key, p.name))
                    .collect();
                let idx = Select::new()
                    .with_prompt("プリセット")
                    .items(&names)
                    .interact()
                    .map_err(interactive_error)?;
                let confirmed = Confirm::new()
                    .with_prompt("入力済みの値は破棄されます。続けますか？")
                    .default(false)
                    .interact()
                    .map_err(interactive_error)?;
                if confirmed {
                    draft.set_chart_preset(PRESETS[idx].key);
                }
            }
            EditorAction::ToggleChart => {
                let enabled = !draft.size_chart_enabled();
                draft.enable_size_chart(enabled);
            }
            EditorAction::SetPrices => {
                draft.selling_price = prompt_text("販売価格", &draft.selling_price)?;
                draft.cost_price = prompt_text("原価", &draft.cost_price)?;
            }
            EditorAction::AddCost => {
                let mut options: Vec<String> = COST_PRESETS
                    .iter()
                    .filter(|(key, _)| !draft.costs.contains_key(key))
                    .map(|(_, label)| label.to_string())
                    .collect();
                options.push("その他（名前を入力）".to_string());
                let idx = Select::new()
                    .with_prompt("追加コスト")
                    .items(&options)
                    .interact()
                    .map_err(interactive_error)?;

                let added = if idx + 1 == options.len() {
                    let label = prompt_text("項目名", "")?;
                    draft.costs.add_custom(&label).is_some()
                } else {
                    let key = COST_PRESETS
                        .iter()
                        .find(|(_, label)| *label == options[idx])
                        .map(|(key, _)| *key)
                        .unwrap_or_default();
                    draft.costs.add_preset(key)
                };
                if !added {
                    println!("  → 追加できません（同じ項目が既にあります）");
                }
            }
            EditorAction::EditCost => {
                let Some(id) = pick_cost(&draft)? else { continue };
                let current = draft
                    .costs
                    .items()
                    .iter()
                    .find(|item| item.id == id)
                    .map(|item| item.value.clone())
                    .unwrap_or_default();
                let value = prompt_text("金額", &current)?;
                draft.costs.set_value(id, value.trim());
            }
            EditorAction::RemoveCost => {
                let Some(id) = pick_cost(&draft)? else { continue };
                draft.costs.remove(id);
            }
            EditorAction::SaveAndQuit => {
                let output = output_path.unwrap_or(input_path);
                save_draft(&draft, output)?;
                println!("\n✓ 保存しました: {}", output.display());
                return Ok(());
            }
            EditorAction::Discard => {
                println!("変更を破棄しました");
                return Ok(());
            }
        }
    }
}

fn print_state(draft: &ProductDraft, currency: &str) {
    println!();
    println!(
        "📦 {}  サイズ: [{}]  プリセット: {}  サイズ表: {}",
        if draft.name.is_empty() { "(無名)" } else { draft.name.as_str() },
        draft.sizes(),
        draft.chart_preset(),
        if draft.size_chart_enabled() { "有効" } else { "無効" }
    );
    println!("{}", render_chart(draft.size_chart()));
    for item in draft.costs.items() {
        println!("  + {}: {}", item.label, if item.value.is_empty() { "-" } else { item.value.as_str() });
    }
    println!("{}\n", render_profit(&draft.profit(), currency));
}

fn pick_row(draft: &ProductDraft) -> Result<Option<usize>> {
    let rows: Vec<&str> = draft.size_chart().rows().iter().map(|r| r.label.as_str()).collect();
    if rows.is_empty() {
        println!("  → 計測項目がありません");
        return Ok(None);
    }
    let idx = Select::new()
        .with_prompt("計測項目")
        .items(&rows)
        .interact()
        .map_err(interactive_error)?;
    Ok(Some(idx))
}

fn pick_column(draft: &ProductDraft) -> Result<Option<usize>> {
    let columns = draft.size_chart().columns();
    if columns.is_empty() {
        println!("  → サイズが選択されていません");
        return Ok(None);
    }
    let idx = Select::new()
        .with_prompt("サイズ")
        .items(columns)
        .interact()
        .map_err(interactive_error)?;
    Ok(Some(idx))
}

fn pick_cost(draft: &ProductDraft) -> Result<Option<u32>> {
    let items = draft.costs.items();
    if items.is_empty() {
        println!("  → 追加コストがありません");
        return Ok(None);
    }
    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
    let idx = Select::new()
        .with_prompt("追加コスト")
        .items(&labels)
        .interact()
        .map_err(interactive_error)?;
    Ok(Some(items[idx].id))
}

fn prompt_text(prompt: &str, initial: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(interactive_error)
}

fn interactive_error(e: dialoguer::Error) -> AdminError {
    AdminError::Interactive(e.to_string())
}
