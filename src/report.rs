//! 下書きフォルダの利益レポート
//!
//! フォルダ内の下書きJSONを読み込み、商品ごとの利益を一覧にする。
//! 読めないファイルは警告を出して飛ばす。

use crate::chart::load_draft;
use crate::error::{AdminError, Result};
use merch_admin_common::ProfitSnapshot;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 1商品分の行
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub path: PathBuf,
    pub name: String,
    pub profit: ProfitSnapshot,
}

/// レポート全体
#[derive(Debug, Clone, Default)]
pub struct ProfitReport {
    pub entries: Vec<ReportEntry>,
    /// 読み込みに失敗したファイルとエラー内容
    pub skipped: Vec<(PathBuf, String)>,
}

impl ProfitReport {
    /// 赤字の商品数
    pub fn loss_count(&self) -> usize {
        self.entries.iter().filter(|e| e.profit.is_loss()).count()
    }

    pub fn total_margin(&self) -> f64 {
        self.entries.iter().map(|e| e.profit.margin).sum()
    }
}

/// フォルダ内の下書きから利益レポートを作成
pub fn build_report(folder: &Path, recursive: bool, verbose: bool) -> Result<ProfitReport> {
    if !folder.exists() {
        return Err(AdminError::FolderNotFound(folder.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut report = ProfitReport::default();

    for entry in WalkDir::new(folder)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || !is_json(path) {
            continue;
        }

        if verbose {
            eprintln!("  読み込み: {}", path.display());
        }

        match load_draft(path) {
            Ok(draft) => {
                let name = if draft.name.trim().is_empty() {
                    path.file_stem()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_default()
                } else {
                    draft.name.clone()
                };
                report.entries.push(ReportEntry {
                    path: path.to_path_buf(),
                    name,
                    profit: draft.profit(),
                });
            }
            Err(e) => {
                eprintln!("警告: 下書きを読み込めません {}: {}", path.display(), e);
                report.skipped.push((path.to_path_buf(), e.to_string()));
            }
        }
    }

    // 利益の低い順
    report
        .entries
        .sort_by(|a, b| a.profit.margin.total_cmp(&b.profit.margin));

    Ok(report)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// レポートの表示行
pub fn render_report(report: &ProfitReport, currency: &str) -> String {
    let name_width = report
        .entries
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut out = format!(
        "{:<width$}  {:>10}  {:>10}  {:>10}  {:>7}\n",
        "商品", "販売価格", "総コスト", "利益", "利益率",
        width = name_width
    );
    for entry in &report.entries {
        let p = &entry.profit;
        out.push_str(&format!(
            "{:<width$}  {:>10}  {:>10}  {:>10}  {:>6}%{}\n",
            entry.name,
            format!("{}{:.2}", currency, p.selling_price),
            format!("{}{:.2}", currency, p.total_cost),
            format!("{}{:.2}", currency, p.margin),
            p.margin_percent.to_string(),
            if p.is_loss() { "  ⚠" } else { "" },
            width = name_width
        ));
    }
    out.push_str(&format!(
        "\n{}商品（赤字 {}件）  利益合計: {}{:.2}",
        report.entries.len(),
        report.loss_count(),
        currency,
        report.total_margin()
    ));
    if !report.skipped.is_empty() {
        out.push_str(&format!("  読み込み失敗: {}件", report.skipped.len()));
    }
    out
}
