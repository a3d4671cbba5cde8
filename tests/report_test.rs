//! 利益レポートの統合テスト

use merch_admin::{chart, report};
use merch_admin_common::ProductDraft;
use tempfile::tempdir;

fn write_draft(path: &std::path::Path, name: &str, selling: &str, cost: &str) {
    let mut draft = ProductDraft::new(name, "default");
    draft.selling_price = selling.to_string();
    draft.cost_price = cost.to_string();
    chart::save_draft(&draft, path).expect("保存失敗");
}

#[test]
fn test_report_sorted_by_margin() {
    let dir = tempdir().expect("Failed to create temp dir");
    write_draft(&dir.path().join("a.json"), "Tee", "20", "5");
    write_draft(&dir.path().join("b.json"), "Cap", "10", "14");
    write_draft(&dir.path().join("c.json"), "Hoodie", "50", "30");
    std::fs::write(dir.path().join("notes.txt"), "ignored").expect("書き込み失敗");

    let report = report::build_report(dir.path(), false, false).expect("レポート作成失敗");
    let names: Vec<&str> = report.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Cap", "Tee", "Hoodie"]);
    assert_eq!(report.loss_count(), 1);
    assert_eq!(report.total_margin(), 31.0);
    assert!(report.skipped.is_empty());
}

#[test]
fn test_report_skips_broken_files() {
    let dir = tempdir().expect("Failed to create temp dir");
    write_draft(&dir.path().join("ok.json"), "Tee", "20", "5");
    std::fs::write(dir.path().join("broken.json"), "{ nope").expect("書き込み失敗");

    let report = report::build_report(dir.path(), false, false).expect("レポート作成失敗");
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.skipped.len(), 1);

    let text = report::render_report(&report, "$");
    assert!(text.contains("Tee"));
    assert!(text.contains("読み込み失敗: 1件"));
}

#[test]
fn test_report_recursive() {
    let dir = tempdir().expect("Failed to create temp dir");
    let sub = dir.path().join("summer");
    std::fs::create_dir_all(&sub).expect("フォルダ作成失敗");
    write_draft(&dir.path().join("top.json"), "Top", "10", "2");
    write_draft(&sub.join("nested.json"), "Nested", "10", "3");

    let flat = report::build_report(dir.path(), false, false).expect("レポート作成失敗");
    assert_eq!(flat.entries.len(), 1);

    let deep = report::build_report(dir.path(), true, false).expect("レポート作成失敗");
    assert_eq!(deep.entries.len(), 2);
}

#[test]
fn test_report_unnamed_draft_uses_file_stem() {
    let dir = tempdir().expect("Failed to create temp dir");
    write_draft(&dir.path().join("untitled-01.json"), "", "0", "0");

    let report = report::build_report(dir.path(), false, false).expect("レポート作成失敗");
    assert_eq!(report.entries[0].name, "untitled-01");

    // 販売価格0は利益率なし
    let text = report::render_report(&report, "$");
    assert!(text.contains("–"));
}
