//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use merch_admin::error::AdminError;
use merch_admin::{chart, report};
use merch_admin_common::{Error, ProductDraft};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダのレポート
#[test]
fn test_report_nonexistent_folder() {
    let result = report::build_report(Path::new("/nonexistent/path/12345"), false, false);
    assert!(matches!(result, Err(AdminError::FolderNotFound(_))));
}

/// 存在しない下書きファイル
#[test]
fn test_load_draft_file_not_found() {
    let result = chart::load_draft(Path::new("/nonexistent/draft.json"));
    assert!(matches!(result, Err(AdminError::FileNotFound(_))));
}

/// 壊れたサイズ表JSON
#[test]
fn test_load_table_invalid_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{"unit":"cm","columns":"#).expect("書き込み失敗");

    let result = chart::load_table(&path);
    assert!(matches!(result, Err(AdminError::Core(Error::Json(_)))));
}

/// サイズ指定が空
#[test]
fn test_parse_sizes_empty() {
    let result = chart::parse_sizes(" , ,");
    assert!(matches!(result, Err(AdminError::InvalidInput(_))));
}

/// 追加コストの書式誤りと重複
#[test]
fn test_parse_extras_errors() {
    let missing_eq = chart::parse_extras(&["shipping10".to_string()]);
    assert!(matches!(missing_eq, Err(AdminError::InvalidInput(_))));

    let duplicate = chart::parse_extras(&["shipping=1".to_string(), "shipping=2".to_string()]);
    assert!(matches!(duplicate, Err(AdminError::InvalidInput(_))));
}

/// 商品名なし・販売価格なし・アドオン不正
#[test]
fn test_submission_validation_errors() {
    let mut draft = ProductDraft::new("", "default");
    draft.selling_price = "20".to_string();
    assert!(matches!(draft.to_submission(), Err(Error::MissingField("name"))));

    draft.name = "Tee".to_string();
    draft.selling_price = "0".to_string();
    assert!(matches!(draft.to_submission(), Err(Error::InvalidPrice(_))));

    draft.selling_price = "20".to_string();
    draft.allowed_addons = "[{\"addonId\": 5}]".to_string();
    assert!(matches!(draft.to_submission(), Err(Error::InvalidAddons(_))));
}

/// エラーメッセージの表示
#[test]
fn test_error_display() {
    let err = AdminError::FileNotFound("chart.json".to_string());
    assert!(err.to_string().contains("chart.json"));

    let err: AdminError = Error::MissingField("name").into();
    assert!(err.to_string().contains("name"));
}
