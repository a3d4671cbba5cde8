//! merch-admin
//!
//! 商品サイズ表と利益プレビューを扱うCLI。
//! 計算ロジックは `merch_admin_common` にあり、ここではファイル入出力と対話操作を担当する。

pub mod chart;
pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod preview;
pub mod report;
