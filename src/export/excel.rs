//! Excel生成（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを作り、ファイルに書き出す

use crate::error::{AdminError, Result};
use merch_admin_common::export::excel_core::generate_size_chart_buffer;
use merch_admin_common::{MeasurementTable, ProfitSnapshot};
use std::path::Path;

pub fn generate_excel(
    table: &MeasurementTable,
    output_path: &Path,
    title: &str,
    profit: Option<&ProfitSnapshot>,
) -> Result<()> {
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();

    let buffer = generate_size_chart_buffer(table, title, &generated_at, profit)
        .map_err(AdminError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, buffer)?;

    Ok(())
}
