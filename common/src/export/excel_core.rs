//! Excel生成（共通ライブラリ）
//!
//! サイズ表シートと、任意で利益プレビューシートをバッファに書き出す。

use crate::numeric::{is_blank, parse_lenient};
use crate::profit::ProfitSnapshot;
use crate::size_chart::MeasurementTable;
use rust_xlsxwriter::*;

const LABEL_COL_WIDTH: f64 = 22.0;
const SIZE_COL_WIDTH: f64 = 9.0;

/// 表のヘッダー行（0始まり）
const HEADER_ROW: u32 = 3;

/// サイズ表をExcelバッファに生成
///
/// # Arguments
/// * `table` - サイズ表
/// * `title` - シート先頭のタイトル
/// * `generated_at` - 出力日時の表示文字列
/// * `profit` - 指定時は「Profit」シートを追加
pub fn generate_size_chart_buffer(
    table: &MeasurementTable,
    title: &str,
    generated_at: &str,
    profit: Option<&ProfitSnapshot>,
) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    // フォーマット定義
    let title_format = Format::new()
        .set_bold()
        .set_font_size(14.0)
        .set_align(FormatAlign::Left);

    let meta_format = Format::new()
        .set_font_size(9.0)
        .set_font_color(Color::RGB(0x555555));

    let header_format = Format::new()
        .set_bold()
        .set_font_size(10.0)
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let label_format = Format::new()
        .set_bold()
        .set_font_size(10.0)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let value_format = Format::new()
        .set_font_size(10.0)
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Size chart")
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    worksheet.set_column_width(0, LABEL_COL_WIDTH)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;
    for col in 0..table.columns().len() {
        worksheet.set_column_width(size_col(col)?, SIZE_COL_WIDTH)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
    }

    // タイトル（サイズ列があれば横に結合）
    let last_col = table.columns().len() as u16;
    if last_col > 0 {
        worksheet.merge_range(0, 0, 0, last_col, title, &title_format)
            .map_err(|e| format!("セルマージエラー: {}", e))?;
    } else {
        worksheet.write_string_with_format(0, 0, title, &title_format)
            .map_err(|e| format!("タイトル書き込みエラー: {}", e))?;
    }

    worksheet.write_string_with_format(1, 0, format!("Unit: {}", table.unit()), &meta_format)
        .map_err(|e| format!("単位書き込みエラー: {}", e))?;
    worksheet.write_string_with_format(2, 0, format!("Generated: {}", generated_at), &meta_format)
        .map_err(|e| format!("日時書き込みエラー: {}", e))?;

    // ヘッダー行
    worksheet.write_string_with_format(HEADER_ROW, 0, "Measurement", &header_format)
        .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    for (col, size) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(HEADER_ROW, size_col(col)?, size, &header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }

    // 計測値（空欄は空セルのまま）
    for (i, row) in table.rows().iter().enumerate() {
        let excel_row = HEADER_ROW + 1 + i as u32;
        worksheet.write_string_with_format(excel_row, 0, &row.label, &label_format)
            .map_err(|e| format!("ラベル書き込みエラー: {}", e))?;

        for (col, value) in row.values.iter().enumerate() {
            let excel_col = size_col(col)?;
            if is_blank(value) {
                worksheet.write_blank(excel_row, excel_col, &value_format)
                    .map_err(|e| format!("値書き込みエラー: {}", e))?;
            } else {
                worksheet.write_number_with_format(excel_row, excel_col, parse_lenient(value), &value_format)
                    .map_err(|e| format!("値書き込みエラー: {}", e))?;
            }
        }
    }

    if let Some(profit) = profit {
        write_profit_sheet(&mut workbook, profit, &label_format, &value_format)?;
    }

    // バッファに書き出し
    workbook.save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

/// 利益プレビューシート
fn write_profit_sheet(
    workbook: &mut Workbook,
    profit: &ProfitSnapshot,
    label_format: &Format,
    value_format: &Format,
) -> Result<(), String> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Profit")
        .map_err(|e| format!("シート名設定エラー: {}", e))?;
    worksheet.set_column_width(0, LABEL_COL_WIDTH)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;
    worksheet.set_column_width(1, 14.0)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;

    let amounts = [
        ("Selling price", profit.selling_price),
        ("Cost price", profit.cost_price),
        ("Additional costs", profit.extras_total),
        ("Total cost", profit.total_cost),
        ("Margin", profit.margin),
    ];

    let money_format = value_format.clone().set_num_format("#,##0.00");
    for (row, (label, amount)) in amounts.iter().enumerate() {
        worksheet.write_string_with_format(row as u32, 0, *label, label_format)
            .map_err(|e| format!("ラベル書き込みエラー: {}", e))?;
        worksheet.write_number_with_format(row as u32, 1, *amount, &money_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
    }

    let percent_row = amounts.len() as u32;
    worksheet.write_string_with_format(percent_row, 0, "Margin %", label_format)
        .map_err(|e| format!("ラベル書き込みエラー: {}", e))?;
    worksheet.write_string_with_format(percent_row, 1, profit.margin_percent.to_string(), value_format)
        .map_err(|e| format!("値書き込みエラー: {}", e))?;

    Ok(())
}

/// サイズ列番号（A列はラベル）
fn size_col(index: usize) -> Result<u16, String> {
    u16::try_from(index + 1).map_err(|_| format!("列数が多すぎます: {}", index + 1))
}
