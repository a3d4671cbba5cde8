//! サイズ表・利益プレビューのテキスト表示

use merch_admin_common::{MeasurementTable, ProfitSnapshot};

/// サイズ表を等幅テキストの表にする
pub fn render_chart(table: &MeasurementTable) -> String {
    let label_width = table
        .rows()
        .iter()
        .map(|r| r.label.chars().count())
        .chain(std::iter::once("Measurement".len()))
        .max()
        .unwrap_or(0);

    let col_widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, size)| {
            table
                .rows()
                .iter()
                .filter_map(|r| r.values.get(i))
                .map(|v| v.chars().count())
                .chain(std::iter::once(size.chars().count()))
                .max()
                .unwrap_or(1)
                .max(1)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format!("{:<width$}", "Measurement", width = label_width));
    for (size, width) in table.columns().iter().zip(&col_widths) {
        out.push_str(&format!(" | {:>width$}", size, width = *width));
    }
    out.push_str(&format!("   ({})\n", table.unit()));

    for row in table.rows() {
        out.push_str(&format!("{:<width$}", row.label, width = label_width));
        for (value, width) in row.values.iter().zip(&col_widths) {
            let shown = if value.trim().is_empty() { "-" } else { value.as_str() };
            out.push_str(&format!(" | {:>width$}", shown, width = *width));
        }
        out.push('\n');
    }

    out
}

/// 利益プレビューの表示
pub fn render_profit(profit: &ProfitSnapshot, currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("  販売価格: {}{:.2}\n", currency, profit.selling_price));
    out.push_str(&format!("  原価:     {}{:.2}\n", currency, profit.cost_price));
    out.push_str(&format!("  追加コスト: {}{:.2}\n", currency, profit.extras_total));
    out.push_str(&format!("  総コスト: {}{:.2}\n", currency, profit.total_cost));
    out.push_str(&format!("  利益:     {}{:.2}\n", currency, profit.margin));
    out.push_str(&format!("  利益率:   {}%", profit.margin_percent));
    if profit.is_loss() {
        out.push_str("  ⚠ 赤字");
    }
    out
}
