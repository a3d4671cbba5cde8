//! 入力途中の数値テキストを扱うユーティリティ
//!
//! フォーム入力はキー入力ごとに再計算されるため、
//! 空文字や不正な文字列はエラーにせず 0 として扱う。

use regex::Regex;

/// 先頭の数値部分を読み取る（読めなければ 0）
///
/// `"12.5kg"` は 12.5、`"abc"` や `""` は 0 になる。
/// 無限大・NaN も 0 として扱う。
pub fn parse_lenient(text: &str) -> f64 {
    lazy_static::lazy_static! {
        static ref LEADING_NUMBER_RE: Regex =
            Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap();
    }

    LEADING_NUMBER_RE
        .find(text)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// 空欄かどうか（空白のみも空欄）
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// ペイロードの数値を編集用テキストに戻す
///
/// 整数は小数点なし（`20.0` → `"20"`）、それ以外は最短表記。
pub fn format_cell_number(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}
