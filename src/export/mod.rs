pub mod excel;

use std::path::{Path, PathBuf};

/// 出力先がディレクトリ（または拡張子なし）ならタイトルからファイル名を作る
pub fn output_path_for(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", file_stem_for(title), extension))
    } else {
        output.to_path_buf()
    }
}

/// ファイル名に使えない文字を置き換える
fn file_stem_for(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') { '_' } else { c })
        .collect();
    if stem.is_empty() {
        "size-chart".to_string()
    } else {
        stem
    }
}
