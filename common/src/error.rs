//! エラー型定義
//!
//! サイズ表・利益計算そのものは失敗しない。
//! エラーになるのはJSONの読み込みと送信ペイロード組み立ての境界のみ。
//! ファイル入出力と設定のエラーはCLI側で扱う。

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid add-ons: {0}")]
    InvalidAddons(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_addons() {
        let error = Error::InvalidAddons("expected an array".to_string());
        assert_eq!(format!("{}", error), "Invalid add-ons: expected an array");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
