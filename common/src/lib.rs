//! Merch Admin Common Library
//!
//! 商品フォームのサイズ表同期と利益プレビュー計算。
//! CLIと管理画面で共有される型とユーティリティ

pub mod cost;
pub mod export;
pub mod error;
pub mod numeric;
pub mod preset;
pub mod product;
pub mod profit;
pub mod size_chart;
pub mod size_set;

pub use cost::{CostLineItem, CostLines, COST_PRESETS};
pub use error::{Error, Result};
pub use numeric::{format_cell_number, parse_lenient};
pub use preset::{Preset, DEFAULT_PRESET_KEY, PRESETS};
pub use product::{parse_addons, AddonRef, ProductDraft, ProductSubmission};
pub use profit::{compute_profit, MarginPercent, ProfitSnapshot};
pub use size_chart::{MeasurementRow, MeasurementTable, SizeChartPayload, Unit};
pub use size_set::{SizeSet, STANDARD_SIZES};
