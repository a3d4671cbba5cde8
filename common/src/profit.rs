//! 利益プレビュー計算
//!
//! 販売価格・原価・追加コストから利益と利益率を求める。
//! キー入力ごとに呼ばれるため、入力途中の値でもエラーにしない。

use crate::cost::CostLineItem;
use crate::numeric::parse_lenient;
use serde::{Serialize, Serializer};

/// 利益率を計算できないときの表示
pub const UNAVAILABLE_MARKER: &str = "–";

/// 利益率
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginPercent {
    /// 百分率（販売価格が正のときのみ）
    Value(f64),
    /// 販売価格が 0 以下で計算不能
    Unavailable,
}

impl MarginPercent {
    pub fn is_available(&self) -> bool {
        matches!(self, MarginPercent::Value(_))
    }
}

impl std::fmt::Display for MarginPercent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // 0.05 ちょうどは切り上げ（12.25 → 12.3）
            MarginPercent::Value(v) => write!(f, "{:.1}", (v * 10.0).round() / 10.0),
            MarginPercent::Unavailable => write!(f, "{}", UNAVAILABLE_MARKER),
        }
    }
}

impl Serialize for MarginPercent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 利益の内訳（保存しない派生値）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitSnapshot {
    pub selling_price: f64,
    pub cost_price: f64,
    pub extras_total: f64,
    pub total_cost: f64,
    /// 赤字の場合は負の値のまま
    pub margin: f64,
    pub margin_percent: MarginPercent,
}

impl ProfitSnapshot {
    pub fn is_loss(&self) -> bool {
        self.margin < 0.0
    }
}

/// 利益を計算
pub fn compute_profit(
    selling_price_text: &str,
    cost_price_text: &str,
    cost_line_items: &[CostLineItem],
) -> ProfitSnapshot {
    let selling_price = parse_lenient(selling_price_text);
    let cost_price = parse_lenient(cost_price_text);
    let extras_total: f64 = cost_line_items.iter().map(CostLineItem::amount).sum();

    let total_cost = cost_price + extras_total;
    let margin = selling_price - total_cost;
    let margin_percent = if selling_price > 0.0 {
        MarginPercent::Value(margin / selling_price * 100.0)
    } else {
        MarginPercent::Unavailable
    };

    ProfitSnapshot {
        selling_price,
        cost_price,
        extras_total,
        total_cost,
        margin,
        margin_percent,
    }
}
