//! 商品フォームの状態（作成・編集画面共通）
//!
//! サイズ選択・サイズ表・コスト明細を保持し、変更のたびに
//! サイズ表の同期と利益プレビューの再計算を行う。
//! 送信ペイロードを組み立てるのはこのモジュールだけ。

use crate::cost::{CostLineItem, CostLines};
use crate::error::{Error, Result};
use crate::numeric::{format_cell_number, is_blank, parse_lenient};
use crate::preset::{Preset, DEFAULT_PRESET_KEY};
use crate::profit::{compute_profit, ProfitSnapshot};
use crate::size_chart::{MeasurementTable, SizeChartPayload};
use crate::size_set::SizeSet;
use serde::{Deserialize, Serialize};

/// 購入可能なオプション（アドオン）への参照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddonRef {
    pub addon_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_override: Option<f64>,
}

/// 入力テキスト上の表記（ID文字列だけでも可）
#[derive(Deserialize)]
#[serde(untagged)]
enum AddonEntry {
    Id(String),
    Detailed(AddonRef),
}

impl From<AddonEntry> for AddonRef {
    fn from(entry: AddonEntry) -> Self {
        match entry {
            AddonEntry::Id(addon_id) => AddonRef {
                addon_id,
                price_override: None,
            },
            AddonEntry::Detailed(addon) => addon,
        }
    }
}

/// 許可アドオンの入力テキストを解析
///
/// 空欄は `None`。JSON配列として読めなければエラー。
pub fn parse_addons(text: &str) -> Result<Option<Vec<AddonRef>>> {
    if is_blank(text) {
        return Ok(None);
    }

    let entries: Vec<AddonEntry> = serde_json::from_str(text)
        .map_err(|e| Error::InvalidAddons(e.to_string()))?;

    let addons: Vec<AddonRef> = entries.into_iter().map(AddonRef::from).collect();
    if let Some(blank) = addons.iter().find(|a| is_blank(&a.addon_id)) {
        return Err(Error::InvalidAddons(format!("empty addon id: {:?}", blank)));
    }

    Ok(Some(addons))
}

/// 送信用の追加コスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedCost {
    pub key: String,
    pub label: String,
    pub amount: f64,
}

/// バックエンドに送る商品レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSubmission {
    pub name: String,
    pub selling_price: f64,
    pub cost_price: f64,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub additional_costs: Vec<SubmittedCost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_addons: Option<Vec<AddonRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_chart: Option<SizeChartPayload>,
}

/// 商品フォームの状態
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "DraftFields")]
pub struct ProductDraft {
    pub name: String,
    pub selling_price: String,
    pub cost_price: String,
    /// 許可アドオン（JSONテキストのまま保持）
    pub allowed_addons: String,
    pub costs: CostLines,
    sizes: SizeSet,
    size_chart_enabled: bool,
    chart_preset: String,
    size_chart: MeasurementTable,
}

/// ファイルから読んだ直後の状態（サイズ表は未同期）
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DraftFields {
    name: String,
    selling_price: String,
    cost_price: String,
    allowed_addons: String,
    costs: CostLines,
    sizes: SizeSet,
    size_chart_enabled: bool,
    chart_preset: String,
    size_chart: Option<MeasurementTable>,
}

impl From<DraftFields> for ProductDraft {
    fn from(fields: DraftFields) -> Self {
        let preset = Preset::lookup(&fields.chart_preset);
        let size_chart = match fields.size_chart {
            Some(table) if table.columns() == fields.sizes.as_slice() => table,
            Some(table) => table.sync_to_sizes(&fields.sizes, preset.key),
            None => MeasurementTable::from_preset(&fields.sizes, preset.key),
        };
        Self {
            name: fields.name,
            selling_price: fields.selling_price,
            cost_price: fields.cost_price,
            allowed_addons: fields.allowed_addons,
            costs: fields.costs,
            sizes: fields.sizes,
            size_chart_enabled: fields.size_chart_enabled,
            chart_preset: preset.key.to_string(),
            size_chart,
        }
    }
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self::new("", DEFAULT_PRESET_KEY)
    }
}

impl ProductDraft {
    pub fn new(name: &str, preset_key: &str) -> Self {
        let preset = Preset::lookup(preset_key);
        let sizes = SizeSet::new();
        Self {
            name: name.to_string(),
            selling_price: String::new(),
            cost_price: String::new(),
            allowed_addons: String::new(),
            costs: CostLines::new(),
            size_chart: MeasurementTable::from_preset(&sizes, preset.key),
            sizes,
            size_chart_enabled: false,
            chart_preset: preset.key.to_string(),
        }
    }

    /// 保存済みレコードから編集用の状態を復元
    pub fn from_submission(record: &ProductSubmission) -> Result<Self> {
        let sizes = SizeSet::from_labels(&record.sizes);
        let mut draft = Self::new(&record.name, DEFAULT_PRESET_KEY);

        draft.selling_price = format_cell_number(record.selling_price);
        draft.cost_price = format_cell_number(record.cost_price);
        draft.costs = record
            .additional_costs
            .iter()
            .enumerate()
            .map(|(i, c)| CostLineItem {
                id: i as u32,
                key: c.key.clone(),
                label: c.label.clone(),
                value: format_cell_number(c.amount),
            })
            .collect::<Vec<_>>()
            .into();
        if let Some(addons) = &record.allowed_addons {
            draft.allowed_addons = serde_json::to_string_pretty(addons)?;
        }

        match &record.size_chart {
            Some(payload) => {
                // サイズ選択と列がずれていても選択側に合わせる
                let table = MeasurementTable::from_payload(payload);
                draft.size_chart = table.sync_to_sizes(&sizes, &draft.chart_preset);
                draft.size_chart_enabled = true;
            }
            None => {
                draft.size_chart = MeasurementTable::from_preset(&sizes, &draft.chart_preset);
            }
        }
        draft.sizes = sizes;

        Ok(draft)
    }

    pub fn sizes(&self) -> &SizeSet {
        &self.sizes
    }

    pub fn size_chart(&self) -> &MeasurementTable {
        &self.size_chart
    }

    pub fn size_chart_enabled(&self) -> bool {
        self.size_chart_enabled
    }

    pub fn chart_preset(&self) -> &str {
        &self.chart_preset
    }

    /// サイズ選択を置き換え、サイズ表を同期
    pub fn set_sizes(&mut self, sizes: SizeSet) {
        // 同期は変更前の列を見る必要があるので、サイズ更新より先に行う
        self.size_chart = self.size_chart.sync_to_sizes(&sizes, &self.chart_preset);
        self.sizes = sizes;
    }

    /// サイズのオン/オフ切り替え
    pub fn toggle_size(&mut self, label: &str) {
        let mut sizes = self.sizes.clone();
        sizes.toggle(label);
        self.set_sizes(sizes);
    }

    /// カスタムサイズを追加（既にあれば false）
    pub fn add_custom_size(&mut self, label: &str) -> bool {
        let mut sizes = self.sizes.clone();
        if !sizes.add(label) {
            return false;
        }
        self.set_sizes(sizes);
        true
    }

    /// プリセットを切り替え、サイズ表を作り直す
    pub fn set_chart_preset(&mut self, preset_key: &str) {
        let preset = Preset::lookup(preset_key);
        self.chart_preset = preset.key.to_string();
        self.size_chart = MeasurementTable::from_preset(&self.sizes, preset.key);
    }

    pub fn enable_size_chart(&mut self, enabled: bool) {
        self.size_chart_enabled = enabled;
    }

    /// サイズ表を編集（行・セル・単位の変更）
    ///
    /// 編集結果の列がサイズ選択とずれた場合は選択側に合わせ直す。
    pub fn edit_size_chart<F>(&mut self, edit: F)
    where
        F: FnOnce(&MeasurementTable) -> MeasurementTable,
    {
        let edited = edit(&self.size_chart);
        self.size_chart = if edited.columns() == self.sizes.as_slice() {
            edited
        } else {
            edited.sync_to_sizes(&self.sizes, &self.chart_preset)
        };
    }

    /// 利益プレビュー
    pub fn profit(&self) -> ProfitSnapshot {
        compute_profit(&self.selling_price, &self.cost_price, self.costs.items())
    }

    /// 送信ペイロードを組み立て
    ///
    /// サイズ表は有効な場合のみ含める。
    pub fn to_submission(&self) -> Result<ProductSubmission> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::MissingField("name"));
        }

        let selling_price = parse_lenient(&self.selling_price);
        if selling_price <= 0.0 {
            return Err(Error::InvalidPrice(format!(
                "selling price must be positive: {:?}",
                self.selling_price
            )));
        }

        let additional_costs = self
            .costs
            .items()
            .iter()
            .map(|item| SubmittedCost {
                key: item.key.clone(),
                label: item.label.clone(),
                amount: item.amount(),
            })
            .collect();

        Ok(ProductSubmission {
            name: name.to_string(),
            selling_price,
            cost_price: parse_lenient(&self.cost_price),
            sizes: self.sizes.as_slice().to_vec(),
            additional_costs,
            allowed_addons: parse_addons(&self.allowed_addons)?,
            size_chart: self
                .size_chart_enabled
                .then(|| self.size_chart.to_payload()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_with_sizes(labels: &[&str]) -> ProductDraft {
        let mut draft = ProductDraft::new("Logo tee", "default");
        for label in labels {
            draft.toggle_size(label);
        }
        draft
    }

    #[test]
    fn test_toggle_size_keeps_chart_in_sync() {
        let mut draft = draft_with_sizes(&["M", "L"]);
        assert_eq!(draft.size_chart().columns(), &["M", "L"]);
        assert_eq!(draft.size_chart().rows()[0].values, vec!["20", "22"]);

        draft.edit_size_chart(|t| t.set_cell(0, 1, "23.5"));
        draft.toggle_size("M");
        draft.toggle_size("XL");
        assert_eq!(draft.size_chart().columns(), &["L", "XL"]);
        assert_eq!(draft.size_chart().rows()[0].values, vec!["23.5", "24"]);
        assert!(draft.size_chart().is_consistent());
    }

    #[test]
    fn test_custom_size_is_blank_on_sync() {
        let mut draft = draft_with_sizes(&["M"]);
        assert!(draft.add_custom_size("Tall"));
        assert!(!draft.add_custom_size("Tall"));
        assert_eq!(draft.size_chart().rows()[0].values, vec!["20", ""]);
    }

    #[test]
    fn test_set_chart_preset_rebuilds() {
        let mut draft = draft_with_sizes(&["M"]);
        draft.edit_size_chart(|t| t.set_cell(0, 0, "99"));
        draft.set_chart_preset("tshirt");
        assert_eq!(draft.chart_preset(), "tshirt");
        assert_eq!(draft.size_chart().rows()[0].values, vec!["51"]);

        draft.set_chart_preset("nope");
        assert_eq!(draft.chart_preset(), DEFAULT_PRESET_KEY);
    }

    #[test]
    fn test_edit_size_chart_cannot_break_columns() {
        let mut draft = draft_with_sizes(&["M", "L"]);
        let foreign = MeasurementTable::from_preset(&SizeSet::from_labels(["S"]), "default");
        draft.edit_size_chart(|_| foreign.clone());
        assert_eq!(draft.size_chart().columns(), &["M", "L"]);
        assert!(draft.size_chart().is_consistent());
    }

    #[test]
    fn test_profit_preview_uses_cost_lines() {
        let mut draft = draft_with_sizes(&[]);
        draft.selling_price = "100".into();
        draft.cost_price = "40".into();
        draft.costs.add_preset("shipping");
        let id = draft.costs.items()[0].id;
        draft.costs.set_value(id, "15");

        let profit = draft.profit();
        assert_eq!(profit.total_cost, 55.0);
        assert_eq!(profit.margin_percent.to_string(), "45.0");
    }

    #[test]
    fn test_submission_omits_disabled_chart() {
        let mut draft = draft_with_sizes(&["M"]);
        draft.selling_price = "25".into();
        let submission = draft.to_submission().unwrap();
        assert!(submission.size_chart.is_none());
        assert!(submission.allowed_addons.is_none());

        draft.enable_size_chart(true);
        let submission = draft.to_submission().unwrap();
        let chart = submission.size_chart.unwrap();
        assert_eq!(chart.columns, vec!["M"]);
        assert_eq!(chart.rows[0].values, vec![20.0]);
    }

    #[test]
    fn test_submission_validation() {
        let mut draft = draft_with_sizes(&["M"]);
        draft.selling_price = "25".into();
        draft.name = "  ".into();
        assert!(matches!(draft.to_submission(), Err(Error::MissingField("name"))));

        draft.name = "Logo tee".into();
        draft.selling_price = "".into();
        assert!(matches!(draft.to_submission(), Err(Error::InvalidPrice(_))));
    }

    #[test]
    fn test_parse_addons() {
        assert!(parse_addons("  ").unwrap().is_none());

        let addons = parse_addons(r#"["gift-wrap", {"addonId": "engraving", "priceOverride": 4.5}]"#)
            .unwrap()
            .unwrap();
        assert_eq!(addons[0].addon_id, "gift-wrap");
        assert_eq!(addons[1].price_override, Some(4.5));

        assert!(matches!(parse_addons("{not json"), Err(Error::InvalidAddons(_))));
        assert!(matches!(parse_addons(r#"{"addonId": "x"}"#), Err(Error::InvalidAddons(_))));
        assert!(matches!(parse_addons(r#"[""]"#), Err(Error::InvalidAddons(_))));
    }

    #[test]
    fn test_submission_roundtrip_through_draft() {
        let mut draft = draft_with_sizes(&["S", "M"]);
        draft.selling_price = "30".into();
        draft.cost_price = "12.5".into();
        draft.allowed_addons = r#"["gift-wrap"]"#.into();
        draft.costs.add_preset("packaging");
        let id = draft.costs.items()[0].id;
        draft.costs.set_value(id, "1.2");
        draft.enable_size_chart(true);
        draft.edit_size_chart(|t| t.set_cell(1, 0, ""));

        let submission = draft.to_submission().unwrap();
        let reloaded = ProductDraft::from_submission(&submission).unwrap();
        assert_eq!(reloaded.to_submission().unwrap(), submission);
        assert_eq!(reloaded.size_chart().value(1, 0), Some("0"));
    }

    #[test]
    fn test_draft_json_defaults() {
        let draft: ProductDraft = serde_json::from_str(r#"{"name": "Cap"}"#).unwrap();
        assert_eq!(draft.chart_preset(), DEFAULT_PRESET_KEY);
        assert!(draft.sizes().is_empty());
        assert!(!draft.size_chart_enabled());
    }

    #[test]
    fn test_draft_json_syncs_chart_on_load() {
        let json = r#"{
            "name": "Cap",
            "sizes": ["M", "L"],
            "chartPreset": "hoodie",
            "sizeChart": {"unit": "inches", "columns": ["M"], "rows": [{"label": "Chest", "values": ["21"]}]}
        }"#;
        let draft: ProductDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.size_chart().columns(), &["M", "L"]);
        assert_eq!(draft.size_chart().rows()[0].values, vec!["21", "24"]);

        let saved = serde_json::to_string(&draft).unwrap();
        let restored: ProductDraft = serde_json::from_str(&saved).unwrap();
        assert_eq!(restored, draft);
    }
}
