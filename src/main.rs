use clap::Parser;
use merch_admin::{chart, cli, config, editor, error, export, preview, report};
use cli::{ChartAction, Cli, Commands, DraftAction};
use config::Config;
use error::Result;
use merch_admin_common::{compute_profit, ProductDraft};

fn main() {
    if let Err(e) = run() {
        eprintln!("エラー: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    if cli.verbose {
        eprintln!("設定: プリセット={} 単位={:?}", config.preset_key(), config.default_unit);
    }

    match cli.command {
        Commands::Chart { action } => match action {
            ChartAction::Build { sizes, preset, unit, output } => {
                let sizes = chart::parse_sizes(&sizes)?;
                let preset_key = preset.unwrap_or_else(|| config.preset_key());
                warn_unknown_preset(&preset_key);

                let table = chart::build_chart(&sizes, &preset_key, unit.or(config.default_unit));
                if cli.verbose {
                    eprintln!("{}", preview::render_chart(&table));
                }
                chart::write_payload(&table, output.as_deref())?;
            }

            ChartAction::Sync { input, sizes, preset, output } => {
                let table = chart::load_table(&input)?;
                let sizes = chart::parse_sizes(&sizes)?;
                let preset_key = preset.unwrap_or_else(|| config.preset_key());
                warn_unknown_preset(&preset_key);

                let synced = table.sync_to_sizes(&sizes, &preset_key);
                if cli.verbose {
                    eprintln!("同期前: [{}]", table.columns().join(", "));
                    eprintln!("同期後: [{}]", synced.columns().join(", "));
                }
                chart::write_payload(&synced, output.as_deref())?;
            }

            ChartAction::Presets => {
                println!("📐 組み込みプリセット:\n");
                for line in chart::preset_lines() {
                    println!("  {}", line);
                }
            }

            ChartAction::Export { input, output, title } => {
                println!("📄 merch-admin - サイズ表エクスポート\n");
                let table = chart::load_table(&input)?;
                let output_dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));
                let output_path = export::output_path_for(&output_dir, &title, "xlsx");

                println!("- Excelを生成中...");
                export::excel::generate_excel(&table, &output_path, &title, None)?;
                println!("✔ Excel出力: {}", output_path.display());
            }
        },

        Commands::Profit { selling, cost, extras, json } => {
            let lines = chart::parse_extras(&extras)?;
            let profit = compute_profit(&selling, &cost, lines.items());

            if json {
                println!("{}", serde_json::to_string_pretty(&profit)?);
            } else {
                println!("💰 利益プレビュー\n");
                println!("{}", preview::render_profit(&profit, &config.currency_symbol));
            }
        }

        Commands::Draft { action } => match action {
            DraftAction::New { output, name, preset } => {
                let preset_key = preset.unwrap_or_else(|| config.preset_key());
                warn_unknown_preset(&preset_key);

                let mut draft = ProductDraft::new(&name, &preset_key);
                if let Some(unit) = config.default_unit {
                    draft.edit_size_chart(|t| t.set_unit(unit));
                }
                chart::save_draft(&draft, &output)?;
                println!("✔ 下書きを作成: {}", output.display());
            }

            DraftAction::Check { input } => {
                let draft = chart::load_draft(&input)?;
                println!("📦 {} [{}]\n", draft.name, draft.sizes());
                println!("{}", preview::render_chart(draft.size_chart()));
                println!("{}\n", preview::render_profit(&draft.profit(), &config.currency_symbol));

                let submission = draft.to_submission()?;
                if cli.verbose || !draft.size_chart_enabled() {
                    println!("サイズ表: {}", if draft.size_chart_enabled() { "送信する" } else { "送信しない" });
                }
                println!("{}", serde_json::to_string_pretty(&submission)?);
                println!("\n✅ 検証OK");
            }

            DraftAction::Edit { input, output } => {
                println!("✏️  merch-admin - 下書き編集\n");
                editor::run_interactive_editor(&input, output.as_deref(), &config.currency_symbol)?;
            }

            DraftAction::Export { input, output } => {
                println!("📄 merch-admin - 下書きエクスポート\n");
                let draft = chart::load_draft(&input)?;
                let title = if draft.name.trim().is_empty() { "Size chart" } else { draft.name.trim() };
                let output_dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));
                let output_path = export::output_path_for(&output_dir, title, "xlsx");

                println!("- Excelを生成中...");
                let profit = draft.profit();
                export::excel::generate_excel(draft.size_chart(), &output_path, title, Some(&profit))?;
                println!("✔ Excel出力: {}", output_path.display());
            }
        },

        Commands::Report { folder, recursive } => {
            println!("📊 merch-admin - 利益レポート\n");
            let report = report::build_report(&folder, recursive, cli.verbose)?;
            if report.entries.is_empty() && report.skipped.is_empty() {
                println!("下書きが見つかりません: {}", folder.display());
            } else {
                println!("{}", report::render_report(&report, &config.currency_symbol));
            }
        }

        Commands::Config { set_default_preset, set_unit, show } => {
            let mut config = config;

            if let Some(key) = set_default_preset {
                config.set_default_preset(&key)?;
                println!("✔ デフォルトプリセットを設定しました: {}", config.default_preset);
            }

            if let Some(unit) = set_unit {
                config.set_default_unit(unit)?;
                println!("✔ デフォルト単位を設定しました: {}", unit);
            }

            if show {
                println!("設定:");
                println!("  プリセット: {}", config.preset_key());
                println!(
                    "  単位: {}",
                    config.default_unit.map(|u| u.to_string()).unwrap_or_else(|| "プリセットに従う".into())
                );
                println!("  通貨記号: {}", config.currency_symbol);
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

fn warn_unknown_preset(key: &str) {
    if merch_admin_common::Preset::find(key).is_none() {
        eprintln!(
            "警告: 不明なプリセット '{}' のためデフォルトを使用します",
            key
        );
    }
}
