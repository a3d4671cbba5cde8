use clap::{Parser, Subcommand};
use merch_admin_common::Unit;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "merch-admin")]
#[command(about = "商品サイズ表・利益プレビュー管理ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// サイズ表の作成・同期・出力
    Chart {
        #[command(subcommand)]
        action: ChartAction,
    },

    /// 利益プレビューを計算
    Profit {
        /// 販売価格
        #[arg(short, long, default_value = "")]
        selling: String,

        /// 原価
        #[arg(short, long, default_value = "")]
        cost: String,

        /// 追加コスト（key=値、複数指定可）例: shipping=10
        #[arg(short = 'x', long = "extra")]
        extras: Vec<String>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 商品下書きの作成・検証・編集
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },

    /// フォルダ内の下書きの利益一覧
    Report {
        /// 下書きJSONのフォルダ
        #[arg(required = true)]
        folder: PathBuf,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// 設定を表示/編集
    Config {
        /// デフォルトプリセットを設定
        #[arg(long)]
        set_default_preset: Option<String>,

        /// デフォルト単位を設定 (inches/cm)
        #[arg(long)]
        set_unit: Option<Unit>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum ChartAction {
    /// プリセットからサイズ表を作成
    Build {
        /// サイズ（カンマ区切り）例: M,L,XL
        #[arg(short, long)]
        sizes: String,

        /// プリセット（省略時は設定値）
        #[arg(short, long)]
        preset: Option<String>,

        /// 単位 (inches/cm)
        #[arg(short, long)]
        unit: Option<Unit>,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 既存のサイズ表を新しいサイズ選択に同期
    Sync {
        /// サイズ表JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 新しいサイズ（カンマ区切り）
        #[arg(short, long)]
        sizes: String,

        /// 新規サイズの補完に使うプリセット
        #[arg(short, long)]
        preset: Option<String>,

        /// 出力先（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 組み込みプリセット一覧
    Presets,

    /// サイズ表をExcelに出力
    Export {
        /// サイズ表JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// シートのタイトル
        #[arg(short, long, default_value = "Size chart")]
        title: String,
    },
}

#[derive(Subcommand)]
pub enum DraftAction {
    /// 空の下書きを作成
    New {
        /// 出力JSONファイル
        #[arg(required = true)]
        output: PathBuf,

        /// 商品名
        #[arg(short, long, default_value = "")]
        name: String,

        /// サイズ表プリセット（省略時は設定値）
        #[arg(short, long)]
        preset: Option<String>,
    },

    /// 下書きを検証し、利益と送信ペイロードを表示
    Check {
        /// 下書きJSONファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 対話的に下書きを編集
    Edit {
        /// 下書きJSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力先（省略時は上書き）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// サイズ表と利益をExcelに出力
    Export {
        /// 下書きJSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
