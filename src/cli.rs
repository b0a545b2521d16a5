use clap::{Parser, Subcommand};
use crate::report::ReportFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imslp-report")]
#[command(about = "IMSLP楽譜カタログ照合・HTMLレポート生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// CSVをカタログ照合して結果JSONを出力（ネットワークなし）
    Match {
        /// 入力CSVファイル（作曲家, 曲名の2列）
        #[arg(required = true)]
        csv: PathBuf,

        /// 出力JSONファイル（デフォルト: result.json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 追加カタログJSONファイル（組み込みカタログに上書きマージ）
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// 照合からページ検証・レポート出力まで一括実行
    Run {
        /// 入力CSVファイル（作曲家, 曲名の2列）
        #[arg(required = true)]
        csv: PathBuf,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (html/json/both)
        #[arg(short, long, default_value = "html")]
        format: ReportFormat,

        /// レポートタイトル
        #[arg(short, long, default_value = "IMSLP楽譜リンク集")]
        title: String,

        /// 処理する最大行数
        #[arg(long)]
        max_works: Option<usize>,

        /// 追加カタログJSONファイル
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// ページ検証をスキップ（照合のみでレポート生成）
        #[arg(long)]
        skip_fetch: bool,
    },

    /// 結果JSONからレポートを生成
    Report {
        /// 入力JSONファイル（matchまたはrunの出力）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (html/json/both)
        #[arg(short, long, default_value = "both")]
        format: ReportFormat,

        /// レポートタイトル
        #[arg(short, long, default_value = "IMSLP楽譜リンク集")]
        title: String,
    },

    /// 照合できなかった行を一覧表示
    Missing {
        /// 入力CSVファイル
        #[arg(required = true)]
        csv: PathBuf,

        /// 追加カタログJSONファイル
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// 1件を対話的に照合
    Lookup {
        /// 作曲家（省略時は対話入力）
        #[arg(short = 'c', long)]
        composer: Option<String>,

        /// 曲名（省略時は対話入力）
        #[arg(short = 't', long)]
        title: Option<String>,

        /// 追加カタログJSONファイル
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// リクエストタイムアウト（秒）を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// リクエスト間の待機（ミリ秒）を設定
        #[arg(long)]
        set_delay: Option<u64>,

        /// 取得するPDFリンクの最大数を設定
        #[arg(long)]
        set_max_pdf_links: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_format_from_str() {
        assert!(matches!("html".parse::<ReportFormat>(), Ok(ReportFormat::Html)));
        assert!(matches!("JSON".parse::<ReportFormat>(), Ok(ReportFormat::Json)));
        assert!(matches!("both".parse::<ReportFormat>(), Ok(ReportFormat::Both)));
        assert!("pdf".parse::<ReportFormat>().is_err());
    }
}
