use clap::Parser;
use dialoguer::Input;
use imslp_report_rust::{cli, config, error, fetcher, pipeline, reader, report};
use cli::{Cli, Commands};
use config::Config;
use error::{ImslpReportError, Result};
use imslp_report_common::{match_work, QueryInput, WorkCatalog};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Match { csv, output, catalog } => {
            println!("🎼 imslp-report - カタログ照合\n");

            println!("[1/2] CSVを読み込み中...");
            let queries = reader::read_csv_works(&csv)?;
            println!("✔ {}件の作品を検出\n", queries.len());

            if queries.is_empty() {
                return Err(ImslpReportError::NoWorksFound(csv.display().to_string()));
            }

            let catalog = load_catalog(catalog.as_deref())?;

            println!("[2/2] カタログ照合中... (エントリ数: {})", catalog.len());
            let works = pipeline::match_queries(&queries, &catalog);
            let matched = works.iter().filter(|w| w.is_matched()).count();
            println!("✔ 照合完了: {}/{}件\n", matched, works.len());

            let output = output.unwrap_or_else(|| PathBuf::from("result.json"));
            let json = serde_json::to_string_pretty(&works)?;
            std::fs::write(&output, json)?;
            println!("✔ 結果を保存: {}", output.display());

            println!("\n✅ 照合完了");
        }

        Commands::Run { csv, output, format, title, max_works, catalog, skip_fetch } => {
            println!("🚀 imslp-report - 一括処理\n");

            // 1. CSV読み込み
            println!("[1/4] CSVを読み込み中...");
            let mut queries = reader::read_csv_works(&csv)?;
            if let Some(max) = max_works {
                queries.truncate(max);
            }
            println!("✔ {}件の作品を検出\n", queries.len());

            if queries.is_empty() {
                return Err(ImslpReportError::NoWorksFound(csv.display().to_string()));
            }

            // 2. 照合
            let catalog = load_catalog(catalog.as_deref())?;
            println!("[2/4] カタログ照合中... (エントリ数: {})", catalog.len());
            let mut works = pipeline::match_queries(&queries, &catalog);
            let matched = works.iter().filter(|w| w.is_matched()).count();
            println!("✔ 照合完了: {}/{}件\n", matched, works.len());

            // 3. ページ検証
            if skip_fetch {
                println!("[3/4] ページ検証をスキップ\n");
            } else {
                println!("[3/4] ページ検証・PDFリンク取得中...");
                let fetcher = fetcher::CatalogFetcher::new(&config)?;
                pipeline::verify_works(&mut works, &fetcher, cli.verbose).await;
                let valid = works.iter().filter(|w| w.url_valid).count();
                println!("✔ 検証完了: 有効URL {}/{}件\n", valid, matched);
            }

            // 4. レポート出力
            println!("[4/4] レポート生成中...");
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            report::generate_report(&works, &format, &output_dir, &title)?;

            println!("\n✅ 完了");
        }

        Commands::Report { input, output, format, title } => {
            println!("📄 imslp-report - レポート生成\n");

            let content = std::fs::read_to_string(&input)?;
            let works: Vec<pipeline::ProcessedWork> = serde_json::from_str(&content)?;

            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            report::generate_report(&works, &format, &output_dir, &title)?;

            println!("\n✅ レポート生成完了");
        }

        Commands::Missing { csv, catalog } => {
            println!("🔍 imslp-report - 未照合一覧\n");

            let queries = reader::read_csv_works(&csv)?;
            let catalog = load_catalog(catalog.as_deref())?;
            let works = pipeline::match_queries(&queries, &catalog);
            let unmatched = pipeline::unmatched_works(&works);

            if unmatched.is_empty() {
                println!("✓ すべての行が照合されました ({}件)", works.len());
            } else {
                println!("照合できなかった行: {}/{}件", unmatched.len(), works.len());
                for work in unmatched {
                    println!(
                        "  行{}: {} - {}",
                        work.row_number, work.original_composer, work.original_title
                    );
                }
            }
        }

        Commands::Lookup { composer, title, catalog } => {
            println!("🎼 imslp-report - 単品照合\n");

            let composer = match composer {
                Some(value) => value,
                None => prompt("作曲家")?,
            };
            let title = match title {
                Some(value) => value,
                None => prompt("曲名")?,
            };

            let catalog = load_catalog(catalog.as_deref())?;
            let query = QueryInput { composer, title, row_number: 1 };
            let result = match_work(&query, &catalog);

            match result.record {
                Some(record) => {
                    println!("✔ 照合されました");
                    println!("  曲名: {}", record.canonical_title);
                    println!("  作曲家: {}", record.composer);
                    println!("  URL: {}", record.url);
                    if let Some(note) = record.note {
                        println!("  補足: {}", note);
                    }
                }
                None => {
                    println!("✗ カタログに該当がありません");
                    println!(
                        "  検索リンク: {}",
                        report::html::imslp_search_url(&query.composer, &query.title)
                    );
                }
            }
        }

        Commands::Config { set_timeout, set_delay, set_max_pdf_links, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(seconds) = set_timeout {
                config.request_timeout_seconds = seconds;
                changed = true;
            }
            if let Some(millis) = set_delay {
                config.fetch_delay_ms = millis;
                changed = true;
            }
            if let Some(count) = set_max_pdf_links {
                config.max_pdf_links = count;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  タイムアウト: {}秒", config.request_timeout_seconds);
                println!("  リクエスト間待機: {}ms", config.fetch_delay_ms);
                println!("  PDFリンク最大数: {}", config.max_pdf_links);
                println!("  User-Agent: {}", config.user_agent);
            }
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    Input::new()
        .with_prompt(label)
        .interact_text()
        .map_err(|e| ImslpReportError::Prompt(e.to_string()))
}

/// 組み込みカタログに追加カタログをマージして返す
fn load_catalog(path: Option<&Path>) -> Result<WorkCatalog> {
    let mut catalog = WorkCatalog::builtin();

    if let Some(path) = path {
        if !path.exists() {
            return Err(ImslpReportError::FileNotFound(path.display().to_string()));
        }
        let extra = WorkCatalog::from_file(path)
            .map_err(|e| ImslpReportError::InvalidCatalog(e.to_string()))?;
        println!("- 追加カタログを読み込み: {} ({}エントリ)", path.display(), extra.len());
        catalog.merge(&extra);
    }

    Ok(catalog)
}
