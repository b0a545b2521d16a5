//! バッチ処理モジュール
//!
//! CSV行ごとの照合（純粋・オフライン）と、照合済み作品のページ検証・
//! PDFリンク取得（ネットワーク）を分けて実行する。1行の失敗で
//! バッチ全体は止めない。

use crate::fetcher::CatalogFetcher;
use imslp_report_common::{match_work, MatchResult, PdfLink, QueryInput, WorkCatalog};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

/// 処理済み作品（レポート1行分）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedWork {
    /// CSV内の物理行番号
    pub row_number: usize,
    /// 入力のままの作曲家
    pub original_composer: String,
    /// 入力のままの曲名
    pub original_title: String,
    /// 表示用の作曲家（照合済みなら正規表記、未照合なら原文）
    pub composer: String,
    /// 表示用の曲名
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub note: String,
    pub status: WorkStatus,
    /// ページ検証で存在が確認できたか
    #[serde(default)]
    pub url_valid: bool,
    #[serde(default)]
    pub pdf_links: Vec<PdfLink>,
}

/// 照合ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkStatus {
    Matched,
    NoMatch,
}

impl ProcessedWork {
    /// 照合結果から生成する（ページ検証前の状態）
    pub fn from_match(result: &MatchResult) -> Self {
        let input = &result.input;

        match &result.record {
            Some(record) => Self {
                row_number: input.row_number,
                original_composer: input.composer.clone(),
                original_title: input.title.clone(),
                composer: record.composer.clone(),
                title: record.canonical_title.clone(),
                url: Some(record.url.clone()),
                note: record.note.clone().unwrap_or_default(),
                status: WorkStatus::Matched,
                url_valid: false,
                pdf_links: Vec::new(),
            },
            None => Self {
                row_number: input.row_number,
                original_composer: input.composer.clone(),
                original_title: input.title.clone(),
                composer: input.composer.clone(),
                title: input.title.clone(),
                url: None,
                note: String::new(),
                status: WorkStatus::NoMatch,
                url_valid: false,
                pdf_links: Vec::new(),
            },
        }
    }

    pub fn is_matched(&self) -> bool {
        self.status == WorkStatus::Matched
    }
}

/// 全行を照合する（ネットワークなし、行ごとに独立）
pub fn match_queries(queries: &[QueryInput], catalog: &WorkCatalog) -> Vec<ProcessedWork> {
    queries
        .iter()
        .map(|query| ProcessedWork::from_match(&match_work(query, catalog)))
        .collect()
}

/// 照合できなかった行を抽出する
pub fn unmatched_works(works: &[ProcessedWork]) -> Vec<&ProcessedWork> {
    works.iter().filter(|w| !w.is_matched()).collect()
}

/// 照合済み作品のURL検証とPDFリンク取得
///
/// 未照合の行はスキップ。検証失敗・取得失敗は該当行だけに留め、
/// 後続の行の処理を続ける。
pub async fn verify_works(works: &mut [ProcessedWork], fetcher: &CatalogFetcher, verbose: bool) {
    let targets: Vec<usize> = works
        .iter()
        .enumerate()
        .filter(|(_, w)| w.is_matched())
        .map(|(i, _)| i)
        .collect();

    let bar = ProgressBar::new(targets.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
        bar.set_style(style);
    }

    for (done, &i) in targets.iter().enumerate() {
        let work = &mut works[i];
        let url = match &work.url {
            Some(url) => url.clone(),
            None => continue,
        };

        bar.set_message(format!("{} - {}", work.composer, work.title));

        if fetcher.page_exists(&url).await {
            work.url_valid = true;

            fetcher.polite_wait().await;
            match fetcher.pdf_links(&url).await {
                Ok(links) => work.pdf_links = links,
                Err(e) => {
                    if verbose {
                        eprintln!("PDFリンク取得失敗 ({}): {}", url, e);
                    }
                }
            }
        } else if verbose {
            eprintln!("URLが確認できません: {}", url);
        }

        bar.inc(1);
        if done + 1 < targets.len() {
            fetcher.polite_wait().await;
        }
    }

    bar.finish_and_clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use imslp_report_common::QueryInput;

    fn query(composer: &str, title: &str, row_number: usize) -> QueryInput {
        QueryInput {
            composer: composer.to_string(),
            title: title.to_string(),
            row_number,
        }
    }

    #[test]
    fn test_match_queries_preserves_row_order() {
        let catalog = WorkCatalog::builtin();
        let queries = vec![
            query("Mozart", "Symphony No.40 in G minor, mvt. 1", 2),
            query("Xenakis", "Metastaseis", 3),
            query("Bach", "Gavottes from Orchestral Suite", 5),
        ];

        let works = match_queries(&queries, &catalog);
        assert_eq!(works.len(), 3);
        assert_eq!(works[0].row_number, 2);
        assert!(works[0].is_matched());
        assert_eq!(works[0].title, "Symphony No.40, K.550");

        assert_eq!(works[1].status, WorkStatus::NoMatch);
        assert_eq!(works[1].composer, "Xenakis");
        assert!(works[1].url.is_none());

        assert!(works[2].is_matched());
    }

    #[test]
    fn test_unmatched_works() {
        let catalog = WorkCatalog::builtin();
        let queries = vec![
            query("Mozart", "Symphony No.40", 1),
            query("Xenakis", "Metastaseis", 2),
        ];

        let works = match_queries(&queries, &catalog);
        let unmatched = unmatched_works(&works);
        assert_eq!(unmatched.len(), 1);
        assert_eq!(unmatched[0].original_composer, "Xenakis");
    }

    #[test]
    fn test_processed_work_serde_roundtrip() {
        let catalog = WorkCatalog::builtin();
        let works = match_queries(&[query("Mozart", "Symphony No.40", 1)], &catalog);

        let json = serde_json::to_string_pretty(&works).expect("シリアライズ失敗");
        assert!(json.contains("\"status\": \"matched\""));

        let restored: Vec<ProcessedWork> = serde_json::from_str(&json).expect("デシリアライズ失敗");
        assert_eq!(works, restored);
    }

    #[test]
    fn test_no_match_keeps_original_text() {
        let catalog = WorkCatalog::builtin();
        let works = match_queries(&[query("Xenakis", "Metastaseis", 7)], &catalog);

        assert_eq!(works[0].title, "Metastaseis");
        assert_eq!(works[0].note, "");
        assert!(works[0].pdf_links.is_empty());
    }
}
