//! カタログページ取得モジュール
//!
//! 正規URLの存在確認と、作品ページからのPDFリンク抽出を行う。
//! リトライやダウンロードは行わず、リクエスト間に固定の待機を
//! 挟むだけの素朴な実装。

use crate::config::Config;
use crate::error::Result;
use imslp_report_common::PdfLink;
use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;

const IMSLP_BASE: &str = "https://imslp.org";

/// 説明文の最大文字数（超過分は省略記号で切る）
const DESCRIPTION_MAX_CHARS: usize = 150;

pub struct CatalogFetcher {
    client: reqwest::Client,
    max_pdf_links: usize,
    delay: Duration,
}

impl CatalogFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            max_pdf_links: config.max_pdf_links,
            delay: Duration::from_millis(config.fetch_delay_ms),
        })
    }

    /// リクエスト間の待機
    pub async fn polite_wait(&self) {
        tokio::time::sleep(self.delay).await;
    }

    /// ページが存在するか（HEAD、最終ステータス200のみ真）
    ///
    /// 通信エラーは「存在しない」として扱う。検証失敗は処理を
    /// 止める理由にならないため。
    pub async fn page_exists(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(_) => false,
        }
    }

    /// 作品ページからPDFリンクを抽出する
    pub async fn pdf_links(&self, url: &str) -> Result<Vec<PdfLink>> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(extract_pdf_links(&body, self.max_pdf_links))
    }
}

lazy_static! {
    /// ダウンロード情報のスパン
    static ref FILE_INFO_RE: Regex =
        Regex::new(r#"(?s)<span[^>]*class="[^"]*we_file_info2[^"]*"[^>]*>(.*?)</span>"#).unwrap();
    /// スパン内のアンカー
    static ref ANCHOR_RE: Regex =
        Regex::new(r#"(?s)<a[^>]+href="([^"]+)"[^>]*>(.*?)</a>"#).unwrap();
    /// ファイルサイズ表記
    static ref SIZE_RE: Regex = Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(MB|KB|GB)").unwrap();
    /// HTMLタグ
    static ref TAG_RE: Regex = Regex::new(r"<[^>]+>").unwrap();
}

/// HTMLからPDFリンクを抽出する（最大limit件）
pub fn extract_pdf_links(html: &str, limit: usize) -> Vec<PdfLink> {
    let mut links = Vec::new();

    for span in FILE_INFO_RE.captures_iter(html) {
        let span_html = &span[1];

        let anchor = match ANCHOR_RE.captures(span_html) {
            Some(a) => a,
            None => continue,
        };

        let href = anchor[1].to_string();
        let href_lower = href.to_lowercase();
        if !(href_lower.ends_with(".pdf") || href_lower.contains("pdf")) {
            continue;
        }

        links.push(PdfLink {
            title: strip_tags(&anchor[2]),
            url: absolutize(&href),
            description: extract_description(span_html),
            size_label: extract_size_label(span_html),
        });

        if links.len() >= limit {
            break;
        }
    }

    links
}

fn absolutize(href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{}{}", IMSLP_BASE, href)
    } else {
        format!("{}/{}", IMSLP_BASE, href)
    }
}

fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn extract_description(span_html: &str) -> String {
    let text = strip_tags(span_html);
    if text.is_empty() {
        return "PDF Score".to_string();
    }

    if text.chars().count() > DESCRIPTION_MAX_CHARS {
        let truncated: String = text.chars().take(DESCRIPTION_MAX_CHARS).collect();
        format!("{}...", truncated)
    } else {
        text
    }
}

fn extract_size_label(span_html: &str) -> String {
    let text = strip_tags(span_html);
    match SIZE_RE.captures(&text) {
        Some(captures) => format!("{} {}", &captures[1], captures[2].to_uppercase()),
        None => "Unknown size".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <div>
            <span class="we_file_info2">
                <a href="/images/a/ab/PMLP01234-score.pdf">Complete Score</a>
                <b>2.3 MB</b> - Urtext edition
            </span>
            <span class="we_file_info2">
                <a href="https://example.org/other.txt">Not a PDF</a>
            </span>
            <span class="we_file_info2">
                <a href="/images/c/cd/PMLP01234-parts.pdf">Parts</a>
                540 KB
            </span>
        </div>
    "#;

    #[test]
    fn test_extract_pdf_links() {
        let links = extract_pdf_links(SAMPLE_HTML, 3);
        assert_eq!(links.len(), 2);

        assert_eq!(links[0].title, "Complete Score");
        assert_eq!(
            links[0].url,
            "https://imslp.org/images/a/ab/PMLP01234-score.pdf"
        );
        assert_eq!(links[0].size_label, "2.3 MB");
        assert!(links[0].description.contains("Urtext"));

        assert_eq!(links[1].title, "Parts");
        assert_eq!(links[1].size_label, "540 KB");
    }

    #[test]
    fn test_extract_pdf_links_limit() {
        let links = extract_pdf_links(SAMPLE_HTML, 1);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "Complete Score");
    }

    #[test]
    fn test_extract_pdf_links_no_spans() {
        let links = extract_pdf_links("<html><body>nothing here</body></html>", 3);
        assert!(links.is_empty());
    }

    #[test]
    fn test_absolutize() {
        assert_eq!(
            absolutize("/images/x.pdf"),
            "https://imslp.org/images/x.pdf"
        );
        assert_eq!(absolutize("https://other.org/x.pdf"), "https://other.org/x.pdf");
    }

    #[test]
    fn test_size_label_unknown() {
        assert_eq!(extract_size_label("<a>no size info</a>"), "Unknown size");
    }

    #[test]
    fn test_description_truncated() {
        let long_text = format!("<span>{}</span>", "a".repeat(200));
        let description = extract_description(&long_text);
        assert!(description.ends_with("..."));
        assert_eq!(description.chars().count(), DESCRIPTION_MAX_CHARS + 3);
    }
}
