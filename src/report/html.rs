//! HTMLレポート生成
//!
//! 照合結果を1ページの自己完結HTMLとして組み立てる。照合済みの
//! 作品は正規タイトルとPDFリンク、未照合の行は原文とIMSLP検索
//! リンクを表示する。

use crate::pipeline::{ProcessedWork, WorkStatus};
use imslp_report_common::normalize_composer_name;

const SEARCH_BASE: &str = "https://imslp.org/wiki/Special:IMSLPSearch";

/// レポート全体のHTMLを組み立てる
pub fn render_html(works: &[ProcessedWork], title: &str) -> String {
    let total = works.len();
    let matched = works.iter().filter(|w| w.is_matched()).count();
    let valid_urls = works.iter().filter(|w| w.url_valid).count();
    let total_pdfs: usize = works.iter().map(|w| w.pdf_links.len()).sum();
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M");

    let mut sections = String::new();
    for work in works {
        sections.push_str(&render_work_section(work));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; line-height: 1.6; margin: 0 auto; max-width: 960px; padding: 20px; color: #2c3e50; }}
h1 {{ border-bottom: 3px solid #8e44ad; padding-bottom: 12px; }}
.stats {{ display: flex; gap: 16px; margin: 20px 0; }}
.stat {{ flex: 1; background: #f4ecf7; border-radius: 8px; padding: 12px; text-align: center; }}
.stat b {{ display: block; font-size: 1.6em; }}
.work {{ border-left: 5px solid #ccc; border-radius: 4px; background: #fafafa; margin: 16px 0; padding: 12px 16px; }}
.work.matched {{ border-left-color: #27ae60; }}
.work.no-match {{ border-left-color: #f39c12; }}
.work h2 {{ margin: 0 0 4px; font-size: 1.1em; }}
.original {{ color: #7f8c8d; font-size: 0.9em; }}
.note {{ color: #8e44ad; font-size: 0.9em; }}
ul.pdfs {{ margin: 8px 0 0; }}
.size {{ color: #7f8c8d; font-size: 0.85em; }}
footer {{ color: #7f8c8d; font-size: 0.85em; margin-top: 30px; }}
</style>
</head>
<body>
<h1>{title}</h1>
<div class="stats">
<div class="stat"><b>{total}</b>作品数</div>
<div class="stat"><b>{matched}</b>照合済み</div>
<div class="stat"><b>{valid_urls}</b>有効URL</div>
<div class="stat"><b>{total_pdfs}</b>PDFリンク</div>
</div>
{sections}
<footer>生成日時: {generated}</footer>
</body>
</html>
"#,
        title = escape_html(title),
        total = total,
        matched = matched,
        valid_urls = valid_urls,
        total_pdfs = total_pdfs,
        sections = sections,
        generated = generated,
    )
}

fn render_work_section(work: &ProcessedWork) -> String {
    match work.status {
        WorkStatus::Matched => render_matched_section(work),
        WorkStatus::NoMatch => render_unmatched_section(work),
    }
}

fn render_matched_section(work: &ProcessedWork) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        "<p class=\"original\">行{}: {} - {}</p>\n",
        work.row_number,
        escape_html(&work.original_composer),
        escape_html(&work.original_title)
    ));

    if !work.note.is_empty() {
        body.push_str(&format!("<p class=\"note\">{}</p>\n", escape_html(&work.note)));
    }

    if let Some(url) = &work.url {
        let validity = if work.url_valid { "" } else { "（未確認）" };
        body.push_str(&format!(
            "<p><a href=\"{}\">楽譜ページを開く</a>{}</p>\n",
            escape_html(url),
            validity
        ));
    }

    if !work.pdf_links.is_empty() {
        body.push_str("<ul class=\"pdfs\">\n");
        for link in &work.pdf_links {
            body.push_str(&format!(
                "<li><a href=\"{}\">{}</a> <span class=\"size\">{}</span><br>{}</li>\n",
                escape_html(&link.url),
                escape_html(&link.title),
                escape_html(&link.size_label),
                escape_html(&link.description)
            ));
        }
        body.push_str("</ul>\n");
    }

    format!(
        "<div class=\"work matched\">\n<h2>{} - {}</h2>\n{}</div>\n",
        escape_html(&work.composer),
        escape_html(&work.title),
        body
    )
}

fn render_unmatched_section(work: &ProcessedWork) -> String {
    let search_url = imslp_search_url(&work.original_composer, &work.original_title);

    format!(
        "<div class=\"work no-match\">\n<h2>{} - {}</h2>\n\
         <p class=\"original\">行{}: カタログに該当なし</p>\n\
         <p><a href=\"{}\">IMSLPで検索する</a></p>\n</div>\n",
        escape_html(&work.original_composer),
        escape_html(&work.original_title),
        work.row_number,
        escape_html(&search_url)
    )
}

/// IMSLP検索ページへのリンクを組み立てる
pub fn imslp_search_url(composer: &str, title: &str) -> String {
    let term = format!("{} {}", normalize_composer_name(composer), title);
    format!("{}?search={}&go=Go", SEARCH_BASE, urlencoding::encode(&term))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
