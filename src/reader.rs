//! CSV読み込みモジュール
//!
//! 2列CSV（作曲家, 曲名）を照合入力の列に変換する。
//! 空行・列不足の行・ヘッダー行はスキップし、行番号は
//! ファイル内の物理行（1始まり）をそのまま使う。

use crate::error::{ImslpReportError, Result};
use imslp_report_common::QueryInput;
use std::path::Path;

pub fn read_csv_works(path: &Path) -> Result<Vec<QueryInput>> {
    if !path.exists() {
        return Err(ImslpReportError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    Ok(parse_csv_str(&content))
}

/// CSV文字列をパースする
pub fn parse_csv_str(content: &str) -> Vec<QueryInput> {
    let mut works = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let row_number = idx + 1;

        if line.trim().is_empty() {
            continue;
        }

        let fields = parse_csv_line(line);
        if fields.len() < 2 {
            continue;
        }

        let composer = fields[0].trim();
        let title = fields[1].trim();
        if composer.is_empty() || title.is_empty() {
            continue;
        }

        // ヘッダー行はスキップ
        if composer.eq_ignore_ascii_case("composer") || title.eq_ignore_ascii_case("title") {
            continue;
        }

        works.push(QueryInput {
            composer: composer.to_string(),
            title: title.to_string(),
            row_number,
        });
    }

    works
}

/// CSV行をパース（ダブルクォート対応）
fn parse_csv_line(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut field_start = 0;

    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(trim_quotes(&line[field_start..i]));
                field_start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(trim_quotes(&line[field_start..]));

    fields
}

fn trim_quotes(s: &str) -> &str {
    let s = s.trim();
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
