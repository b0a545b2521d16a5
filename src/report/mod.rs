//! レポート生成モジュール

pub mod html;

use crate::error::Result;
use crate::pipeline::ProcessedWork;
use std::path::{Path, PathBuf};

/// 出力形式
#[derive(Clone, Debug, Default)]
pub enum ReportFormat {
    #[default]
    Html,
    Json,
    Both,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            "both" => Ok(ReportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use html, json, or both", s)),
        }
    }
}

fn output_path_for_format(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", title, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path, title: &str) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        let html_path = output.join(format!("{}.html", title));
        let json_path = output.join(format!("{}.json", title));
        (html_path, json_path)
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(title);
        let html_path = parent.join(format!("{}.html", stem));
        let json_path = parent.join(format!("{}.json", stem));
        (html_path, json_path)
    }
}

pub fn generate_report(
    works: &[ProcessedWork],
    format: &ReportFormat,
    output: &Path,
    title: &str,
) -> Result<()> {
    match format {
        ReportFormat::Html => {
            let output_path = output_path_for_format(output, title, "html");
            println!("- HTMLレポートを生成中...");
            write_html(works, &output_path, title)?;
            println!("✔ HTML出力: {}", output_path.display());
        }
        ReportFormat::Json => {
            let output_path = output_path_for_format(output, title, "json");
            println!("- JSONを生成中...");
            write_json(works, &output_path)?;
            println!("✔ JSON出力: {}", output_path.display());
        }
        ReportFormat::Both => {
            let (html_path, json_path) = output_paths_for_both(output, title);

            println!("- HTMLレポートを生成中...");
            write_html(works, &html_path, title)?;
            println!("✔ HTML出力: {}", html_path.display());

            println!("- JSONを生成中...");
            write_json(works, &json_path)?;
            println!("✔ JSON出力: {}", json_path.display());
        }
    }

    Ok(())
}

fn write_html(works: &[ProcessedWork], path: &Path, title: &str) -> Result<()> {
    std::fs::write(path, html::render_html(works, title))?;
    Ok(())
}

fn write_json(works: &[ProcessedWork], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(works)?;
    std::fs::write(path, json)?;
    Ok(())
}
