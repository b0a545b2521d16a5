use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImslpReportError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("CSVに処理対象の行がありません: {0}")]
    NoWorksFound(String),

    #[error("カタログファイルが不正: {0}")]
    InvalidCatalog(String),

    #[error("HTTPリクエストエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("対話入力エラー: {0}")]
    Prompt(String),

    #[error("共通エラー: {0}")]
    Common(#[from] imslp_report_common::Error),
}

pub type Result<T> = std::result::Result<T, ImslpReportError>;
