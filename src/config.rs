use crate::error::{ImslpReportError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTPリクエストのタイムアウト（秒）
    pub request_timeout_seconds: u64,
    /// リクエスト間の待機（ミリ秒）
    pub fetch_delay_ms: u64,
    /// 作品ごとに取得するPDFリンクの最大数
    pub max_pdf_links: usize,
    /// User-Agentヘッダ
    pub user_agent: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ImslpReportError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("imslp-report").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            request_timeout_seconds: 15,
            fetch_delay_ms: 2000,  // サーバー負荷への配慮
            max_pdf_links: 3,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
