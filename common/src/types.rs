//! 照合関連の型定義
//!
//! CLIと他フロントエンドで共有される型:
//! - QueryInput: CSV1行分の入力（人手入力のまま）
//! - WorkRecord: カタログの正規エントリ
//! - MatchResult: 1件分の照合結果
//! - PdfLink: 作品ページから抽出したダウンロード情報

use serde::{Deserialize, Serialize};

/// CSV1行分の入力
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryInput {
    /// 作曲家（表記ゆれあり）
    pub composer: String,
    /// 曲名（楽章名・部分タイトルの場合あり）
    pub title: String,
    /// CSV内の物理行番号（1始まり）
    pub row_number: usize,
}

/// カタログの正規エントリ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkRecord {
    /// 正規タイトル（例: "Symphony No.40, K.550"）
    pub canonical_title: String,
    /// 作曲家の正規表記（例: "Mozart, Wolfgang Amadeus"）
    pub composer: String,
    /// 作品ページの正規URL
    pub url: String,
    /// 補足（どの楽章・アリアを指すか等）
    pub note: Option<String>,
}

/// 1件分の照合結果
///
/// recordの有無だけが結果のすべてで、「照合なし」は正常な値。
/// 曖昧な中間状態は持たない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchResult {
    /// 元の入力
    pub input: QueryInput,
    /// 照合された作品（なければNone）
    pub record: Option<WorkRecord>,
}

impl MatchResult {
    /// 照合に成功したか
    pub fn is_matched(&self) -> bool {
        self.record.is_some()
    }
}

/// 作品ページから抽出したダウンロード情報
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PdfLink {
    pub title: String,
    pub url: String,
    pub description: String,
    pub size_label: String,
}
